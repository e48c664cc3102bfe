use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{Config, ConfigProvider};
use crate::error::{GptError, Result};
use crate::logger::{Logger, TracingLogger};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One POST per call: no retries, no streaming.
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    config: Arc<dyn ConfigProvider>,
    logger: Arc<dyn Logger>,
    timeout: Duration,
}

impl ApiClient {

    pub fn new(config: Arc<dyn ConfigProvider>) -> Self {

        Self::with_logger(config, Arc::new(TracingLogger))

    }

    pub fn with_logger(config: Arc<dyn ConfigProvider>, logger: Arc<dyn Logger>) -> Self {

        Self {
            http_client: Client::new(),
            config,
            logger,
            timeout: REQUEST_TIMEOUT,
        }

    }

    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Reads the config for a single call.
    pub fn config(&self) -> Config {
        self.config.load()
    }

    /// Sends `payload` to `path` under the configured base url and decodes the body.
    ///
    /// A `null` body decodes to `Resp::default()`.
    pub async fn post<Req, Resp>(&self, config: &Config, path: &str, payload: &Req) -> Result<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned + Default,
    {

        let request_data = serde_json::to_string(payload).map_err(GptError::Encode)?;
        self.logger.info(&format!("request gpt json string : {}", request_data));

        let response = self.http_client
            .post(config.endpoint(path))
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", config.api_key))
            .body(request_data)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!("gpt api returned {status}: {body}");
            return Err(GptError::status(status.as_u16(), body));
        }

        let body = response.text().await?;
        self.logger.info(&format!("response gpt json string : {}", body));
        debug!(raw_body = %body, "gpt api raw response");

        let decoded: Option<Resp> = serde_json::from_str(&body).map_err(GptError::Decode)?;
        Ok(decoded.unwrap_or_default())

    }

}
