use std::sync::Arc;

use tracing::debug;

use crate::client::ApiClient;
use crate::config::ConfigProvider;
use crate::error::Result;
use crate::logger::Logger;
use crate::models::{CompletionRequest, CompletionResponse};

const COMPLETIONS_PATH: &str = "completions";

/// Client for the legacy text-completion endpoint.
#[derive(Clone)]
pub struct TextCompletionClient {
    api: ApiClient,
}

impl TextCompletionClient {

    pub fn new(config: Arc<dyn ConfigProvider>) -> Self {
        Self { api: ApiClient::new(config) }
    }

    pub fn with_logger(config: Arc<dyn ConfigProvider>, logger: Arc<dyn Logger>) -> Self {
        Self { api: ApiClient::with_logger(config, logger) }
    }

    /// Returns the text of the first choice, or an empty string when there are none.
    pub async fn complete(&self, prompt: &str) -> Result<String> {

        let config = self.api.config();
        let request = CompletionRequest::new(&config, prompt);

        let response: CompletionResponse = self.api
            .post(&config, COMPLETIONS_PATH, &request)
            .await?;

        let reply = response
            .into_first_choice()
            .map(|choice| choice.text)
            .unwrap_or_default();

        debug!("gpt response text: {}", reply);
        Ok(reply)

    }

}
