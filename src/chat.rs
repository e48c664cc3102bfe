use std::sync::Arc;

use tracing::debug;

use crate::client::ApiClient;
use crate::config::ConfigProvider;
use crate::error::Result;
use crate::logger::Logger;
use crate::models::{ChatMessage, ChatRequest, ChatResponse};

const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

/// Client for the chat-completion endpoint.
#[derive(Clone)]
pub struct ChatCompletionClient {
    api: ApiClient,
}

impl ChatCompletionClient {

    pub fn new(config: Arc<dyn ConfigProvider>) -> Self {
        Self { api: ApiClient::new(config) }
    }

    pub fn with_logger(config: Arc<dyn ConfigProvider>, logger: Arc<dyn Logger>) -> Self {
        Self { api: ApiClient::with_logger(config, logger) }
    }

    /// Sends `messages` in order and returns the first choice's message.
    ///
    /// An empty `choices` array yields [`ChatMessage::default`], not an error.
    pub async fn chat_complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {

        let config = self.api.config();
        let request = ChatRequest::new(&config, messages.to_vec());

        let response: ChatResponse = self.api
            .post(&config, CHAT_COMPLETIONS_PATH, &request)
            .await?;

        let reply = response
            .into_first_choice()
            .map(|choice| choice.message)
            .unwrap_or_default();

        debug!(role = %reply.role, "gpt response text: {}", reply.content);
        Ok(reply)

    }

}
