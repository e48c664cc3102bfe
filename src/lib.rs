pub mod chat;
pub mod client;
pub mod completion;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;

#[cfg(test)]
mod stub;

pub use chat::ChatCompletionClient;
pub use client::{ApiClient, REQUEST_TIMEOUT};
pub use completion::TextCompletionClient;
pub use config::{Config, ConfigProvider, EnvConfig};
pub use error::{GptError, Result};
pub use logger::{FileLogger, Logger, TracingLogger};
pub use models::ChatMessage;
