use thiserror::Error;

#[derive(Debug, Error)]
pub enum GptError {
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("request to gpt api failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("gpt api status code not equals 200, code is {status}, details: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl GptError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, GptError>;
