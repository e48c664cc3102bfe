use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::Config;

// Secondary sampling parameters are sent on every request and are not configurable.
pub const TOP_P: u32 = 1;
pub const FREQUENCY_PENALTY: i32 = 0;
pub const PRESENCE_PENALTY: i32 = 0;

// Missing and `null` response fields decode to their zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Body of a legacy `/completions` call.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: u32,
    pub frequency_penalty: i32,
    pub presence_penalty: i32,
}

impl CompletionRequest {
    pub fn new(config: &Config, prompt: impl Into<String>) -> Self {
        Self {
            model: config.model.clone(),
            prompt: prompt.into(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        }
    }
}

/// Body of a `/chat/completions` call. Message order is preserved on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: u32,
    pub frequency_penalty: i32,
    pub presence_penalty: i32,
}

impl ChatRequest {
    pub fn new(config: &Config, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: config.model.clone(),
            messages,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        }
    }
}

/// Response envelope shared by both endpoints; `C` is the per-endpoint choice shape.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct Response<C> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub object: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<C>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage: HashMap<String, Value>,
}

impl<C> Default for Response<C> {
    fn default() -> Self {
        Self {
            id: String::new(),
            object: String::new(),
            created: 0,
            model: String::new(),
            choices: Vec::new(),
            usage: HashMap::new(),
        }
    }
}

impl<C> Response<C> {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }

    pub fn into_first_choice(self) -> Option<C> {
        self.choices.into_iter().next()
    }
}

pub type CompletionResponse = Response<CompletionChoice>;
pub type ChatResponse = Response<ChatChoice>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionChoice {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub index: u32,
    #[serde(default)]
    pub logprobs: Option<Value>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatChoice {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: ChatMessage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub index: u32,
    #[serde(default)]
    pub logprobs: Option<Value>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}
