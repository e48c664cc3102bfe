use std::str::FromStr;

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "text-davinci-003";
pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Settings read before every request.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// API root, e.g. `https://api.openai.com/v1`. Endpoint paths are appended to it.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Build a config from a variable lookup, falling back to defaults.
    ///
    /// | Variable             | Default                     |
    /// |----------------------|-----------------------------|
    /// | `OPENAI_API_KEY`     | `""` (empty)                |
    /// | `OPENAI_MODEL`       | `text-davinci-003`          |
    /// | `OPENAI_MAX_TOKENS`  | `512`                       |
    /// | `OPENAI_TEMPERATURE` | `0.7`                       |
    /// | `OPENAI_BASE_URL`    | `https://api.openai.com/v1` |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: lookup("OPENAI_API_KEY").unwrap_or_default(),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: parse_or_default(&lookup, "OPENAI_MAX_TOKENS", DEFAULT_MAX_TOKENS),
            temperature: parse_or_default(&lookup, "OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE),
            base_url: lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring malformed {key}={raw:?}, using {default}");
            default
        }),
        None => default,
    }
}

/// Source of [`Config`], consulted once per request.
pub trait ConfigProvider: Send + Sync {
    fn load(&self) -> Config;
}

impl ConfigProvider for Config {
    fn load(&self) -> Config {
        self.clone()
    }
}

/// Re-reads the process environment on every [`ConfigProvider::load`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl ConfigProvider for EnvConfig {
    fn load(&self) -> Config {
        Config::from_env()
    }
}
