use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use chrono::Utc;

pub const DEFAULT_LOG_PATH: &str = "./requests.log";

/// Receives the outbound and inbound payloads of every api call.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
}

/// Forwards to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Appends timestamped lines to a file.
#[derive(Debug, Clone)]
pub struct FileLogger {
    path: PathBuf,
}

impl FileLogger {

    pub fn new(path: impl Into<PathBuf>) -> Self {

        Self { path: path.into() }

    }

    /// Uses `LOG_PATH`, or `./requests.log` when unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {

        let log_path = lookup("LOG_PATH")
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());

        Self::new(log_path)

    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn append(&self, log_entry: &str) -> std::io::Result<()> {

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(log_entry.as_bytes())

    }

}

impl Logger for FileLogger {

    fn info(&self, message: &str) {

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
        let log_entry = format!("{} | {}\n", timestamp, message);

        // a failed write never fails the request it describes
        if let Err(e) = self.append(&log_entry) {
            eprintln!("Failed to write to log file {}: {}", self.path.display(), e);
        }

    }

}
