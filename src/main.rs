use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gpt_client::{
    ChatCompletionClient, ChatMessage, EnvConfig, FileLogger, Logger, TextCompletionClient,
    TracingLogger,
};

#[derive(Parser)]
#[command(name = "gpt-client")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Append request/response payloads to LOG_PATH (default ./requests.log)
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Text completion on the legacy completions endpoint
    Complete {
        prompt: String,
    },

    /// Single-turn chat completion
    Chat {
        message: String,

        /// Optional system message sent before the user message
        #[arg(short, long)]
        system: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Arc::new(EnvConfig);
    let logger: Arc<dyn Logger> = if cli.log_file {
        Arc::new(FileLogger::from_env())
    } else {
        Arc::new(TracingLogger)
    };

    match cli.command {
        Commands::Complete { prompt } => {
            let client = TextCompletionClient::with_logger(config, logger);
            let reply = client.complete(&prompt).await?;
            println!("{}", reply);
        }
        Commands::Chat { message, system } => {
            let mut messages = Vec::new();
            if let Some(system) = system {
                messages.push(ChatMessage::system(system));
            }
            messages.push(ChatMessage::user(message));

            let client = ChatCompletionClient::with_logger(config, logger);
            let reply = client.chat_complete(&messages).await?;
            println!("{}", reply.content);
        }
    }

    Ok(())

}
