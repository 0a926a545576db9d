//! gptirc binary: loads `.env`, parses the CLI, and runs the relay.

use anyhow::Result;
use clap::Parser;
use irc_bot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, nick } => {
            let config = load_config(config, nick)?;
            run_bot(config).await
        }
    }
}
