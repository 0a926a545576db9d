//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "gptirc")]
#[command(about = "IRC relay to an OpenAI-compatible chat backend", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Connect and relay (config from env, or from a JSON file; nick can override IRC_NICKNAME).
    Run {
        /// JSON config file; when absent, config comes from the environment.
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        nick: Option<String>,
    },
}

/// Load BotConfig from `config_path` if given, else from environment. `nick` overrides the nickname.
pub fn load_config(config_path: Option<PathBuf>, nick: Option<String>) -> Result<BotConfig> {
    match config_path {
        Some(path) => BotConfig::from_json_file(&path, nick),
        None => BotConfig::load(nick),
    }
}
