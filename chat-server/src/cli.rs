//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ServerConfig;

#[derive(Parser)]
#[command(name = "chatbot")]
#[command(about = "Web chatbot server", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (config from env; host/port can override HOST/PORT).
    Run {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Load ServerConfig from environment. `host` / `port` override HOST / PORT.
pub fn load_config(host: Option<String>, port: Option<u16>) -> Result<ServerConfig> {
    ServerConfig::load(host, port)
}
