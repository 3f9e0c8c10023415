//! Binary for the web chatbot server.

use anyhow::Result;
use chat_server::{load_config, run_server, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { host, port } => {
            let config = load_config(host, port)?;
            run_server(config).await
        }
    }
}
