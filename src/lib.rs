pub mod agent;
pub mod models;
pub mod server;
pub mod config;
pub mod llm;
pub mod cli;

use agent::IntentAgent;
use cli::Args;
use config::AgentConfig;
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AgentConfig::from_args(&args)?;
    config.log_summary();

    let agent = IntentAgent::from_config(&config)?;
    info!("Starting server on: {}", config.server_addr);
    let server = Server::new(&config, agent);
    server.run().await?;

    Ok(())
}
