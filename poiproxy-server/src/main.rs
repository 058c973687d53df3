mod api;
mod args;
mod config;

use anyhow::Result;
use api::AppState;
use args::{Cli, Commands};
use clap::Parser;
use crate::config::ServerConfig;
use log::info;
use poiproxy_core::fs::ResourceScanner;
use poiproxy_core::ServiceRegistry;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = ServerConfig::load(&cli.config)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    match cli.command {
        Some(Commands::Resources { root, pattern }) => list_resources(&root, pattern.as_deref()),
        Some(Commands::Serve { port, services_dir }) => {
            apply_overrides(&mut config, port, services_dir);
            serve(config).await
        }
        None => serve(config).await,
    }
}

fn apply_overrides(config: &mut ServerConfig, port: Option<u16>, services_dir: Option<PathBuf>) {
    if let Some(port) = port {
        config.server_port = port;
    }
    if let Some(dir) = services_dir {
        config.registry.directory = dir;
    }
}

async fn serve(config: ServerConfig) -> Result<()> {
    info!("=== POIProxy Service Registry Starting ===");

    let registry = ServiceRegistry::load(config.registry.clone());
    info!(
        "Registered {} services from {:?}",
        registry.registered_configurations().len(),
        config.registry.directory
    );

    api::run_api_server(AppState::new(registry), config.server_port).await
}

fn list_resources(root: &std::path::Path, pattern: Option<&str>) -> Result<()> {
    let scanner = match pattern {
        Some(pattern) => ResourceScanner::new(pattern)?,
        None => ResourceScanner::all(),
    };

    for path in scanner.scan(root) {
        println!("{}", path.display());
    }
    Ok(())
}
