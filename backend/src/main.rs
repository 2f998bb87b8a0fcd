// GanProxy Server entrypoint
//!
//! Initialization, middleware wiring and graceful shutdown live in the
//! library modules so this file remains a thin orchestrator.

use anyhow::Result;
use clap::Parser;
use ganproxy_configs::ServerConfig;
use ganproxy_server::cli::Cli;
use ganproxy_server::lifecycle::{bootstrap, run};
use ganproxy_server::logging;
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = match ServerConfig::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    config.apply_env_overrides()?;
    cli.apply_to(&mut config);
    if let Err(e) = config.validate() {
        eprintln!("❌ FATAL: Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // Logging before any other side effects
    let log_file = logging::init_logging(&config.logging)?;
    info!("Configuration loaded from {}", source);

    let components = bootstrap(&config, log_file)?;

    // Run HTTP server until termination signal is received
    run(&config, components).await
}
