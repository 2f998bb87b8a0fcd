use clap::Parser;
use ganproxy_configs::ServerConfig;
use std::path::PathBuf;

/// GanProxy - JSON to Oracle translation proxy
#[derive(Parser, Debug, Default)]
#[command(name = "ganproxy-server")]
#[command(author = "GanProxy Team")]
#[command(version)]
#[command(about = "Translates JSON records into Oracle INSERTs and relays them to the Oracle API", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file (skips the default search paths)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long = "host")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Host of the downstream Oracle API
    #[arg(long = "oracle-host")]
    pub oracle_host: Option<String>,

    /// Port of the downstream Oracle API
    #[arg(long = "oracle-port")]
    pub oracle_port: Option<u16>,

    /// Bearer token sent to the Oracle API
    #[arg(long = "oracle-token")]
    pub oracle_token: Option<String>,
}

impl Cli {
    /// Command-line flags win over file and environment values.
    pub fn apply_to(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.oracle_host {
            config.oracle.host = host.clone();
        }
        if let Some(port) = self.oracle_port {
            config.oracle.port = port;
        }
        if let Some(token) = &self.oracle_token {
            config.oracle.token = token.clone();
        }
    }
}
