use anyhow::{Context, Result};
use beacon_core::IceServerConfig;
use beacon_server::{DEFAULT_PORT, DEFAULT_STUN_URL, ServerConfig};
use clap::Parser;
use colored::*;
use std::net::IpAddr;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "beacon")]
#[command(about = "Room-based WebRTC signaling relay", long_about = None)]
struct Cli {
    #[arg(long, env = "BEACON_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Comma separated STUN urls announced to clients
    #[arg(long = "stun", env = "STUN_URLS", value_delimiter = ',', default_value = DEFAULT_STUN_URL)]
    stun_urls: Vec<String>,

    #[arg(long, env = "TURN_URL")]
    turn_url: Option<String>,

    #[arg(long, env = "TURN_USERNAME")]
    turn_username: Option<String>,

    #[arg(long, env = "TURN_CREDENTIAL")]
    turn_credential: Option<String>,

    /// tracing filter, e.g. `info` or `beacon_server=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_filter: String,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        let mut ice_servers = Vec::new();

        let stun_urls: Vec<String> = self
            .stun_urls
            .into_iter()
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .collect();
        if !stun_urls.is_empty() {
            ice_servers.push(IceServerConfig {
                urls: stun_urls,
                username: None,
                credential: None,
            });
        }

        let turn_url = self
            .turn_url
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());

        match turn_url {
            Some(turn_url) => ice_servers.push(IceServerConfig {
                urls: vec![turn_url],
                username: self.turn_username,
                credential: self.turn_credential,
            }),
            None if self.turn_username.is_some() || self.turn_credential.is_some() => {
                warn!("TURN credentials given without TURN_URL, ignoring them");
            }
            None => {}
        }

        ServerConfig {
            host: self.host,
            port: self.port,
            ice_servers,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_filter).context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.into_config();

    println!("{}", "📡 Beacon signaling relay".green().bold());
    println!("   🔌 Address:     {}", config.socket_addr());
    println!("   🧊 ICE servers: {}", config.ice_servers.len());

    beacon_server::serve(config)
        .await
        .context("Signaling relay failed")?;

    println!("{}", "👋 Relay stopped".cyan());
    Ok(())
}
