//! Configuration Module
//!
//! Handles loading server configuration from command line flags and
//! environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;

/// Display name of the service.
pub const APPLICATION_DESCRIPTION: &str = "Word Shuffle API";

/// Build version of the service.
pub const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server configuration parameters.
///
/// Every value except the boolean flags can also be set via its environment
/// variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "word_shuffle", about = APPLICATION_DESCRIPTION, disable_version_flag = true)]
pub struct Config {
    /// Address and port to listen
    #[arg(long, env = "WORD_SHUFFLE_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Path to the JSON file with dataset
    #[arg(long, env = "WORD_SHUFFLE_DATASET", default_value = "dataset.json")]
    pub dataset: PathBuf,

    /// Enable verbose output and periodic metrics reports
    #[arg(long)]
    pub debug: bool,

    /// Show version
    #[arg(long)]
    pub version: bool,

    /// Seconds between periodic metrics reports in debug mode
    #[arg(long, env = "WORD_SHUFFLE_METRICS_INTERVAL", default_value_t = 60)]
    pub metrics_interval: u64,

    /// Seconds to wait for in-flight requests on shutdown
    #[arg(long, env = "WORD_SHUFFLE_DRAIN_TIMEOUT", default_value_t = 10)]
    pub drain_timeout: u64,

    /// Seconds a single request may take
    #[arg(long, env = "WORD_SHUFFLE_REQUEST_TIMEOUT", default_value_t = 10)]
    pub request_timeout: u64,

    /// Instance discriminator encoded into every UID
    #[arg(long, env = "WORD_SHUFFLE_MACHINE_ID")]
    pub machine_id: Option<u16>,
}

impl Config {
    /// Text printed by `--version`.
    pub fn version_text() -> String {
        format!("{}\nVersion: {}", APPLICATION_DESCRIPTION, BUILD_VERSION)
    }

    pub fn metrics_interval(&self) -> Duration {
        Duration::from_secs(self.metrics_interval)
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.drain_timeout)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Resolves the bind address, preferring IPv4 results.
    pub async fn resolve(&self) -> anyhow::Result<ServiceConfiguration> {
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host(self.bind.as_str())
            .await
            .with_context(|| format!("Error while resolving bind address {}", self.bind))?
            .collect();

        let listen = addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| anyhow!("Bind address {} resolved to nothing", self.bind))?;

        Ok(ServiceConfiguration { listen })
    }

    /// The configured machine id, or one derived from `listen`.
    ///
    /// The derived id is the lower 16 bits of an IPv4 address, 0 otherwise.
    pub fn machine_id_for(&self, listen: SocketAddr) -> u16 {
        self.machine_id.unwrap_or_else(|| match listen.ip() {
            IpAddr::V4(ip) => {
                let octets = ip.octets();
                u16::from_be_bytes([octets[2], octets[3]])
            }
            IpAddr::V6(_) => 0,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            dataset: PathBuf::from("dataset.json"),
            debug: false,
            version: false,
            metrics_interval: 60,
            drain_timeout: 10,
            request_timeout: 10,
            machine_id: None,
        }
    }
}

// == Service Configuration ==
/// Resolved settings, fixed before the server starts accepting requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfiguration {
    /// Address the listener binds to
    pub listen: SocketAddr,
}
