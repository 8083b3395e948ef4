use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// `ip` or `ip:port`; port 53 is implied when omitted.
    #[serde(default = "default_server")]
    pub server: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl UpstreamConfig {
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        let server = self.server.trim();
        if let Ok(addr) = server.parse::<SocketAddr>() {
            return Some(addr);
        }
        server
            .parse::<IpAddr>()
            .ok()
            .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_server() -> String {
    "8.8.8.8".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}
