use async_trait::async_trait;
use resilient_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

/// Opens (and immediately releases) a single TCP connection.
#[async_trait]
pub trait PortConnector: Send + Sync {
    async fn connect(&self, addr: SocketAddr, timeout: Duration) -> Result<(), DomainError>;
}
