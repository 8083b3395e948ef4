use async_trait::async_trait;
use resilient_dns_application::ports::PortConnector;
use resilient_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;

/// Plain TCP handshake with a deadline. The stream is dropped as soon as
/// the handshake completes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpPortConnector;

impl TcpPortConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PortConnector for TcpPortConnector {
    async fn connect(&self, addr: SocketAddr, timeout: Duration) -> Result<(), DomainError> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| DomainError::NetworkFailure(format!("Timeout connecting to {}", addr)))?
            .map_err(|e| {
                DomainError::NetworkFailure(format!("Connection to {} failed: {}", addr, e))
            })?;
        drop(stream);
        Ok(())
    }
}
