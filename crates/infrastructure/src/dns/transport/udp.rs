//! One query, one datagram. A truncated answer is handed back as-is; the
//! forwarder decides whether to retry over TCP.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use resilient_dns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Large enough for any answer an upstream sends without EDNS.
const RECV_BUFFER_SIZE: usize = 4096;

pub struct UdpTransport {
    upstream: SocketAddr,
}

impl UdpTransport {
    pub fn new(upstream: SocketAddr) -> Self {
        Self { upstream }
    }

    fn local_bind(&self) -> SocketAddr {
        match self.upstream {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        }
    }

    /// Connected socket: datagrams from any other peer never reach `recv`.
    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let socket = UdpSocket::bind(self.local_bind())
            .await
            .map_err(|e| DomainError::IoFailure(format!("UDP bind: {}", e)))?;
        socket
            .connect(self.upstream)
            .await
            .map_err(|e| self.network_failure("connect", e))?;

        socket
            .send(message_bytes)
            .await
            .map_err(|e| self.network_failure("send", e))?;

        let mut buf = vec![0u8; RECV_BUFFER_SIZE];
        let received = socket
            .recv(&mut buf)
            .await
            .map_err(|e| self.network_failure("recv", e))?;
        buf.truncate(received);

        debug!(upstream = %self.upstream, sent = message_bytes.len(), received, "UDP exchange complete");
        Ok(buf)
    }

    fn network_failure(&self, step: &str, e: std::io::Error) -> DomainError {
        DomainError::NetworkFailure(format!("UDP {} {}: {}", step, self.upstream, e))
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::QueryTimeout)??;

        Ok(TransportResponse {
            bytes,
            protocol_used: self.protocol_name(),
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
