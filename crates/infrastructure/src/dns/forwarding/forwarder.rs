use super::message_builder::QueryMessage;
use super::response_parser::{DnsResponse, UpstreamOutcome};
use crate::dns::transport::tcp::TcpTransport;
use crate::dns::transport::udp::UdpTransport;
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use resilient_dns_application::ports::UpstreamResolver;
use resilient_dns_domain::{DomainError, MailExchange, RecordType};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::debug;

/// Sends recursive queries to the single configured upstream server.
pub struct UpstreamForwarder {
    server: SocketAddr,
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    /// Query over UDP, retrying once over TCP when the answer is truncated.
    pub async fn query(
        &self,
        domain: &str,
        record_type: &RecordType,
    ) -> Result<DnsResponse, DomainError> {
        let query = QueryMessage::new(domain, record_type)?;

        let udp = UdpTransport::new(self.server);
        let mut response = self.exchange(&udp, &query).await?;

        if response.truncated {
            debug!(domain = %domain, server = %self.server, "Truncated UDP answer, retrying over TCP");
            let tcp = TcpTransport::new(self.server);
            response = self.exchange(&tcp, &query).await?;
        }

        match response.outcome() {
            UpstreamOutcome::Answered => Ok(response),
            UpstreamOutcome::NameMissing => Err(DomainError::NxDomain),
            UpstreamOutcome::Failed => Err(DomainError::NetworkFailure(format!(
                "Upstream {} answered {}",
                self.server, response.rcode
            ))),
        }
    }

    async fn exchange(
        &self,
        transport: &dyn DnsTransport,
        query: &QueryMessage,
    ) -> Result<DnsResponse, DomainError> {
        let raw = transport.send(&query.bytes, self.timeout).await?;
        let response = DnsResponse::from_wire(&raw.bytes)?;

        if response.id != query.id {
            return Err(DomainError::ParseFailure(format!(
                "{} response id {} does not match query id {}",
                raw.protocol_used, response.id, query.id
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl UpstreamResolver for UpstreamForwarder {
    async fn resolve_addresses(&self, domain: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        let response = self.query(domain, &RecordType::A).await?;
        Ok(response.addresses)
    }

    async fn resolve_mail_exchangers(
        &self,
        domain: &str,
    ) -> Result<Vec<MailExchange>, DomainError> {
        let response = self.query(domain, &RecordType::MX).await?;
        Ok(response.mail_exchangers)
    }
}
