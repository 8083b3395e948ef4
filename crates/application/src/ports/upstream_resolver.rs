use async_trait::async_trait;
use resilient_dns_domain::{DomainError, MailExchange};
use std::net::Ipv4Addr;

/// Standard DNS resolution against the configured upstream server.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    async fn resolve_addresses(&self, domain: &str) -> Result<Vec<Ipv4Addr>, DomainError>;

    async fn resolve_mail_exchangers(&self, domain: &str)
        -> Result<Vec<MailExchange>, DomainError>;
}
