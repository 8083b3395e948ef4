use async_trait::async_trait;
use resilient_dns_domain::{DnsReply, DnsRequest};

/// Anything the query server can hand a decoded request to.
#[async_trait]
pub trait QueryResolver: Send + Sync {
    async fn resolve(&self, request: &DnsRequest) -> DnsReply;
}
