use super::RecordType;
use std::net::IpAddr;
use std::sync::Arc;

/// A decoded client question: trailing-dot-stripped, case as received.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub client_ip: IpAddr,
}

impl DnsRequest {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType, client_ip: IpAddr) -> Self {
        let domain: Arc<str> = domain.into();
        let domain = match domain.strip_suffix('.') {
            Some(stripped) => Arc::from(stripped),
            None => domain,
        };
        Self {
            domain,
            record_type,
            client_ip,
        }
    }
}
