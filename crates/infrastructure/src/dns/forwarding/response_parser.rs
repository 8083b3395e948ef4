use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use resilient_dns_domain::{DomainError, MailExchange};
use std::net::Ipv4Addr;
use tracing::debug;

/// How the upstream classified its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOutcome {
    Answered,
    NameMissing,
    Failed,
}

/// The parts of an upstream answer this proxy keeps.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,
    pub rcode: ResponseCode,
    pub truncated: bool,
    pub addresses: Vec<Ipv4Addr>,
    pub mail_exchangers: Vec<MailExchange>,
}

impl DnsResponse {
    pub fn from_wire(bytes: &[u8]) -> Result<Self, DomainError> {
        let message = Message::from_vec(bytes)
            .map_err(|e| DomainError::ParseFailure(format!("upstream answer: {}", e)))?;

        let (addresses, mail_exchangers) = message.answers().iter().fold(
            (Vec::new(), Vec::new()),
            |(mut addresses, mut mail_exchangers), record| {
                // AAAA and CNAME chain members are not stored
                match record.data() {
                    Some(RData::A(a)) => addresses.push(a.0),
                    Some(RData::MX(mx)) => mail_exchangers.push(MailExchange::new(
                        mx.preference(),
                        mx.exchange().to_utf8(),
                    )),
                    _ => {}
                }
                (addresses, mail_exchangers)
            },
        );

        let response = Self {
            id: message.id(),
            rcode: message.response_code(),
            truncated: message.truncated(),
            addresses,
            mail_exchangers,
        };
        debug!(
            id = response.id,
            rcode = %response.rcode,
            truncated = response.truncated,
            addresses = response.addresses.len(),
            mail_exchangers = response.mail_exchangers.len(),
            "Upstream answer decoded"
        );
        Ok(response)
    }

    pub fn outcome(&self) -> UpstreamOutcome {
        match self.rcode {
            ResponseCode::NXDomain => UpstreamOutcome::NameMissing,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp => {
                UpstreamOutcome::Failed
            }
            _ => UpstreamOutcome::Answered,
        }
    }
}
