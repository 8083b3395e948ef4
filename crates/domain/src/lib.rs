//! Resilient DNS Domain Layer
pub mod config;
pub mod dns_record;
pub mod dns_reply;
pub mod dns_request;
pub mod errors;
pub mod mail_exchange;
pub mod record_key;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::RecordType;
pub use dns_reply::{Answer, DnsReply, ResponseStatus};
pub use dns_request::DnsRequest;
pub use errors::DomainError;
pub use mail_exchange::MailExchange;
pub use record_key::RecordKey;
