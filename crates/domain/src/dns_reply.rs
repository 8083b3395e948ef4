use crate::MailExchange;
use std::net::Ipv4Addr;

/// The two outcomes a client can ever observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    NoError,
    ServFail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Address(Ipv4Addr),
    MailExchange(MailExchange),
}

/// Structured reply handed back to the query server for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsReply {
    pub status: ResponseStatus,
    pub answers: Vec<Answer>,
    /// Freshness hint attached to every answer record.
    pub ttl: u32,
}

impl DnsReply {
    /// Success with nothing to add.
    pub fn empty() -> Self {
        Self {
            status: ResponseStatus::NoError,
            answers: Vec::new(),
            ttl: 0,
        }
    }

    pub fn server_failure() -> Self {
        Self {
            status: ResponseStatus::ServFail,
            answers: Vec::new(),
            ttl: 0,
        }
    }

    pub fn with_answers(answers: Vec<Answer>, ttl: u32) -> Self {
        Self {
            status: ResponseStatus::NoError,
            answers,
            ttl,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn addresses(&self) -> Vec<Ipv4Addr> {
        self.answers
            .iter()
            .filter_map(|answer| match answer {
                Answer::Address(ip) => Some(*ip),
                Answer::MailExchange(_) => None,
            })
            .collect()
    }

    pub fn mail_exchangers(&self) -> Vec<&MailExchange> {
        self.answers
            .iter()
            .filter_map(|answer| match answer {
                Answer::MailExchange(mx) => Some(mx),
                Answer::Address(_) => None,
            })
            .collect()
    }
}
