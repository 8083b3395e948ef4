use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;

/// Exchange host of a null MX: the domain accepts no mail.
pub const NULL_EXCHANGE: &str = ".";

/// One mail-exchange answer, stored as `preference:exchangeHost`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MailExchange {
    pub preference: u16,
    pub exchange: String,
}

impl MailExchange {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        let exchange: String = exchange.into();
        // The root name has no label to strip a dot from
        let exchange = match exchange.trim_end_matches('.') {
            "" => NULL_EXCHANGE.to_string(),
            host => host.to_string(),
        };
        Self {
            preference,
            exchange,
        }
    }

    pub fn is_null(&self) -> bool {
        self.exchange == NULL_EXCHANGE
    }

    /// Textual form kept in the store.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MailExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.preference, self.exchange)
    }
}

impl FromStr for MailExchange {
    type Err = DomainError;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let (preference, exchange) = entry.split_once(':').ok_or_else(|| {
            DomainError::ParseFailure(format!("Mail exchange entry without separator: {}", entry))
        })?;

        let preference = preference.trim().parse::<u16>().map_err(|e| {
            DomainError::ParseFailure(format!("Invalid preference in '{}': {}", entry, e))
        })?;

        let exchange = exchange.trim();
        if exchange.is_empty() {
            return Err(DomainError::ParseFailure(format!(
                "Empty exchange host in '{}'",
                entry
            )));
        }

        Ok(Self::new(preference, exchange))
    }
}
