use std::fmt;

/// Prefix distinguishing mail-exchange entries from address entries.
pub const MAIL_EXCHANGE_PREFIX: &str = "MX:";

/// Lookup key into the persistent store.
///
/// Address records live under the bare domain, mail-exchange records under
/// `MX:<domain>`. The domain keeps its case and loses any trailing dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn address(domain: &str) -> Self {
        Self(normalize(domain).to_string())
    }

    pub fn mail_exchange(domain: &str) -> Self {
        Self(format!("{}{}", MAIL_EXCHANGE_PREFIX, normalize(domain)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_mail_exchange(&self) -> bool {
        self.0.starts_with(MAIL_EXCHANGE_PREFIX)
    }

    /// The domain part, without any type tag.
    pub fn domain(&self) -> &str {
        self.0
            .strip_prefix(MAIL_EXCHANGE_PREFIX)
            .unwrap_or(&self.0)
    }
}

fn normalize(domain: &str) -> &str {
    domain.trim_end_matches('.')
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
