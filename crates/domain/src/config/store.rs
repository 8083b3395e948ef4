use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_path")]
    pub path: String,

    /// Unset means every value ever learned is kept. When set, a key keeps
    /// only its most recently learned values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values_per_key: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            max_values_per_key: None,
        }
    }
}

fn default_path() -> String {
    "/usr/local/share/dns-proxy/phone_book.json".to_string()
}
