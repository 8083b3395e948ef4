use serde::{Deserialize, Serialize};

/// Named set of ports tried together, in listed order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProbeGroup {
    pub name: String,
    pub ports: Vec<u16>,
}

impl ProbeGroup {
    pub fn new(name: impl Into<String>, ports: Vec<u16>) -> Self {
        Self {
            name: name.into(),
            ports,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Per connection attempt.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Priority order; the first open port anywhere wins.
    #[serde(default = "default_groups")]
    pub groups: Vec<ProbeGroup>,
}

impl ProbeConfig {
    pub fn total_ports(&self) -> usize {
        self.groups.iter().map(|g| g.ports.len()).sum()
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            groups: default_groups(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    400
}

pub fn default_groups() -> Vec<ProbeGroup> {
    vec![
        ProbeGroup::new("web", vec![443, 80]),
        ProbeGroup::new("messaging", vec![5222, 5223, 5190, 6667, 6697]),
        ProbeGroup::new("mail", vec![25, 465, 587, 993, 995]),
        ProbeGroup::new("infrastructure", vec![22, 3389, 1883, 21, 53]),
    ]
}
