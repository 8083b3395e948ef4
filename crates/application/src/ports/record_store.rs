use async_trait::async_trait;

/// Result of merging candidate values into a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Every candidate was already known; nothing was written.
    Unchanged,
    Merged {
        added: Vec<String>,
        /// `false` when the snapshot could not be written to disk.
        persisted: bool,
    },
}

impl MergeOutcome {
    pub fn added(&self) -> &[String] {
        match self {
            MergeOutcome::Unchanged => &[],
            MergeOutcome::Merged { added, .. } => added,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, MergeOutcome::Unchanged)
    }
}

/// Durable key → value-set mapping.
///
/// Implementations serialize every `get` and `update` behind one exclusive
/// lock, so merges are never torn.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Owned copy of the values for `key`, empty when absent.
    async fn get(&self, key: &str) -> Vec<String>;

    /// Union `candidates` into `key`. Writes the full snapshot only when at
    /// least one candidate is new.
    async fn update(&self, key: &str, candidates: &[String]) -> MergeOutcome;
}
