use async_trait::async_trait;
use resilient_dns_application::ports::{MergeOutcome, RecordStore};
use resilient_dns_domain::DomainError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

type Records = BTreeMap<String, Vec<String>>;

/// Log target for registration lines.
pub const REGISTRY_TARGET: &str = "registry";

/// Key → value-set store mirrored to a single JSON file.
///
/// One mutex covers the map and the file: a merge, its snapshot write and
/// its registration line happen as one step, so concurrent updates never
/// interleave on disk.
pub struct JsonRecordStore {
    path: PathBuf,
    max_values_per_key: Option<usize>,
    records: Mutex<Records>,
}

impl JsonRecordStore {
    /// Load `path`; a missing or unreadable file yields an empty store.
    pub async fn open(path: impl Into<PathBuf>, max_values_per_key: Option<usize>) -> Self {
        let path = path.into();
        let records = Self::load(&path).await;
        info!(path = %path.display(), keys = records.len(), "Record store loaded");
        Self {
            path,
            max_values_per_key,
            records: Mutex::new(records),
        }
    }

    pub async fn load(path: &Path) -> Records {
        match read_snapshot(path).await {
            Ok(records) => records,
            Err(DomainError::NotFound(_)) => {
                debug!(path = %path.display(), "No record store file, starting empty");
                Records::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Record store unreadable, starting empty");
                Records::new()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn key_count(&self) -> usize {
        self.records.lock().await.len()
    }

    fn retain_recent(&self, values: &mut Vec<String>) {
        if let Some(max) = self.max_values_per_key {
            if values.len() > max {
                let excess = values.len() - max;
                values.drain(..excess);
            }
        }
    }
}

#[async_trait]
impl RecordStore for JsonRecordStore {
    async fn get(&self, key: &str) -> Vec<String> {
        let records = self.records.lock().await;
        records.get(key).cloned().unwrap_or_default()
    }

    async fn update(&self, key: &str, candidates: &[String]) -> MergeOutcome {
        let mut records = self.records.lock().await;

        let existing = records.get(key).map(Vec::as_slice).unwrap_or(&[]);
        let mut added: Vec<String> = Vec::new();
        for candidate in candidates {
            if !existing.contains(candidate) && !added.contains(candidate) {
                added.push(candidate.clone());
            }
        }

        if added.is_empty() {
            return MergeOutcome::Unchanged;
        }

        let mut merged = existing.to_vec();
        merged.extend(added.iter().cloned());
        self.retain_recent(&mut merged);
        // Only what survived the cap counts as registered
        added.retain(|value| merged.contains(value));
        records.insert(key.to_string(), merged);

        let persisted = match write_snapshot(&self.path, &records).await {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to persist record store");
                false
            }
        };

        info!(target: REGISTRY_TARGET, "{} -> {} - registered", key, added.join(", "));

        MergeOutcome::Merged { added, persisted }
    }
}

async fn read_snapshot(path: &Path) -> Result<Records, DomainError> {
    let contents = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => DomainError::NotFound(path.display().to_string()),
        _ => DomainError::IoFailure(format!("{}: {}", path.display(), e)),
    })?;

    serde_json::from_slice(&contents)
        .map_err(|e| DomainError::ParseFailure(format!("{}: {}", path.display(), e)))
}

/// Serialize the whole map and swap it in with a rename.
async fn write_snapshot(path: &Path, records: &Records) -> Result<(), DomainError> {
    let bytes = to_pretty_json(records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DomainError::IoFailure(format!("{}: {}", parent.display(), e)))?;
    }

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, &bytes)
        .await
        .map_err(|e| DomainError::IoFailure(format!("{}: {}", tmp.display(), e)))?;

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(DomainError::IoFailure(format!("{}: {}", path.display(), e)));
    }
    Ok(())
}

fn to_pretty_json(records: &Records) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(4096);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut serializer)
        .map_err(|e| DomainError::ParseFailure(format!("Failed to serialize records: {}", e)))?;
    buf.push(b'\n');
    Ok(buf)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
