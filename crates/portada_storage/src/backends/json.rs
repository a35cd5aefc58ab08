use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use portada_core::{Error, PublicationLedger, Result};
use tokio::sync::RwLock;

/// File-backed publication ledger: a single JSON array of article ids,
/// read once at startup and rewritten in full on every record.
///
/// Assumes a single writer per file. If persisting fails after an insert,
/// the id stays in memory (the post did go out) and the error aborts the
/// caller's tick; the file catches up on the next successful record.
pub struct JsonLedger {
    path: PathBuf,
    ids: RwLock<HashSet<u64>>,
}

impl JsonLedger {
    /// Load the ledger from `path`, starting empty when the file does not
    /// exist yet. A present-but-unreadable file is an error, not an empty
    /// ledger; silently starting over would re-publish everything.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let ids = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<u64>>(&bytes)
                .map_err(|e| {
                    Error::Ledger(format!("{} is not a valid ledger file: {}", path.display(), e))
                })?
                .into_iter()
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                return Err(Error::Ledger(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::debug!(path = %path.display(), count = ids.len(), "Ledger loaded");
        Ok(Self {
            path,
            ids: RwLock::new(ids),
        })
    }

    async fn persist(&self, ids: &HashSet<u64>) -> Result<()> {
        let mut sorted: Vec<u64> = ids.iter().copied().collect();
        sorted.sort_unstable();
        let json = serde_json::to_vec_pretty(&sorted)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    Error::Ledger(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| Error::Ledger(format!("failed to write {}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl PublicationLedger for JsonLedger {
    async fn contains(&self, id: u64) -> Result<bool> {
        Ok(self.ids.read().await.contains(&id))
    }

    async fn record(&self, id: u64) -> Result<()> {
        // Write lock held across the file write so a record is durable
        // before the next membership test can see it.
        let mut ids = self.ids.write().await;
        if !ids.insert(id) {
            return Ok(());
        }
        self.persist(&ids).await
    }

    async fn all(&self) -> Result<Vec<u64>> {
        let mut sorted: Vec<u64> = self.ids.read().await.iter().copied().collect();
        sorted.sort_unstable();
        Ok(sorted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = JsonLedger::open(dir.path().join("ledger.json")).await.unwrap();
        assert!(!ledger.contains(1).await.unwrap());
        assert!(ledger.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let ledger = JsonLedger::open(&path).await.unwrap();
        ledger.record(4821).await.unwrap();
        ledger.record(4822).await.unwrap();
        drop(ledger);

        let reloaded = JsonLedger::open(&path).await.unwrap();
        assert!(reloaded.contains(4821).await.unwrap());
        assert!(reloaded.contains(4822).await.unwrap());
        assert!(!reloaded.contains(4823).await.unwrap());
        assert_eq!(reloaded.all().await.unwrap(), vec![4821, 4822]);
    }

    #[tokio::test]
    async fn test_record_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let ledger = JsonLedger::open(&path).await.unwrap();
        ledger.record(7).await.unwrap();
        ledger.record(7).await.unwrap();

        let on_disk: Vec<u64> =
            serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(on_disk, vec![7]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        assert!(JsonLedger::open(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("ledger.json");

        let ledger = JsonLedger::open(&path).await.unwrap();
        ledger.record(1).await.unwrap();
        assert!(path.exists());
    }
}
