use std::collections::HashSet;

use async_trait::async_trait;
use portada_core::{PublicationLedger, Result};
use tokio::sync::RwLock;

/// Non-persistent ledger for tests and dry runs. Same membership
/// semantics as the file backend, nothing survives the process.
#[derive(Default)]
pub struct MemoryLedger {
    ids: RwLock<HashSet<u64>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PublicationLedger for MemoryLedger {
    async fn contains(&self, id: u64) -> Result<bool> {
        Ok(self.ids.read().await.contains(&id))
    }

    async fn record(&self, id: u64) -> Result<()> {
        self.ids.write().await.insert(id);
        Ok(())
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
    async fn test_membership() {
        let ledger = MemoryLedger::new();
        assert!(!ledger.contains(1).await.unwrap());
        ledger.record(1).await.unwrap();
        ledger.record(1).await.unwrap();
        assert!(ledger.contains(1).await.unwrap());
        assert_eq!(ledger.all().await.unwrap(), vec![1]);
    }
}
