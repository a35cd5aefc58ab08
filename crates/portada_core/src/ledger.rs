use async_trait::async_trait;

use crate::Result;

/// Persisted set of already-published article ids, used for duplicate
/// suppression.
///
/// `record` must be durable before it returns. Ids are recorded at most
/// once, and only after a confirmed primary upload. The set grows
/// monotonically; nothing prunes it. Single writer only.
#[async_trait]
pub trait PublicationLedger: Send + Sync {
    /// Membership test for an article id.
    async fn contains(&self, id: u64) -> Result<bool>;

    /// Add an id to the ledger and persist it. Recording an id that is
    /// already present is a no-op.
    async fn record(&self, id: u64) -> Result<()>;

    /// All recorded ids, ascending.
    async fn all(&self) -> Result<Vec<u64>>;
}
