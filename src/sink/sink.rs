use async_trait::async_trait;

use crate::model::Item;

use super::types::SinkError;

/// Durable storage for feed items.
///
/// Both operations are idempotent under repeated delivery of the same
/// item, which is what makes the at-least-once source safe: re-applying
/// an identical upsert or update leaves the stored state unchanged.
#[async_trait]
pub trait FeedSink: Send + Sync {
    /// Persists a batch of insert candidates in one atomic write.
    ///
    /// Items sharing a `link` are collapsed to the last arrival before
    /// the write. Rows that already exist (same `link`) get their
    /// display fields refreshed; identity and creation fields stay
    /// untouched. An empty batch is a successful no-op. The batch
    /// commits or fails as a whole.
    async fn upsert_batch(&self, items: &[Item]) -> Result<(), SinkError>;

    /// Overwrites the display fields of the stored row whose `md5`
    /// matches the item's. A missing row is a reported error.
    async fn update_by_hash(&self, item: &Item) -> Result<(), SinkError>;
}
