use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::model::Item;

use super::types::SourceError;

/// A lazy, cancellable stream of feed items.
///
/// `subscribe` starts the source's read loop and returns the consuming
/// end of a bounded channel. The channel closing is the end-of-stream
/// signal: it means cancellation was observed or the upstream closed,
/// and no further items will arrive.
///
/// A single unreadable or undecodable message must be skipped, never
/// propagated; only setup failures surface here.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn subscribe(
        &self,
        cancel: CancellationToken,
    ) -> Result<mpsc::Receiver<Item>, SourceError>;
}
