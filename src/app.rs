use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::batcher::{self, Batcher};
use crate::sink::FeedSink;
use crate::source::{EventSource, SourceError};

/// Errors that abort the pipeline before it starts consuming.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("event source setup failed")]
    Source(#[from] SourceError),
}

/// The assembled pipeline: event source feeding the batcher feeding the
/// sink. Constructed once at startup with its dependencies injected, so
/// tests can swap in fake sources and sinks.
pub struct App<E, S> {
    source: E,
    batcher: Batcher<S>,
}

impl<E, S> App<E, S>
where
    E: EventSource,
    S: FeedSink,
{
    pub fn new(source: E, sink: Arc<S>, config: batcher::Config) -> Self {
        Self {
            source,
            batcher: Batcher::new(config, sink),
        }
    }

    /// Runs the pipeline until the source's stream ends.
    ///
    /// Cancelling the token stops the source, which closes its channel;
    /// the batcher then performs its final flush and returns. Nothing
    /// buffered is lost on a clean shutdown, and a flush in progress is
    /// never aborted mid-write.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<(), AppError> {
        let items = self.source.subscribe(cancel.clone()).await?;
        info!("pipeline started");

        self.batcher.run(items).await;

        info!("pipeline stopped");
        Ok(())
    }
}
