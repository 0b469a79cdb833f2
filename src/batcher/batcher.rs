use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::model::Item;
use crate::sink::FeedSink;

use super::config::Config;

/// Accumulates insert-candidate items and flushes them to the sink.
///
/// The batcher owns its buffer exclusively: the `select!` over the item
/// channel and the interval tick is its only suspension point, so an
/// append never interleaves with a flush.
///
/// Items flagged `changed` bypass the buffer entirely and go to the
/// sink's single-update operation. A flush happens when the buffer
/// reaches `batch_size`, on an interval tick with a non-empty buffer,
/// or once more when the channel closes. The interval restarts only at
/// flush time, never per item, so the latency bound holds under load.
///
/// Sink failures are logged and the attempted batch is dropped; the
/// buffer restarts empty either way and the loop keeps running.
pub struct Batcher<S> {
    config: Config,
    sink: Arc<S>,
}

impl<S> Clone for Batcher<S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            sink: self.sink.clone(),
        }
    }
}

impl<S> Batcher<S>
where
    S: FeedSink,
{
    pub fn new(config: Config, sink: Arc<S>) -> Self {
        Self { config, sink }
    }

    /// Consumes items until the channel closes, then drains the buffer.
    pub async fn run(&self, mut items: mpsc::Receiver<Item>) {
        let mut buffer: Vec<Item> = Vec::with_capacity(self.config.batch_size());
        // interval() would tick immediately; the first time-triggered
        // flush must not happen before one full interval has elapsed.
        let period = self.config.flush_interval();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !buffer.is_empty() {
                        debug!(len = buffer.len(), "time-triggered flush");
                        self.flush(&mut buffer).await;
                    }
                }

                item = items.recv() => {
                    match item {
                        Some(item) if item.changed => {
                            if let Err(err) = self.sink.update_by_hash(&item).await {
                                error!(md5 = %item.md5, error = ?err, "update failed, item dropped");
                            }
                        }
                        Some(item) => {
                            buffer.push(item);
                            if buffer.len() >= self.config.batch_size() {
                                debug!(len = buffer.len(), "size-triggered flush");
                                self.flush(&mut buffer).await;
                                ticker.reset();
                            }
                        }
                        None => {
                            if !buffer.is_empty() {
                                debug!(len = buffer.len(), "final flush on end-of-stream");
                                self.flush(&mut buffer).await;
                            }
                            info!("batcher drained");
                            return;
                        }
                    }
                }
            }
        }
    }

    async fn flush(&self, buffer: &mut Vec<Item>) {
        if let Err(err) = self.sink.upsert_batch(buffer).await {
            // Debug form keeps the underlying database error visible;
            // Display of the enum alone hides the cause.
            error!(len = buffer.len(), error = ?err, "batch upsert failed, batch dropped");
        }
        buffer.clear();
    }
}
