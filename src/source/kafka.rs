use async_trait::async_trait;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::ClientConfig;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::KafkaConfig;
use crate::model::Item;

use super::source::EventSource;
use super::types::SourceError;

/// Capacity of the channel between the read loop and the batcher.
/// A full channel blocks the consumer, which is the backpressure path.
const CHANNEL_CAPACITY: usize = 50;

/// Event source backed by a Kafka consumer group.
///
/// Each call to [`EventSource::subscribe`] creates a fresh
/// `StreamConsumer`, spawns the read loop and hands back the receiving
/// end of its output channel.
pub struct KafkaSource {
    config: KafkaConfig,
}

impl KafkaSource {
    pub fn new(config: KafkaConfig) -> Self {
        Self { config }
    }

    // Every exit path drops `tx`, closing the channel and signaling
    // end-of-stream to the batcher.
    async fn read_loop(
        consumer: StreamConsumer,
        topic: String,
        tx: mpsc::Sender<Item>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!(topic = %topic, "kafka reader stopped: cancellation");
                    return;
                }
                message = consumer.recv() => {
                    let item = match message {
                        Ok(message) => match decode(message.payload().unwrap_or_default()) {
                            Ok(item) => item,
                            Err(err) => {
                                warn!(topic = %topic, error = %err, "skipping undecodable message");
                                continue;
                            }
                        },
                        Err(err) => {
                            warn!(topic = %topic, error = %err, "kafka read failed");
                            continue;
                        }
                    };

                    // The channel may be full; keep honoring cancellation
                    // while blocked on the send.
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            info!(topic = %topic, "kafka reader stopped while forwarding");
                            return;
                        }
                        sent = tx.send(item) => {
                            if sent.is_err() {
                                info!(topic = %topic, "kafka reader stopped: receiver dropped");
                                return;
                            }
                        }
                    }
                }
            }
        }
    }
}

#[async_trait]
impl EventSource for KafkaSource {
    async fn subscribe(
        &self,
        cancel: CancellationToken,
    ) -> Result<mpsc::Receiver<Item>, SourceError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", self.config.brokers.join(","))
            .set("group.id", &self.config.group_id)
            .set("enable.partition.eof", "false")
            .set("auto.offset.reset", "earliest")
            .create()?;
        consumer.subscribe(&[self.config.topic.as_str()])?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let topic = self.config.topic.clone();
        tokio::spawn(Self::read_loop(consumer, topic, tx, cancel));

        Ok(rx)
    }
}

fn decode(payload: &[u8]) -> Result<Item, serde_json::Error> {
    serde_json::from_slice(payload)
}
