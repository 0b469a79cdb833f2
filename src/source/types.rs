use thiserror::Error;

/// Errors raised while setting up an event source.
///
/// Read-side failures never appear here: a bad message is logged and
/// skipped inside the read loop.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Consumer construction or topic subscription failed.
    #[error("kafka consumer setup failed")]
    Kafka(#[from] rdkafka::error::KafkaError),
}
