pub mod kafka;
pub mod source;
pub mod types;

pub use kafka::KafkaSource;
pub use source::EventSource;
pub use types::SourceError;
