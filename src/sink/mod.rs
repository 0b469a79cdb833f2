pub mod postgres;
pub mod sink;
pub mod types;

pub use postgres::PostgresSink;
pub use sink::FeedSink;
pub use types::SinkError;

#[cfg(test)]
mod tests;
