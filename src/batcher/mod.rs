pub mod batcher;
pub mod config;

pub use batcher::Batcher;
pub use config::{Config, ConfigBuilder};
