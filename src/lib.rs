//! # feed-archiver
//!
//! A service that archives feed-item events from Kafka into PostgreSQL.
//!
//! ## Features
//!
//! - **Batched inserts** with a dual trigger: flush at a size threshold or
//!   on a fixed interval, whichever comes first
//! - **Update routing**: events flagged as mutations bypass the batch and
//!   update the stored row addressed by its content hash
//! - **In-batch dedup** by link, last arrival wins
//! - **Upsert semantics** tolerant of at-least-once delivery
//! - **Backpressure** via a bounded channel between consumer and batcher
//! - **Graceful shutdown**: cancellation drains the buffer before exit
//!
//! ## Modules
//!
//! - [`model`] - The `Item` flowing through the pipeline
//! - [`source`] - Kafka event source abstraction
//! - [`batcher`] - Accumulation and flush state machine
//! - [`sink`] - PostgreSQL persistence with dedup + upsert
//! - [`app`] - Pipeline wiring and lifecycle
//! - [`config`] - Environment-backed configuration

pub mod app;
pub mod batcher;
pub mod config;
pub mod model;
pub mod sink;
pub mod source;
