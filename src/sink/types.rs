use thiserror::Error;

/// Errors that can occur while writing to the store.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The database rejected the statement or the connection failed.
    #[error("database write failed")]
    Database(#[from] sqlx::Error),

    /// An update addressed a row that does not exist.
    #[error("no stored row matches md5 {0}")]
    NoMatch(String),
}
