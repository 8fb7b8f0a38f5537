//! Error types for the execution queue and its collaborators.

use thiserror::Error;

/// Result type for façade-level queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Usage and lifecycle errors surfaced by the [`crate::queue::ExecutableQueue`] façade.
#[derive(Error, Debug, Clone)]
pub enum QueueError {
    /// Insertion was attempted after `dispose()` transitioned the queue to `Disposed`.
    #[error("queue is disposed")]
    Disposed,

    /// A second `wait_until_empty` call arrived while one was already parked.
    #[error("a drain is already in progress")]
    DrainInProgress,

    /// A payload panicked or its `invoke` returned an error during execution.
    #[error("payload execution failed: {0}")]
    PayloadFailure(String),

    /// Rejected by [`crate::config::QueueConfig::validate`].
    #[error("invalid queue configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for [`crate::connectors::DatabaseAdapter`] operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised by a [`crate::connectors::DatabaseAdapter`].
#[derive(Error, Debug, Clone)]
pub enum DbError {
    #[error("database {0:?} already exists")]
    AlreadyExists(String),

    #[error("not connected to a database")]
    NotConnected,

    #[error("already connected to database {0:?}")]
    AlreadyConnected(String),

    #[error("no such database {0:?}")]
    NoSuchDatabase(String),

    #[error("query error: {0}")]
    Query(String),
}

/// Result type for [`crate::sink::ResultSink`] operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Errors raised by a [`crate::sink::ResultSink`].
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink received a non-success HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("transport error delivering result: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to encode payload as JSON: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("in-process sink channel closed")]
    ChannelClosed,

    #[error("failed to sign JWT payload: {0}")]
    Signing(String),
}
