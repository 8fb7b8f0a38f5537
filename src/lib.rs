//! A single-consumer, delay-aware work queue for dispatching database-style
//! commands against a pluggable database adapter, with every result
//! delivered through a pluggable result sink.
//!
//! The hard engineering lives in [`queue`]: front/end insertion, time-based
//! deferral, a drain barrier, and an orderly shutdown protocol. Everything
//! else in this crate — [`command`], [`connectors`], [`sink`], [`db_queue`] —
//! is a concrete, runnable specialization built on top of it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod command;
pub mod config;
pub mod connectors;
pub mod crypto;
pub mod db_queue;
pub mod error;
pub mod queue;
pub mod sink;
pub mod telemetry;

pub use command::{CompositeCommand, DbCommand, DbCommandResult, DbCommandTag, ExecutablePayload, ExecutionParams};
pub use config::{HttpSinkConfig, JwtSinkConfig, QueueConfig};
pub use connectors::{DatabaseAdapter, InMemoryDatabaseAdapter, QueryRows};
pub use db_queue::DbCommandQueue;
pub use error::{DbError, QueueError, QueueResult, SinkError};
pub use queue::{ExecutableQueue, QueuePhase, ResultDispatchHook};
pub use sink::{FunctionSink, HttpResultSink, JwtResultSink, ResultSink};
pub use telemetry::init_tracing;
