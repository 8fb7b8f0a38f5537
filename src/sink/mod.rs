//! The Result Sink family: external collaborators that consume dispatched,
//! JSON-encoded execution results.

mod function_sink;
mod http_sink;
mod jwt_sink;

pub use function_sink::FunctionSink;
pub use http_sink::HttpResultSink;
pub use jwt_sink::JwtResultSink;

use async_trait::async_trait;

use crate::error::SinkResult;

/// Consumes one JSON-encoded result per call. Implementations may perform
/// network I/O on the caller's task; the queue core treats latency here as
/// back-pressure and does not retry on failure.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn accept(&self, json_text: &str) -> SinkResult<()>;
}
