//! The Result Dispatch Hook: the extension point a façade specialization
//! fulfills to supply per-invocation parameters and consume results.

use async_trait::async_trait;
use serde_json::Value;

use crate::command::ExecutionParams;
use crate::error::QueueError;

/// Fulfilled by a concrete specialization of the queue façade (in this
/// crate, [`crate::DbCommandQueue`]). The Executor calls these three methods
/// around every payload invocation; none of them may block the Executor for
/// longer than the work they describe, since there is only one of it.
#[async_trait]
pub trait ResultDispatchHook: Send + Sync {
    /// Builds the named-parameter bundle passed into `ExecutablePayload::invoke`.
    /// Called once per execution, immediately before invoking the payload.
    fn execution_parameters(&self) -> ExecutionParams;

    /// Forwards a successful (or synthesized-failure) result to the
    /// configured sink. Called once per execution, after the payload returns.
    async fn handle_result(&self, result: Value);

    /// Synthesizes a failure result when payload invocation itself panicked
    /// or returned an error, so it can flow through `handle_result` uniformly.
    fn failure_result(&self, error: &QueueError) -> Value;
}
