//! The database queue specialization: wires [`crate::queue::ExecutableQueue`]
//! to a [`DatabaseAdapter`] and a [`ResultSink`] through the Result Dispatch Hook.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde_json::Value;
use tracing::warn;

use crate::command::{ExecutablePayload, ExecutionParams};
use crate::config::QueueConfig;
use crate::connectors::DatabaseAdapter;
use crate::error::{QueueError, QueueResult};
use crate::queue::{ExecutableQueue, QueuePhase, ResultDispatchHook};
use crate::sink::ResultSink;

/// The payload type `DbCommandQueue` actually queues.
///
/// Widened from the bare `DbCommand` enum to `Box<dyn ExecutablePayload>` so
/// both single [`crate::command::DbCommand`]s and
/// [`crate::command::CompositeCommand`]s can be submitted through the same
/// façade without a wrapper enum.
pub type BoxedCommand = Box<dyn ExecutablePayload>;

struct DbHook {
    adapter: Arc<dyn DatabaseAdapter>,
    sink: Arc<dyn ResultSink>,
}

#[async_trait]
impl ResultDispatchHook for DbHook {
    fn execution_parameters(&self) -> ExecutionParams {
        ExecutionParams { adapter: self.adapter.clone() }
    }

    async fn handle_result(&self, result: Value) {
        let json_text = result.to_string();
        if let Err(err) = self.sink.accept(&json_text).await {
            warn!(error = %err, "result sink rejected a dispatched result");
        }
    }

    fn failure_result(&self, error: &QueueError) -> Value {
        serde_json::json!({
            "version": 1,
            "is_successful": false,
            "data": { "error": error.to_string() },
        })
    }
}

/// The public entry point for queueing database-style commands.
pub struct DbCommandQueue {
    inner: ExecutableQueue<BoxedCommand, DbHook>,
}

impl DbCommandQueue {
    pub fn new(adapter: Arc<dyn DatabaseAdapter>, sink: Arc<dyn ResultSink>, config: &QueueConfig) -> Self {
        let hook = DbHook { adapter, sink };
        Self { inner: ExecutableQueue::new(hook, config) }
    }

    pub fn push_front_now(&self, command: impl ExecutablePayload) -> QueueResult<()> {
        self.inner.push_front_now(Box::new(command))
    }

    pub fn push_back_now(&self, command: impl ExecutablePayload) -> QueueResult<()> {
        self.inner.push_back_now(Box::new(command))
    }

    pub fn push_front_at(&self, command: impl ExecutablePayload, ready_at: DateTime<Utc>) -> QueueResult<()> {
        self.inner.push_front_at(Box::new(command), ready_at)
    }

    pub fn push_back_at(&self, command: impl ExecutablePayload, ready_at: DateTime<Utc>) -> QueueResult<()> {
        self.inner.push_back_at(Box::new(command), ready_at)
    }

    pub fn push_front_after(&self, command: impl ExecutablePayload, delay: ChronoDuration) -> QueueResult<()> {
        self.inner.push_front_after(Box::new(command), delay)
    }

    pub fn push_back_after(&self, command: impl ExecutablePayload, delay: ChronoDuration) -> QueueResult<()> {
        self.inner.push_back_after(Box::new(command), delay)
    }

    pub async fn wait_until_empty(&self) -> QueueResult<()> {
        self.inner.wait_until_empty().await
    }

    pub fn phase(&self) -> QueuePhase {
        self.inner.phase()
    }

    pub async fn dispose(&self) {
        self.inner.dispose().await
    }
}
