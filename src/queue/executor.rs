//! The Executor task: the sole consumer that pops ready payloads, invokes
//! them, and forwards results to the Result Dispatch Hook.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::command::ExecutablePayload;
use crate::error::QueueError;

use super::dispatch::ResultDispatchHook;
use super::facade::Shared;

/// Runs until the façade is disposed. Never holds the façade mutex across an
/// `.await` point: it pops (or doesn't) inside a short synchronous block,
/// then releases the lock before invoking anything.
pub(crate) async fn run<P, H>(shared: Arc<Shared<P, H>>)
where
    P: ExecutablePayload,
    H: ResultDispatchHook + 'static,
{
    loop {
        if shared.is_disposed() {
            debug!("executor exiting: queue disposed");
            return;
        }

        let popped = { shared.ready.lock().pop_for_execution() };

        match popped {
            Some(payload) => execute_one(&shared, payload).await,
            None => {
                let should_drain = shared.drain.is_draining() && shared.ready.lock().is_empty();
                if should_drain {
                    shared.drain.signal_and_wait_ack().await;
                } else {
                    sleep(shared.poll_interval).await;
                }
            }
        }
    }
}

#[instrument(skip_all, fields(execution_id = %Uuid::new_v4()))]
async fn execute_one<P, H>(shared: &Arc<Shared<P, H>>, payload: P)
where
    P: ExecutablePayload,
    H: ResultDispatchHook + 'static,
{
    let params = shared.hook.execution_parameters();
    let outcome = AssertUnwindSafe(payload.invoke(&params)).catch_unwind().await;

    let result = match outcome {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            warn!(error = %err, "payload invocation returned an error");
            shared
                .hook
                .failure_result(&QueueError::PayloadFailure(err.to_string()))
        }
        Err(_panic) => {
            warn!("payload invocation panicked");
            shared
                .hook
                .failure_result(&QueueError::PayloadFailure("payload panicked".to_string()))
        }
    };

    shared.hook.handle_result(result).await;
}
