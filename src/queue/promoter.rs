//! The Delay Promoter task: periodically moves due entries from the two
//! Delayed Sequences into the Ready Queue.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::sleep;
use tracing::debug;

use crate::command::ExecutablePayload;

use super::dispatch::ResultDispatchHook;
use super::facade::Shared;

/// Runs until the façade is disposed. Entries still pending in either
/// Delayed Sequence at disposal time are dropped, not promoted.
pub(crate) async fn run<P, H>(shared: Arc<Shared<P, H>>)
where
    P: ExecutablePayload,
    H: ResultDispatchHook + 'static,
{
    loop {
        sleep(shared.poll_interval).await;

        if shared.is_disposed() {
            debug!("delay promoter exiting: queue disposed");
            return;
        }

        let now = Utc::now();

        while let Some(entry) = shared.front_bound.try_pop_due(now) {
            shared.ready.lock().push_front(entry.payload);
        }
        while let Some(entry) = shared.end_bound.try_pop_due(now) {
            shared.ready.lock().push_back(entry.payload);
        }
    }
}
