//! The Queue Façade: the public API combining the Ready Queue, the two
//! Delayed Sequences, the Drain Barrier, and the Executor/Delay Promoter
//! background tasks into one handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::command::ExecutablePayload;
use crate::config::QueueConfig;
use crate::error::{QueueError, QueueResult};

use super::delayed_sequence::{DelayedEntry, DelayedSequence};
use super::dispatch::ResultDispatchHook;
use super::drain::DrainBarrier;
use super::executor;
use super::promoter;
use super::ready_queue::ReadyQueue;

/// The current lifecycle phase of a [`ExecutableQueue`], exposed for
/// introspection and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueuePhase {
    Active,
    Draining,
    Disposed,
}

/// State shared between the façade handle and its two background tasks.
pub(crate) struct Shared<P, H> {
    pub(crate) ready: Mutex<ReadyQueue<P>>,
    pub(crate) front_bound: DelayedSequence<P>,
    pub(crate) end_bound: DelayedSequence<P>,
    pub(crate) drain: DrainBarrier,
    pub(crate) disposed: AtomicBool,
    pub(crate) hook: H,
    pub(crate) poll_interval: StdDuration,
}

impl<P, H> Shared<P, H> {
    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

struct BackgroundTasks {
    executor: JoinHandle<()>,
    promoter: JoinHandle<()>,
}

/// A single-consumer, delay-aware execution queue over payloads of type `P`,
/// dispatched through a [`ResultDispatchHook`] of type `H`.
///
/// Construction spawns one Executor task and one Delay Promoter task on the
/// ambient tokio runtime; both run until [`ExecutableQueue::dispose`].
pub struct ExecutableQueue<P, H>
where
    P: ExecutablePayload,
    H: ResultDispatchHook + 'static,
{
    shared: Arc<Shared<P, H>>,
    tasks: Mutex<Option<BackgroundTasks>>,
}

impl<P, H> ExecutableQueue<P, H>
where
    P: ExecutablePayload,
    H: ResultDispatchHook + 'static,
{
    pub fn new(hook: H, config: &QueueConfig) -> Self {
        let shared = Arc::new(Shared {
            ready: Mutex::new(ReadyQueue::new()),
            front_bound: DelayedSequence::new(),
            end_bound: DelayedSequence::new(),
            drain: DrainBarrier::new(),
            disposed: AtomicBool::new(false),
            hook,
            poll_interval: config.poll_interval,
        });

        let executor = tokio::spawn(executor::run(shared.clone()));
        let promoter = tokio::spawn(promoter::run(shared.clone()));

        Self {
            shared,
            tasks: Mutex::new(Some(BackgroundTasks { executor, promoter })),
        }
    }

    fn ensure_active(&self) -> QueueResult<()> {
        if self.shared.is_disposed() {
            Err(QueueError::Disposed)
        } else {
            Ok(())
        }
    }

    pub fn push_front_now(&self, payload: P) -> QueueResult<()> {
        self.ensure_active()?;
        self.shared.ready.lock().push_front(payload);
        Ok(())
    }

    pub fn push_back_now(&self, payload: P) -> QueueResult<()> {
        self.ensure_active()?;
        self.shared.ready.lock().push_back(payload);
        Ok(())
    }

    pub fn push_front_at(&self, payload: P, ready_at: DateTime<Utc>) -> QueueResult<()> {
        self.ensure_active()?;
        self.shared.front_bound.add(DelayedEntry::new(payload, ready_at));
        Ok(())
    }

    pub fn push_back_at(&self, payload: P, ready_at: DateTime<Utc>) -> QueueResult<()> {
        self.ensure_active()?;
        self.shared.end_bound.add(DelayedEntry::new(payload, ready_at));
        Ok(())
    }

    pub fn push_front_after(&self, payload: P, delay: ChronoDuration) -> QueueResult<()> {
        self.push_front_at(payload, Utc::now() + delay)
    }

    pub fn push_back_after(&self, payload: P, delay: ChronoDuration) -> QueueResult<()> {
        self.push_back_at(payload, Utc::now() + delay)
    }

    /// Blocks until the Ready Queue is observed empty with nothing in
    /// flight. Delayed entries not yet due are not awaited.
    #[instrument(skip(self))]
    pub async fn wait_until_empty(&self) -> QueueResult<()> {
        self.ensure_active()?;
        self.shared.drain.wait_until_empty().await
    }

    pub fn phase(&self) -> QueuePhase {
        if self.shared.is_disposed() {
            QueuePhase::Disposed
        } else if self.shared.drain.is_draining() {
            QueuePhase::Draining
        } else {
            QueuePhase::Active
        }
    }

    /// Transitions to `Disposed` and joins both background tasks. Idempotent:
    /// a second call observes no tasks left to join and returns immediately.
    #[instrument(skip(self))]
    pub async fn dispose(&self) {
        self.shared.disposed.store(true, Ordering::Release);
        let tasks = self.tasks.lock().take();
        if let Some(tasks) = tasks {
            let _ = tasks.executor.await;
            let _ = tasks.promoter.await;
        }
    }
}
