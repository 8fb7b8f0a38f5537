//! The two-semaphore rendezvous behind `wait_until_empty`.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Semaphore;

use crate::error::QueueError;

/// Implements the drain handshake: a caller parks until the Executor
/// observes the Ready Queue empty with nothing in flight, then both sides
/// release in lockstep.
///
/// Two semaphores, both starting at zero permits. `drain_signal` carries the
/// Executor's "queue is empty now" notice to the waiter; `drain_ack` carries
/// the waiter's "go ahead, I've seen it" back. `is_draining` is the single
/// slot recording whether a drain is in progress; a second concurrent caller
/// is rejected rather than racing the handshake.
pub struct DrainBarrier {
    is_draining: AtomicBool,
    drain_signal: Semaphore,
    drain_ack: Semaphore,
}

impl Default for DrainBarrier {
    fn default() -> Self {
        Self {
            is_draining: AtomicBool::new(false),
            drain_signal: Semaphore::new(0),
            drain_ack: Semaphore::new(0),
        }
    }
}

impl DrainBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_draining(&self) -> bool {
        self.is_draining.load(Ordering::Acquire)
    }

    /// Caller side of the handshake. Parks until the Executor signals that
    /// the Ready Queue is empty and nothing is in flight.
    pub async fn wait_until_empty(&self) -> Result<(), QueueError> {
        if self.is_draining.swap(true, Ordering::AcqRel) {
            return Err(QueueError::DrainInProgress);
        }

        // Wait for the executor's "queue is empty" notice. The semaphore is
        // never closed, so a permit always eventually arrives.
        let permit = self.drain_signal.acquire().await.map_err(|_| QueueError::DrainInProgress)?;
        permit.forget();

        self.is_draining.store(false, Ordering::Release);
        self.drain_ack.add_permits(1);
        Ok(())
    }

    /// Executor side of the handshake: called once the Ready Queue has been
    /// observed empty while a drain is pending.
    pub async fn signal_and_wait_ack(&self) {
        self.drain_signal.add_permits(1);
        if let Ok(permit) = self.drain_ack.acquire().await {
            permit.forget();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn concurrent_drain_is_rejected() {
        let barrier = Arc::new(DrainBarrier::new());
        let waiter = barrier.clone();
        let handle = tokio::spawn(async move { waiter.wait_until_empty().await });

        // Give the first waiter a chance to claim the slot.
        tokio::time::sleep(Duration::from_millis(20)).await;
        let err = barrier.wait_until_empty().await.unwrap_err();
        assert!(matches!(err, QueueError::DrainInProgress));

        barrier.signal_and_wait_ack().await;
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn handshake_releases_both_sides() {
        let barrier = Arc::new(DrainBarrier::new());
        let waiter = barrier.clone();
        let handle = tokio::spawn(async move { waiter.wait_until_empty().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(barrier.is_draining());
        barrier.signal_and_wait_ack().await;

        handle.await.unwrap().unwrap();
        assert!(!barrier.is_draining());
    }
}
