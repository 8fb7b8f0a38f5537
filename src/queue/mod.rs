//! The Executable Queue Core: a single-consumer, delay-aware work queue with
//! front/end insertion, time-based deferral, a drain barrier, and an orderly
//! shutdown protocol.

mod delayed_sequence;
mod dispatch;
mod drain;
mod executor;
mod facade;
mod promoter;
mod ready_queue;

pub use delayed_sequence::{DelayedEntry, DelayedSequence};
pub use dispatch::ResultDispatchHook;
pub use drain::DrainBarrier;
pub use facade::{ExecutableQueue, QueuePhase};
pub use ready_queue::ReadyQueue;
