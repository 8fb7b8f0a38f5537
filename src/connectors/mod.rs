//! External collaborators the queue core dispatches work to.
//!
//! The queue core only depends on the [`DatabaseAdapter`] trait; the
//! in-memory implementation shipped here exists so the crate is runnable and
//! testable end to end without a real database driver.

pub mod database;

pub use database::{DatabaseAdapter, InMemoryDatabaseAdapter, QueryRows};
