//! Database adapter contract and an in-memory reference implementation.
//!
//! `InMemoryDatabaseAdapter` backs "databases" with a nested `HashMap` under
//! a `tokio::sync::RwLock`, supporting a minimal `INSERT INTO` / `SELECT *`
//! surface sufficient to exercise `execute_query` end to end. A real SQL
//! driver (connection pooling, prepared statements, migrations) is out of
//! scope for this crate.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::{DbError, DbResult};

/// Rows returned from [`DatabaseAdapter::execute_query`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRows {
    pub rows_affected: u64,
    pub rows: Vec<serde_json::Value>,
}

/// The database adapter contract the queue's command specialization dispatches to.
///
/// Exactly one [`DatabaseAdapter`] is shared across payload invocations by the
/// Result Dispatch Hook (see [`crate::command::ExecutionParams`]); because the
/// Executor task is the sole caller, implementations need not be re-entrant.
#[async_trait]
pub trait DatabaseAdapter: Send + Sync {
    async fn create_database(&self, name: &str) -> DbResult<()>;

    /// Fails with [`DbError::AlreadyConnected`] if already connected to any database.
    async fn connect_to_database(&self, name: &str) -> DbResult<()>;

    async fn execute_query(&self, sql: &str, params: &[serde_json::Value]) -> DbResult<QueryRows>;

    /// Fails with [`DbError::NotConnected`] if not currently connected.
    async fn disconnect_from_database(&self) -> DbResult<()>;
}

type Table = Vec<serde_json::Value>;
type Database = HashMap<String, Table>;

struct State {
    databases: HashMap<String, Database>,
    connected: Option<String>,
}

/// In-memory [`DatabaseAdapter`] reference implementation.
///
/// Understands two SQL shapes well enough to round-trip through tests:
/// `INSERT INTO <table> VALUES (<json...>)` and `SELECT * FROM <table>`.
/// Anything else is accepted as a no-op query returning zero rows, matching
/// this lineage's "mock connector" convention of demonstrating the contract
/// rather than a full SQL engine.
pub struct InMemoryDatabaseAdapter {
    state: RwLock<State>,
}

impl Default for InMemoryDatabaseAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDatabaseAdapter {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                databases: HashMap::new(),
                connected: None,
            }),
        }
    }
}

#[async_trait]
impl DatabaseAdapter for InMemoryDatabaseAdapter {
    #[instrument(skip(self))]
    async fn create_database(&self, name: &str) -> DbResult<()> {
        let mut state = self.state.write().await;
        if state.databases.contains_key(name) {
            return Err(DbError::AlreadyExists(name.to_string()));
        }
        state.databases.insert(name.to_string(), HashMap::new());
        debug!(database = name, "created database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn connect_to_database(&self, name: &str) -> DbResult<()> {
        let mut state = self.state.write().await;
        if let Some(existing) = state.connected.clone() {
            return Err(DbError::AlreadyConnected(existing));
        }
        if !state.databases.contains_key(name) {
            return Err(DbError::NoSuchDatabase(name.to_string()));
        }
        state.connected = Some(name.to_string());
        debug!(database = name, "connected");
        Ok(())
    }

    #[instrument(skip(self, params))]
    async fn execute_query(&self, sql: &str, params: &[serde_json::Value]) -> DbResult<QueryRows> {
        let mut state = self.state.write().await;
        let db_name = state.connected.clone().ok_or(DbError::NotConnected)?;
        let db = state
            .databases
            .get_mut(&db_name)
            .ok_or_else(|| DbError::NoSuchDatabase(db_name.clone()))?;

        let trimmed = sql.trim();
        if let Some(table) = parse_insert_table(trimmed) {
            let rows = db.entry(table).or_insert_with(Vec::new);
            rows.extend(params.iter().cloned());
            return Ok(QueryRows { rows_affected: params.len() as u64, rows: Vec::new() });
        }
        if let Some(table) = parse_select_table(trimmed) {
            let rows = db.get(&table).cloned().unwrap_or_default();
            return Ok(QueryRows { rows_affected: rows.len() as u64, rows });
        }

        Ok(QueryRows::default())
    }

    #[instrument(skip(self))]
    async fn disconnect_from_database(&self) -> DbResult<()> {
        let mut state = self.state.write().await;
        if state.connected.take().is_none() {
            return Err(DbError::NotConnected);
        }
        debug!("disconnected");
        Ok(())
    }
}

fn parse_insert_table(sql: &str) -> Option<String> {
    let upper = sql.to_ascii_uppercase();
    let prefix = "INSERT INTO ";
    let idx = upper.find(prefix)?;
    let rest = &sql[idx + prefix.len()..];
    rest.split_whitespace().next().map(str::to_string)
}

fn parse_select_table(sql: &str) -> Option<String> {
    let upper = sql.to_ascii_uppercase();
    let from_idx = upper.find("FROM ")?;
    if !upper.trim_start().starts_with("SELECT") {
        return None;
    }
    let rest = &sql[from_idx + "FROM ".len()..];
    rest.split_whitespace().next().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn connect_fails_when_already_connected() {
        let adapter = InMemoryDatabaseAdapter::new();
        adapter.create_database("a").await.unwrap();
        adapter.create_database("b").await.unwrap();
        adapter.connect_to_database("a").await.unwrap();

        let err = adapter.connect_to_database("b").await.unwrap_err();
        assert!(matches!(err, DbError::AlreadyConnected(name) if name == "a"));
    }

    #[tokio::test]
    async fn disconnect_fails_when_not_connected() {
        let adapter = InMemoryDatabaseAdapter::new();
        let err = adapter.disconnect_from_database().await.unwrap_err();
        assert!(matches!(err, DbError::NotConnected));
    }

    #[tokio::test]
    async fn insert_then_select_round_trips_rows() {
        let adapter = InMemoryDatabaseAdapter::new();
        adapter.create_database("shop").await.unwrap();
        adapter.connect_to_database("shop").await.unwrap();

        adapter
            .execute_query("INSERT INTO orders VALUES (?)", &[json!({"id": 1})])
            .await
            .unwrap();

        let rows = adapter.execute_query("SELECT * FROM orders", &[]).await.unwrap();
        assert_eq!(rows.rows, vec![json!({"id": 1})]);
    }
}
