//! The payload contract and the concrete command/result taxonomy riding on top of it.

use std::error::Error as StdError;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::connectors::DatabaseAdapter;
use crate::error::DbResult;

/// Opaque failure type a payload may return from [`ExecutablePayload::invoke`].
pub type PayloadError = Box<dyn StdError + Send + Sync>;

/// The named-parameter bundle a Result Dispatch Hook builds once per execution
/// and passes into [`ExecutablePayload::invoke`].
///
/// Specializations are free to carry whatever a payload family needs; this
/// crate's specialization carries a handle to the shared database adapter.
#[derive(Clone)]
pub struct ExecutionParams {
    pub adapter: Arc<dyn DatabaseAdapter>,
}

/// A unit of deferred work, opaque to the queue core.
///
/// The core never inspects the returned value beyond handing it to the
/// Result Dispatch Hook; it does inspect whether `invoke` returned `Err`, in
/// which case the executor synthesizes a failure result (see the crate's
/// error handling notes).
#[async_trait]
pub trait ExecutablePayload: Send + Sync + 'static {
    async fn invoke(&self, params: &ExecutionParams) -> Result<serde_json::Value, PayloadError>;
}

#[async_trait]
impl ExecutablePayload for Box<dyn ExecutablePayload> {
    async fn invoke(&self, params: &ExecutionParams) -> Result<serde_json::Value, PayloadError> {
        (**self).invoke(params).await
    }
}

/// Tag identifying which database operation a [`DbCommand`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DbCommandTag {
    CreateDatabase,
    ConnectToDatabase,
    ExecuteQuery,
    DisconnectFromDatabase,
}

/// A single database-style command, executable against a [`DatabaseAdapter`].
#[derive(Debug, Clone)]
pub enum DbCommand {
    CreateDatabase { name: String },
    ConnectToDatabase { name: String },
    ExecuteQuery { sql: String, params: Vec<serde_json::Value> },
    DisconnectFromDatabase,
}

impl DbCommand {
    fn tag(&self) -> DbCommandTag {
        match self {
            Self::CreateDatabase { .. } => DbCommandTag::CreateDatabase,
            Self::ConnectToDatabase { .. } => DbCommandTag::ConnectToDatabase,
            Self::ExecuteQuery { .. } => DbCommandTag::ExecuteQuery,
            Self::DisconnectFromDatabase => DbCommandTag::DisconnectFromDatabase,
        }
    }
}

#[async_trait]
impl ExecutablePayload for DbCommand {
    /// Never returns `Err`: adapter failures are caught here and folded into
    /// a tagged [`DbCommandResult::failure`], the same way the original's
    /// command classes catch internally and return a failure result rather
    /// than raise (see `database_implementation.py`'s `Create*`/`Execute*`
    /// commands, each wrapping its adapter call in `try`/`except`). This
    /// keeps the `"command"` tag on every result, success or failure, which
    /// a generic `ResultDispatchHook::failure_result` has no way to supply.
    async fn invoke(&self, params: &ExecutionParams) -> Result<serde_json::Value, PayloadError> {
        let tag = self.tag();
        let result = match self.execute(params).await {
            Ok(data) => DbCommandResult::success(tag, data),
            Err(err) => DbCommandResult::failure(tag, err.to_string()),
        };
        Ok(result.to_json())
    }
}

impl DbCommand {
    async fn execute(&self, params: &ExecutionParams) -> DbResult<serde_json::Value> {
        Ok(match self {
            Self::CreateDatabase { name } => {
                params.adapter.create_database(name).await?;
                json!({ "name": name })
            }
            Self::ConnectToDatabase { name } => {
                params.adapter.connect_to_database(name).await?;
                json!({ "name": name })
            }
            Self::ExecuteQuery { sql, params: query_params } => {
                let rows = params.adapter.execute_query(sql, query_params).await?;
                json!({ "rows_affected": rows.rows_affected, "rows": rows.rows })
            }
            Self::DisconnectFromDatabase => {
                params.adapter.disconnect_from_database().await?;
                json!({})
            }
        })
    }
}

/// The tagged JSON shape every command result in this crate carries:
/// `{"version": 1, "is_successful": bool, "command": <tag>, "data": <value>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbCommandResult {
    pub version: u8,
    pub is_successful: bool,
    pub command: DbCommandTag,
    pub data: serde_json::Value,
}

impl DbCommandResult {
    pub fn success(command: DbCommandTag, data: serde_json::Value) -> Self {
        Self { version: 1, is_successful: true, command, data }
    }

    pub fn failure(command: DbCommandTag, message: impl Into<String>) -> Self {
        Self {
            version: 1,
            is_successful: false,
            command,
            data: json!({ "error": message.into() }),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            json!({ "version": 1, "is_successful": false, "data": { "error": "encoding failure" } })
        })
    }
}

/// A payload wrapping an ordered list of [`DbCommand`]s, executed sequentially.
///
/// Its JSON form is `{"version": 1, "is_successful": bool, "children": [...]}`,
/// where `is_successful` is the conjunction of every child's own flag.
#[derive(Debug, Clone)]
pub struct CompositeCommand {
    pub children: Vec<DbCommand>,
}

impl CompositeCommand {
    pub fn new(children: Vec<DbCommand>) -> Self {
        Self { children }
    }
}

#[async_trait]
impl ExecutablePayload for CompositeCommand {
    /// Stops at the first failing child, mirroring the original's guarded
    /// `if _is_successful:` sequencing in `ExecuteQueryDatabaseCommand.execute`
    /// (connect, query, disconnect): once a step fails, later steps that
    /// depend on it — e.g. disconnecting after a connection never succeeded —
    /// are not attempted.
    async fn invoke(&self, params: &ExecutionParams) -> Result<serde_json::Value, PayloadError> {
        let mut child_results = Vec::with_capacity(self.children.len());
        let mut all_successful = true;

        for child in &self.children {
            let result = match child.invoke(params).await {
                Ok(value) => value,
                Err(err) => DbCommandResult::failure(child.tag(), err.to_string()).to_json(),
            };
            let child_succeeded = result.get("is_successful").and_then(|v| v.as_bool()).unwrap_or(false);
            child_results.push(result);
            if !child_succeeded {
                all_successful = false;
                break;
            }
        }

        Ok(json!({
            "version": 1,
            "is_successful": all_successful,
            "children": child_results,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::InMemoryDatabaseAdapter;

    fn params() -> ExecutionParams {
        ExecutionParams { adapter: Arc::new(InMemoryDatabaseAdapter::new()) }
    }

    #[tokio::test]
    async fn create_and_connect_round_trip() {
        let params = params();
        let create = DbCommand::CreateDatabase { name: "accounts".into() };
        let result = create.invoke(&params).await.expect("create should succeed");
        assert_eq!(result["is_successful"], json!(true));

        let connect = DbCommand::ConnectToDatabase { name: "accounts".into() };
        let result = connect.invoke(&params).await.expect("connect should succeed");
        assert_eq!(result["is_successful"], json!(true));
    }

    #[tokio::test]
    async fn composite_command_reports_conjunction() {
        let params = params();
        let composite = CompositeCommand::new(vec![
            DbCommand::CreateDatabase { name: "widgets".into() },
            DbCommand::ConnectToDatabase { name: "widgets".into() },
            DbCommand::ConnectToDatabase { name: "widgets".into() }, // already connected -> fails
        ]);

        let result = composite.invoke(&params).await.expect("invoke itself never errors");
        assert_eq!(result["is_successful"], json!(false));
        assert_eq!(result["children"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn composite_command_stops_after_first_failure() {
        let params = params();
        // Connecting to a database that was never created fails, so the
        // trailing disconnect must never run.
        let composite = CompositeCommand::new(vec![
            DbCommand::ConnectToDatabase { name: "ghost".into() },
            DbCommand::DisconnectFromDatabase,
        ]);

        let result = composite.invoke(&params).await.expect("invoke itself never errors");
        assert_eq!(result["is_successful"], json!(false));
        let children = result["children"].as_array().unwrap();
        assert_eq!(children.len(), 1, "the disconnect step must not have been attempted");
        assert_eq!(children[0]["command"], json!("connect_to_database"));
    }
}
