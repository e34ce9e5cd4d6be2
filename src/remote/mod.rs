//! Remote data service seam
//!
//! The hosted backend (tables, storage, auth, realtime) is reached only through
//! [`RemoteDataService`]. Rows are plain JSON objects so the same surface serves the settings
//! table and the content tables.

mod memory;
#[cfg(feature = "rest")]
mod rest;

pub use memory::InMemoryDataService;
#[cfg(feature = "rest")]
pub use rest::RestDataService;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::{Map, Value};

/// A table row
pub type Row = Map<String, Value>;

/// Stream of row-level change notifications for one table
pub type ChangeFeed = BoxStream<'static, ChangeEvent>;

/// Stream of identity transitions
pub type AuthFeed = BoxStream<'static, AuthEvent>;

/// Sort order for list reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

/// Equality predicate used by point reads, filtered lists and deletes
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether a row satisfies the predicate
    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.column) == Some(&self.value)
    }
}

/// Kind of row change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A row-level change on a table
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub table: String,
    pub kind: ChangeKind,
    pub row: Option<Row>,
}

/// Identity state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// Errors returned by the remote data service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("remote data service unavailable: {0}")]
    Unavailable(String),
}

/// Typed query/command surface of the hosted backend
#[async_trait]
pub trait RemoteDataService: Send + Sync {
    /// Read at most one row matching `filter`; `Ok(None)` when nothing matches
    async fn get_one(&self, table: &str, filter: &Filter) -> Result<Option<Row>, RemoteError>;

    /// Read rows, optionally filtered and ordered
    async fn list(
        &self,
        table: &str,
        filter: Option<&Filter>,
        order: Option<&OrderBy>,
    ) -> Result<Vec<Row>, RemoteError>;

    /// Insert or merge a row, resolving conflicts on `conflict_column`
    async fn upsert(&self, table: &str, row: Row, conflict_column: &str)
        -> Result<Row, RemoteError>;

    /// Delete matching rows, returning how many were removed
    async fn delete(&self, table: &str, filter: &Filter) -> Result<usize, RemoteError>;

    /// Row-level change notifications for `table`
    fn subscribe_changes(&self, table: &str) -> ChangeFeed;

    /// Identity state transitions
    fn subscribe_auth(&self) -> AuthFeed;
}
