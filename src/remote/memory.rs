//! In-process implementation of the remote data service
//!
//! Used as an offline backend and as the test double for the settings store. Writes publish
//! change events to subscribers of the written table.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::channel::mpsc::{unbounded, UnboundedSender};
use futures::StreamExt;
use serde_json::Value;

use super::{
    AuthEvent, AuthFeed, ChangeEvent, ChangeFeed, ChangeKind, Filter, OrderBy, RemoteDataService,
    RemoteError, Row,
};

type Tables = HashMap<String, Vec<Row>>;

/// In-memory tables with change feeds
#[derive(Clone, Default)]
pub struct InMemoryDataService {
    tables: Arc<Mutex<Tables>>,
    change_subscribers: Arc<Mutex<Vec<(String, UnboundedSender<ChangeEvent>)>>>,
    auth_subscribers: Arc<Mutex<Vec<UnboundedSender<AuthEvent>>>>,
    read_failure: Arc<Mutex<Option<RemoteError>>>,
    reads: Arc<AtomicUsize>,
}

impl std::fmt::Debug for InMemoryDataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDataService")
            .field("tables", &"[Tables]")
            .field("reads", &self.read_count())
            .finish()
    }
}

impl InMemoryDataService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of point and list reads served so far
    pub fn read_count(&self) -> usize {
        self.reads.load(AtomicOrdering::SeqCst)
    }

    /// Make every subsequent read fail with `error`, or clear it with `None`
    pub fn fail_reads_with(&self, error: Option<RemoteError>) {
        if let Ok(mut failure) = self.read_failure.lock() {
            *failure = error;
        }
    }

    /// Publish an identity transition to auth subscribers
    pub fn emit_auth(&self, event: AuthEvent) {
        if let Ok(mut subscribers) = self.auth_subscribers.lock() {
            subscribers.retain(|tx| tx.unbounded_send(event).is_ok());
        }
    }

    /// Rows currently stored in `table`
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .lock()
            .map(|tables| tables.get(table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn begin_read(&self) -> Result<(), RemoteError> {
        self.reads.fetch_add(1, AtomicOrdering::SeqCst);
        let failure = self
            .read_failure
            .lock()
            .map_err(|e| RemoteError::Unavailable(format!("failed to lock state: {e}")))?;
        match failure.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn lock_tables(&self) -> Result<std::sync::MutexGuard<'_, Tables>, RemoteError> {
        self.tables
            .lock()
            .map_err(|e| RemoteError::Unavailable(format!("failed to lock tables: {e}")))
    }

    fn publish(&self, table: &str, kind: ChangeKind, row: Option<Row>) {
        let Ok(mut subscribers) = self.change_subscribers.lock() else {
            return;
        };
        subscribers.retain(|(subscribed, tx)| {
            if subscribed != table {
                return !tx.is_closed();
            }
            tx.unbounded_send(ChangeEvent {
                table: table.to_string(),
                kind,
                row: row.clone(),
            })
            .is_ok()
        });
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl RemoteDataService for InMemoryDataService {
    async fn get_one(&self, table: &str, filter: &Filter) -> Result<Option<Row>, RemoteError> {
        self.begin_read()?;
        let tables = self.lock_tables()?;
        Ok(tables
            .get(table)
            .and_then(|rows| rows.iter().find(|row| filter.matches(row)).cloned()))
    }

    async fn list(
        &self,
        table: &str,
        filter: Option<&Filter>,
        order: Option<&OrderBy>,
    ) -> Result<Vec<Row>, RemoteError> {
        self.begin_read()?;
        let tables = self.lock_tables()?;
        let mut rows: Vec<Row> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| filter.map_or(true, |f| f.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = order {
            rows.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }
        Ok(rows)
    }

    async fn upsert(
        &self,
        table: &str,
        row: Row,
        conflict_column: &str,
    ) -> Result<Row, RemoteError> {
        let key = row.get(conflict_column).cloned().ok_or_else(|| RemoteError::Status {
            status: 400,
            message: format!("missing conflict column '{conflict_column}'"),
        })?;

        let (stored, kind) = {
            let mut tables = self.lock_tables()?;
            let rows = tables.entry(table.to_string()).or_default();
            match rows
                .iter_mut()
                .find(|existing| existing.get(conflict_column) == Some(&key))
            {
                Some(existing) => {
                    for (column, value) in row {
                        existing.insert(column, value);
                    }
                    (existing.clone(), ChangeKind::Update)
                }
                None => {
                    rows.push(row.clone());
                    (row, ChangeKind::Insert)
                }
            }
        };

        self.publish(table, kind, Some(stored.clone()));
        Ok(stored)
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<usize, RemoteError> {
        let removed: Vec<Row> = {
            let mut tables = self.lock_tables()?;
            match tables.get_mut(table) {
                Some(rows) => {
                    let (removed, kept): (Vec<Row>, Vec<Row>) =
                        rows.drain(..).partition(|row| filter.matches(row));
                    *rows = kept;
                    removed
                }
                None => Vec::new(),
            }
        };

        for row in &removed {
            self.publish(table, ChangeKind::Delete, Some(row.clone()));
        }
        Ok(removed.len())
    }

    fn subscribe_changes(&self, table: &str) -> ChangeFeed {
        let (tx, rx) = unbounded();
        if let Ok(mut subscribers) = self.change_subscribers.lock() {
            subscribers.push((table.to_string(), tx));
        }
        rx.boxed()
    }

    fn subscribe_auth(&self) -> AuthFeed {
        let (tx, rx) = unbounded();
        if let Ok(mut subscribers) = self.auth_subscribers.lock() {
            subscribers.push(tx);
        }
        rx.boxed()
    }
}
