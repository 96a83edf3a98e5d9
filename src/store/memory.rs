//! In-memory storage backend.

use super::{Datastore, Outcome};
use crate::error::StoreError;
use crate::model::Product;
use crate::sql::Statement;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

impl Table {
    fn select(&self, stmt: &Statement) -> Vec<Product> {
        match stmt {
            Statement::SelectAll => self.rows.values().cloned().collect(),
            Statement::SelectById { id } => self.rows.get(id).cloned().into_iter().collect(),
            _ => Vec::new(),
        }
    }

    fn apply(&mut self, stmt: &Statement) -> u64 {
        match stmt {
            Statement::SelectAll | Statement::SelectById { .. } => 0,
            Statement::Insert { name, category, at } => {
                self.last_id += 1;
                let id = self.last_id;
                self.rows.insert(
                    id,
                    Product {
                        id,
                        name: name.clone(),
                        category: category.clone(),
                        created_at: *at,
                        updated_at: *at,
                    },
                );
                1
            }
            Statement::Update {
                id,
                name,
                category,
                at,
            } => match self.rows.get_mut(id) {
                Some(row) => {
                    row.name = name.clone();
                    row.category = category.clone();
                    row.updated_at = *at;
                    1
                }
                None => 0,
            },
            Statement::Delete { id } => self.rows.remove(id).map_or(0, |_| 1),
        }
    }
}

/// Process-local store with the same transaction semantics as the SQL adapter.
///
/// A write is applied to a staged copy of the table; the copy replaces the
/// table on commit and is discarded on rollback. Data is lost when the last
/// clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn fetch(&self, stmt: &Statement) -> Result<Vec<Product>, StoreError> {
        tracing::debug!(statement = stmt.kind(), "query (memory)");
        Ok(self.table.read().await.select(stmt))
    }

    async fn execute(&self, stmt: &Statement, outcome: Outcome) -> Result<u64, StoreError> {
        tracing::debug!(statement = stmt.kind(), outcome = outcome.as_str(), "query (memory tx)");
        let mut table = self.table.write().await;
        let mut staged = table.clone();
        let rows = staged.apply(stmt);
        if outcome == Outcome::Commit {
            *table = staged;
        }
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
