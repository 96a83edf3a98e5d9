//! Datastore adapters: execute statement templates and report rows or row counts.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::StoreError;
use crate::model::Product;
use crate::sql::Statement;
use async_trait::async_trait;

/// How the transaction around a write ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Commit,
    Rollback,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Commit => "commit",
            Outcome::Rollback => "rollback",
        }
    }
}

/// Relational datastore the router executes against.
///
/// Writes always run inside a transaction that is released on every exit
/// path: committed or rolled back per `Outcome`, and rolled back if execution fails.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Run a read statement and return its rows.
    async fn fetch(&self, stmt: &Statement) -> Result<Vec<Product>, StoreError>;

    /// Run a write statement in its own transaction and return the affected row count.
    async fn execute(&self, stmt: &Statement, outcome: Outcome) -> Result<u64, StoreError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
