//! PostgreSQL adapter over a sqlx pool.

use super::{Datastore, Outcome};
use crate::error::StoreError;
use crate::model::Product;
use crate::sql::Statement;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Datastore for PgStore {
    async fn fetch(&self, stmt: &Statement) -> Result<Vec<Product>, StoreError> {
        let q = stmt.build();
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Product>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn execute(&self, stmt: &Statement, outcome: Outcome) -> Result<u64, StoreError> {
        let q = stmt.build();
        tracing::debug!(sql = %q.sql, params = ?q.params, outcome = outcome.as_str(), "query (tx)");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        // Dropping `tx` on an early return rolls it back.
        let mut tx = self.pool.begin().await?;
        let rows = query.execute(&mut *tx).await?.rows_affected();
        match outcome {
            Outcome::Commit => tx.commit().await?,
            Outcome::Rollback => tx.rollback().await?,
        }
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.
    async fn connect() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a PostgreSQL database");
        let store = PgStore::connect(&url, 2).await.unwrap();
        sqlx::query(include_str!("../../schema/products.sql"))
            .execute(&store.pool)
            .await
            .unwrap();
        store
    }

    async fn count_named(store: &PgStore, name: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE name = $1")
            .bind(name)
            .fetch_one(&store.pool)
            .await
            .unwrap()
    }

    fn insert(name: &str) -> Statement {
        Statement::Insert {
            name: name.into(),
            category: "Tools".into(),
            at: Utc::now(),
        }
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn rollback_outcome_leaves_no_row() {
        let store = connect().await;
        let name = format!("rollback-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());

        let affected = store.execute(&insert(&name), Outcome::Rollback).await.unwrap();

        assert_eq!(affected, 1);
        assert_eq!(count_named(&store, &name).await, 0);
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn commit_outcome_lands_row_and_reads_back() {
        let store = connect().await;
        let name = format!("commit-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());

        assert_eq!(store.execute(&insert(&name), Outcome::Commit).await.unwrap(), 1);
        assert_eq!(count_named(&store, &name).await, 1);

        let rows = store.fetch(&Statement::SelectAll).await.unwrap();
        let row = rows.iter().find(|p| p.name == name).unwrap();
        assert_eq!(row.created_at, row.updated_at);

        let delete = Statement::Delete { id: row.id };
        assert_eq!(store.execute(&delete, Outcome::Commit).await.unwrap(), 1);
        assert_eq!(count_named(&store, &name).await, 0);
    }
}
