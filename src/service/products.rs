//! ProductService: builds the statement for each route and hands writes to the persist step.

use super::Persist;
use crate::error::AppError;
use crate::extractors::FailFlag;
use crate::model::{Product, ProductInput};
use crate::response::WriteAck;
use crate::sql::Statement;
use crate::store::Datastore;
use chrono::Utc;

pub struct ProductService;

impl ProductService {
    /// All rows, ordered by id.
    pub async fn list(store: &dyn Datastore) -> Result<Vec<Product>, AppError> {
        Ok(store.fetch(&Statement::SelectAll).await?)
    }

    /// One row by id, or None.
    pub async fn read(store: &dyn Datastore, id: i64) -> Result<Option<Product>, AppError> {
        let rows = store.fetch(&Statement::SelectById { id }).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn create(store: &dyn Datastore, input: ProductInput, fail: FailFlag) -> Result<WriteAck, AppError> {
        tracing::info!(name = %input.name, category = %input.category, "insert requested");
        let stmt = Statement::Insert {
            name: input.name,
            category: input.category,
            at: Utc::now(),
        };
        Persist::run(store, &stmt, fail).await
    }

    /// Update name and category; a committed update that matches no row is NotFound.
    pub async fn update(
        store: &dyn Datastore,
        id: i64,
        input: ProductInput,
        fail: FailFlag,
    ) -> Result<WriteAck, AppError> {
        tracing::info!(id, name = %input.name, category = %input.category, "update requested");
        let stmt = Statement::Update {
            id,
            name: input.name,
            category: input.category,
            at: Utc::now(),
        };
        Self::require_row(id, Persist::run(store, &stmt, fail).await?)
    }

    /// Delete by id; a committed delete that matches no row is NotFound.
    pub async fn delete(store: &dyn Datastore, id: i64, fail: FailFlag) -> Result<WriteAck, AppError> {
        tracing::info!(id, "delete requested");
        Self::require_row(id, Persist::run(store, &Statement::Delete { id }, fail).await?)
    }

    fn require_row(id: i64, ack: WriteAck) -> Result<WriteAck, AppError> {
        if !ack.is_rollback() && ack.rows_affected == 0 {
            return Err(AppError::NotFound(format!("product {}", id)));
        }
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn input(name: &str, category: &str) -> ProductInput {
        ProductInput {
            name: name.into(),
            category: category.into(),
        }
    }

    #[tokio::test]
    async fn created_row_has_equal_timestamps() {
        let store = MemoryStore::new();
        ProductService::create(&store, input("Widget", "Tools"), FailFlag(false)).await.unwrap();

        let rows = ProductService::list(&store).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Widget");
        assert_eq!(rows[0].created_at, rows[0].updated_at);
    }

    #[tokio::test]
    async fn update_advances_updated_at_and_keeps_id() {
        let store = MemoryStore::new();
        ProductService::create(&store, input("Widget", "Tools"), FailFlag(false)).await.unwrap();
        let before = ProductService::read(&store, 1).await.unwrap().unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        ProductService::update(&store, 1, input("X", "Y"), FailFlag(false)).await.unwrap();
        let after = ProductService::read(&store, 1).await.unwrap().unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!((after.name.as_str(), after.category.as_str()), ("X", "Y"));
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn committed_update_of_missing_row_is_not_found() {
        let store = MemoryStore::new();
        let err = ProductService::update(&store, 9, input("X", "Y"), FailFlag(false)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn forced_rollback_of_missing_row_still_acknowledges() {
        let store = MemoryStore::new();
        let ack = ProductService::delete(&store, 9, FailFlag(true)).await.unwrap();
        assert_eq!(ack, WriteAck::rolled_back(0));
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let store = MemoryStore::new();
        ProductService::create(&store, input("Widget", "Tools"), FailFlag(false)).await.unwrap();
        ProductService::delete(&store, 1, FailFlag(false)).await.unwrap();
        assert!(ProductService::read(&store, 1).await.unwrap().is_none());
    }
}
