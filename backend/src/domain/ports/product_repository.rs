//! Port abstraction for product persistence adapters and their errors.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{NewProduct, Product, ProductId};

/// Persistence errors raised by product repository adapters.
///
/// Adapters map their backend-specific failures onto these two variants;
/// callers treat both as fatal. No variant is retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductRepositoryError {
    /// Repository connection could not be established.
    #[error("product repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("product repository query failed: {message}")]
    Query { message: String },
}

impl ProductRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for product storage and retrieval.
///
/// One concrete adapter binds this to PostgreSQL; an in-memory adapter backs
/// tests and database-less runs. Reads and writes are single-row and hit the
/// backing store on every call; there is no caching layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch every product in the catalog.
    async fn find_all(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Fetch a product by identifier.
    async fn find_by_id(&self, id: ProductId)
    -> Result<Option<Product>, ProductRepositoryError>;

    /// Insert a validated candidate, returning the persisted entity with its
    /// assigned id.
    async fn insert(&self, candidate: &NewProduct) -> Result<Product, ProductRepositoryError>;

    /// Write the full row for an existing product in place.
    async fn update(&self, product: &Product) -> Result<Product, ProductRepositoryError>;

    /// Delete the row with the given identifier. Deleting an absent row is
    /// not an error.
    async fn delete(&self, id: ProductId) -> Result<(), ProductRepositoryError>;

    /// Whether any product carries the given SKU.
    async fn exists_by_sku(&self, sku: &str) -> Result<bool, ProductRepositoryError>;
}

/// In-memory implementation for tests and database-less runs.
///
/// Ids are assigned monotonically starting at 1, matching the sequence
/// behaviour of the PostgreSQL adapter.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    state: Mutex<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i64,
    rows: BTreeMap<i64, Product>,
}

impl InMemoryProductRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, InMemoryState>, ProductRepositoryError> {
        self.state
            .lock()
            .map_err(|_| ProductRepositoryError::query("product store mutex poisoned"))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(self.lock()?.rows.get(&id.get()).cloned())
    }

    async fn insert(&self, candidate: &NewProduct) -> Result<Product, ProductRepositoryError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let product = Product {
            id: ProductId::new(state.next_id),
            sku: candidate.sku.clone(),
            name: candidate.name.clone(),
            description: candidate.description.clone(),
            price: candidate.price,
        };
        state.rows.insert(product.id.get(), product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<Product, ProductRepositoryError> {
        let mut state = self.lock()?;
        if !state.rows.contains_key(&product.id.get()) {
            return Err(ProductRepositoryError::query(format!(
                "no product row with id {}",
                product.id
            )));
        }
        state.rows.insert(product.id.get(), product.clone());
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), ProductRepositoryError> {
        self.lock()?.rows.remove(&id.get());
        Ok(())
    }

    async fn exists_by_sku(&self, sku: &str) -> Result<bool, ProductRepositoryError> {
        Ok(self.lock()?.rows.values().any(|product| product.sku == sku))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(sku: &str) -> NewProduct {
        NewProduct {
            sku: sku.into(),
            name: "Widget".into(),
            description: "A widget".into(),
            price: 15.0,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryProductRepository::new();
        let first = repo.insert(&candidate("A1")).await.expect("insert");
        let second = repo.insert(&candidate("A2")).await.expect("insert");

        assert_eq!(first.id, ProductId::new(1));
        assert_eq!(second.id, ProductId::new(2));
    }

    #[tokio::test]
    async fn find_by_id_returns_inserted_row() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(&candidate("A1")).await.expect("insert");

        let found = repo.find_by_id(created.id).await.expect("find");
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_id() {
        let repo = InMemoryProductRepository::new();
        let found = repo.find_by_id(ProductId::new(99)).await.expect("find");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn exists_by_sku_reports_presence() {
        let repo = InMemoryProductRepository::new();
        repo.insert(&candidate("A1")).await.expect("insert");

        assert!(repo.exists_by_sku("A1").await.expect("exists"));
        assert!(!repo.exists_by_sku("A2").await.expect("exists"));
    }

    #[tokio::test]
    async fn update_overwrites_the_stored_row() {
        let repo = InMemoryProductRepository::new();
        let mut created = repo.insert(&candidate("A1")).await.expect("insert");
        created.name = "Renamed".into();

        let updated = repo.update(&created).await.expect("update");
        assert_eq!(updated.name, "Renamed");

        let found = repo.find_by_id(created.id).await.expect("find");
        assert_eq!(found.map(|p| p.name), Some("Renamed".into()));
    }

    #[tokio::test]
    async fn update_of_unknown_row_is_a_query_error() {
        let repo = InMemoryProductRepository::new();
        let orphan = Product {
            id: ProductId::new(7),
            sku: "A1".into(),
            name: "Widget".into(),
            description: "A widget".into(),
            price: 15.0,
        };

        let err = repo.update(&orphan).await.expect_err("update must fail");
        assert!(matches!(err, ProductRepositoryError::Query { .. }));
    }

    #[tokio::test]
    async fn delete_removes_the_row_and_tolerates_absence() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(&candidate("A1")).await.expect("insert");

        repo.delete(created.id).await.expect("delete");
        assert!(repo.find_by_id(created.id).await.expect("find").is_none());

        // Second delete of the same id is a no-op.
        repo.delete(created.id).await.expect("repeat delete");
    }

    #[test]
    fn error_constructors_format_messages() {
        assert_eq!(
            ProductRepositoryError::connection("refused").to_string(),
            "product repository connection failed: refused"
        );
        assert_eq!(
            ProductRepositoryError::query("bad row").to_string(),
            "product repository query failed: bad row"
        );
    }
}
