//! Catalog service orchestrating the product repository port.

use std::sync::Arc;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{NewProduct, Product, ProductId};

/// Use-case layer over the product repository.
///
/// Holds the port behind an `Arc` so the HTTP adapter can clone the service
/// into each worker. Absent rows are signalled as `Ok(None)`; only store
/// faults surface as errors.
#[derive(Clone)]
pub struct ProductsService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductsService {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Fetch the whole catalog.
    pub async fn find_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        self.repository.find_all().await
    }

    /// Fetch one product, `None` when the id has no row.
    pub async fn find_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        self.repository.find_by_id(id).await
    }

    /// Persist a validated candidate, returning the entity with its
    /// assigned id.
    pub async fn create(&self, candidate: NewProduct) -> Result<Product, ProductRepositoryError> {
        self.repository.insert(&candidate).await
    }

    /// Merge an incoming payload onto the stored row and persist it.
    ///
    /// Overwrites `sku`, `name`, and `price` from the payload. The stored
    /// `description` survives the update; the payload's value is discarded.
    /// Returns `Ok(None)` when the id has no row.
    pub async fn update(
        &self,
        id: ProductId,
        incoming: NewProduct,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let Some(mut current) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        current.sku = incoming.sku;
        current.name = incoming.name;
        current.price = incoming.price;

        let updated = self.repository.update(&current).await?;
        Ok(Some(updated))
    }

    /// Delete one product, returning the deleted entity as a tombstone
    /// value, or `Ok(None)` when the id has no row.
    pub async fn delete(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let Some(existing) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        self.repository.delete(id).await?;
        Ok(Some(existing))
    }

    /// Whether any product carries the given SKU; used by the uniqueness
    /// rule of the validation pass.
    pub async fn exists_by_sku(&self, sku: &str) -> Result<bool, ProductRepositoryError> {
        self.repository.exists_by_sku(sku).await
    }
}
