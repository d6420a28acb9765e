//! PostgreSQL-backed `ProductRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::models::{NewProductRow, ProductChangeset, ProductRow};
use super::pool::{DbPool, PoolError};
use super::schema::products;
use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{NewProduct, Product, ProductId};

/// Diesel-backed adapter for the `ProductRepository` port.
///
/// Every call checks out a pooled connection and hits the database; there
/// is no caching layer in front of it.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => {
            ProductRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ProductRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => ProductRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ProductRepositoryError::connection("database connection error")
        }
        _ => ProductRepositoryError::query("database error"),
    }
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProductRow> = products::table
            .order(products::id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = products::table
            .find(id.get())
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Product::from))
    }

    async fn insert(&self, candidate: &NewProduct) -> Result<Product, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ProductRow = diesel::insert_into(products::table)
            .values(NewProductRow::from(candidate))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Product::from(row))
    }

    async fn update(&self, product: &Product) -> Result<Product, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ProductRow = diesel::update(products::table.find(product.id.get()))
            .set(ProductChangeset::from(product))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Product::from(row))
    }

    async fn delete(&self, id: ProductId) -> Result<(), ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(products::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn exists_by_sku(&self, sku: &str) -> Result<bool, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            products::table.filter(products::sku.eq(sku)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
