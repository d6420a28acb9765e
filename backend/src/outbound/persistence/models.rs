//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain.

use diesel::prelude::*;

use super::schema::products;
use crate::domain::{NewProduct, Product, ProductId};

/// Row struct for reading from the products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            sku: row.sku,
            name: row.name,
            description: row.description,
            price: row.price,
        }
    }
}

/// Insertable struct for creating new product records; the database assigns
/// the id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub sku: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
}

impl<'a> From<&'a NewProduct> for NewProductRow<'a> {
    fn from(candidate: &'a NewProduct) -> Self {
        Self {
            sku: &candidate.sku,
            name: &candidate.name,
            description: &candidate.description,
            price: candidate.price,
        }
    }
}

/// Changeset struct writing the full merged row for an update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductChangeset<'a> {
    pub sku: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
}

impl<'a> From<&'a Product> for ProductChangeset<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            sku: &product.sku,
            name: &product.name,
            description: &product.description,
            price: product.price,
        }
    }
}
