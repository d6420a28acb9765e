//! Diesel/PostgreSQL persistence adapter.

mod diesel_product_repository;
mod models;
mod pool;
mod schema;

pub use diesel_product_repository::DieselProductRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
