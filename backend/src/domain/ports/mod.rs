//! Domain ports for the hexagonal boundary.

mod product_repository;

#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{
    InMemoryProductRepository, ProductRepository, ProductRepositoryError,
};
