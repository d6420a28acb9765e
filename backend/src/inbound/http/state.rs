//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data`, so they depend only on
//! the domain service and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ProductsService;
use crate::domain::ports::ProductRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub products: ProductsService,
}

impl HttpState {
    /// Build state over the given repository adapter.
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            products: ProductsService::new(repository),
        }
    }
}
