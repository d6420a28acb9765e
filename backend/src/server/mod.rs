//! Server construction: the explicit composition root.
//!
//! The repository adapter is chosen here (database-backed when a pool is
//! configured, in-memory otherwise), handed to the service, and the service
//! to the HTTP state. No framework-managed registry is involved.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{InMemoryProductRepository, ProductRepository};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::products::{
    create_product, delete_product, list_products, update_product, view_product,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DbPool, DieselProductRepository};

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    bind_addr: SocketAddr,
    db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration binding to the given address, without a
    /// database (requests are served from the in-memory repository).
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the persistence adapter.
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// The socket address the server will bind to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

fn build_repository(config: &ServerConfig) -> Arc<dyn ProductRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselProductRepository::new(pool.clone())),
        None => Arc::new(InMemoryProductRepository::new()),
    }
}

/// Assemble the application with all routes and shared state.
///
/// Exposed so integration tests drive exactly the app the server runs.
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(list_products)
        .service(view_product)
        .service(create_product)
        .service(update_product)
        .service(delete_product);

    #[cfg_attr(not(debug_assertions), allow(unused_mut))]
    let mut app = App::new()
        .app_data(http_state)
        .app_data(health_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}

/// Bind the server, mark readiness, and return the running server future.
pub fn run(config: ServerConfig) -> std::io::Result<Server> {
    let repository = build_repository(&config);
    let http_state = web::Data::new(HttpState::new(repository));
    let health_state = web::Data::new(HealthState::new());

    // Clone for the app factory so the probe state stays reachable here.
    let factory_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(http_state.clone(), factory_health_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
