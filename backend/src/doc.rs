//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the specification consumed by Swagger UI in debug
//! builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::products::{ProductPayload, ProductResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product catalog API",
        description = "CRUD endpoints for the product catalog with field validation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::view_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ProductPayload, ProductResponse, Error, ErrorCode)),
    tags(
        (name = "products", description = "Product catalog CRUD"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
