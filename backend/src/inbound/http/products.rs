//! Product catalog HTTP handlers.
//!
//! ```text
//! GET    /api/products
//! GET    /api/products/{id}
//! POST   /api/products
//! PUT    /api/products/{id}
//! DELETE /api/products/{id}
//! ```
//!
//! Writes run the validation pass first; a failed pass answers 400 with a
//! map from field name to `"El campo {field} {message}"`. Lookups that miss
//! answer 404 with an empty body.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, FieldErrors, Product, ProductDraft, ProductId, ValidationFailure, validate_product,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for creating or updating a product.
///
/// All fields are optional at the wire level; the validation pass decides
/// what is acceptable. An `id` member in the body is ignored; the path
/// owns the identity.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProductPayload {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl From<ProductPayload> for ProductDraft {
    fn from(payload: ProductPayload) -> Self {
        Self {
            sku: payload.sku,
            name: payload.name,
            description: payload.description,
            price: payload.price,
        }
    }
}

/// Response body for a single product.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "A1")]
    pub sku: String,
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = "A widget")]
    pub description: String,
    #[schema(example = 15.0)]
    pub price: f64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            sku: product.sku,
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

/// Shape the 400 body: field name to `"El campo {field} {message}"`.
fn field_error_body(errors: &FieldErrors) -> BTreeMap<&'static str, String> {
    errors
        .iter()
        .map(|violation| {
            (
                violation.field(),
                format!("El campo {} {}", violation.field(), violation.message()),
            )
        })
        .collect()
}

/// List the whole catalog.
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ProductResponse>>> {
    let products = state.products.find_all().await?;
    Ok(web::Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// Fetch one product by id.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 404, description = "No product with this id"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "viewProduct"
)]
#[get("/products/{id}")]
pub async fn view_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = ProductId::new(path.into_inner());
    match state.products.find_by_id(id).await? {
        Some(product) => Ok(HttpResponse::Ok().json(ProductResponse::from(product))),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Create a product after a full validation pass.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Created product", body = ProductResponse),
        (status = 400, description = "Field-error map keyed by field name"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<ProductPayload>,
) -> ApiResult<HttpResponse> {
    match validate_product(payload.into_inner().into(), &state.products).await {
        Ok(candidate) => {
            let created = state.products.create(candidate).await?;
            Ok(HttpResponse::Created().json(ProductResponse::from(created)))
        }
        Err(ValidationFailure::Invalid(errors)) => {
            Ok(HttpResponse::BadRequest().json(field_error_body(&errors)))
        }
        Err(ValidationFailure::Store(err)) => Err(err.into()),
    }
}

/// Update a product after a full validation pass.
///
/// The stored description survives the update regardless of the payload;
/// only `sku`, `name`, and `price` are taken from the body.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Field-error map keyed by field name"),
        (status = 404, description = "No product with this id"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<ProductPayload>,
) -> ApiResult<HttpResponse> {
    let id = ProductId::new(path.into_inner());
    match validate_product(payload.into_inner().into(), &state.products).await {
        Ok(candidate) => match state.products.update(id, candidate).await? {
            Some(updated) => Ok(HttpResponse::Created().json(ProductResponse::from(updated))),
            None => Ok(HttpResponse::NotFound().finish()),
        },
        Err(ValidationFailure::Invalid(errors)) => {
            Ok(HttpResponse::BadRequest().json(field_error_body(&errors)))
        }
        Err(ValidationFailure::Store(err)) => Err(err.into()),
    }
}

/// Delete a product, answering with the deleted entity.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "The deleted product", body = ProductResponse),
        (status = 404, description = "No product with this id"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = ProductId::new(path.into_inner());
    match state.products.delete(id).await? {
        Some(deleted) => Ok(HttpResponse::Ok().json(ProductResponse::from(deleted))),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}
