use axum::{extract::Path, routing::get, Json, Router};
use tracing::instrument;

use crate::error::AppError;
use crate::products::catalog::{Product, CATALOG};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
}

#[instrument]
pub async fn list_products() -> Json<&'static [Product]> {
    Json(CATALOG)
}

/// Catalog entries have no ids, so a by-id lookup can never match.
/// Answer with an explicit 404 instead of an empty body.
#[instrument]
pub async fn get_product(Path(_id): Path<i64>) -> Result<Json<Product>, AppError> {
    Err(AppError::NotFound("product"))
}
