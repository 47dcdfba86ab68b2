use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::domain::Product;
use crate::store::StoreClient;

use super::error::{ApiError, DELETED_MESSAGE};
use super::params::ListParams;
use super::validation::validate_product_body;

#[instrument(skip(store))]
pub async fn list_products(
    State(store): State<StoreClient>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    debug!("Listing products");
    let products = store.list(params.into_query()).await?;
    Ok(Json(products))
}

#[instrument(skip(store))]
pub async fn get_product(
    State(store): State<StoreClient>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let product = store.get(id).await?;
    Ok(Json(product))
}

#[instrument(skip(store, body))]
pub async fn create_product(
    State(store): State<StoreClient>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let fields = validate_product_body(&body)?;
    let product = store.create(fields).await?;
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

#[instrument(skip(store, body))]
pub async fn update_product(
    State(store): State<StoreClient>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Product>, ApiError> {
    // Validation runs before the store sees the id, so a 400 never
    // reveals whether the product exists.
    let fields = validate_product_body(&body)?;
    let id = parse_id(&id)?;
    let product = store.update(id, fields).await?;
    Ok(Json(product))
}

#[instrument(skip(store))]
pub async fn delete_product(
    State(store): State<StoreClient>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    store.delete(id).await?;
    Ok(Json(json!({ "mensagem": DELETED_MESSAGE })))
}

/// A path segment that does not parse as an integer can never match a
/// stored id, so it gets the standard not-found answer.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>().map_err(|_| ApiError::NotFound)
}
