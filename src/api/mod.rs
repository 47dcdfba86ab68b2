//! HTTP surface of the catalog: routes, parameter parsing, body
//! validation, and error rendering.

pub mod error;
pub mod handlers;
pub mod params;
pub mod validation;

pub use error::ApiError;
pub use params::ListParams;
pub use validation::{validate_product_body, ValidationError};

use axum::routing::get;
use axum::Router;

use crate::store::StoreClient;

pub fn build_router(store: StoreClient) -> Router {
    Router::new()
        .route(
            "/produtos",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/produtos/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .with_state(store)
}
