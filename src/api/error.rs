use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

use super::validation::ValidationError;

pub const NOT_FOUND_MESSAGE: &str = "Produto não encontrado";
pub const DELETED_MESSAGE: &str = "Produto excluído com sucesso";
pub const INTERNAL_MESSAGE: &str = "Erro interno no servidor";

/// Everything a handler can answer with besides a success payload. Each
/// variant renders as `{"mensagem": ...}` with its status code.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Produto não encontrado")]
    NotFound,
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound,
            StoreError::ServiceClosed(detail) => Self::Unavailable(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, mensagem) = match &self {
            Self::Validation(violation) => (StatusCode::BAD_REQUEST, violation.to_string()),
            Self::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            Self::Unavailable(detail) => {
                error!(error = %detail, "Store request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };
        (status, Json(json!({ "mensagem": mensagem }))).into_response()
    }
}
