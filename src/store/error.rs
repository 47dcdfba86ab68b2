use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    NotFound(u64),
    #[error("Store service unavailable: {0}")]
    ServiceClosed(String),
}
