use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{Product, ProductFields};

use super::error::StoreError;
use super::messages::{ListQuery, StoreRequest};

/// Cloneable handle to the store service.
///
/// Each method sends one typed request and awaits the oneshot response;
/// channel failures are mapped to [`StoreError::ServiceClosed`].
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub(crate) fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: ListQuery) -> Result<Vec<Product>, StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::List { query, respond_to })
            .await
            .map_err(|_| StoreError::ServiceClosed("service closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ServiceClosed("service dropped the response".to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Product, StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { id, respond_to })
            .await
            .map_err(|_| StoreError::ServiceClosed("service closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ServiceClosed("service dropped the response".to_string()))?
    }

    #[instrument(skip(self, fields))]
    pub async fn create(&self, fields: ProductFields) -> Result<Product, StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { fields, respond_to })
            .await
            .map_err(|_| StoreError::ServiceClosed("service closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ServiceClosed("service dropped the response".to_string()))?
    }

    #[instrument(fields(product_id = %id), skip(self, fields))]
    pub async fn update(&self, id: u64, fields: ProductFields) -> Result<Product, StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Update {
                id,
                fields,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ServiceClosed("service closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ServiceClosed("service dropped the response".to_string()))?
    }

    #[instrument(fields(product_id = %id), skip(self))]
    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete { id, respond_to })
            .await
            .map_err(|_| StoreError::ServiceClosed("service closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ServiceClosed("service dropped the response".to_string()))?
    }

    /// Asks the service loop to stop. Safe to call more than once.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        let _ = self.sender.send(StoreRequest::Shutdown).await;
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<usize, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Count { respond_to })
            .await
            .map_err(|_| StoreError::ServiceClosed("service closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ServiceClosed("service dropped the response".to_string()))?
    }
}
