use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{Product, ProductFields};
use crate::store::ListQuery;

/// How the client core reaches a catalog backend.
///
/// `Rejected` means the server answered with a non-success status (it
/// carries the server's `mensagem` when one was sent); `Transport` covers
/// network and decoding failures.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list(&self, query: ListQuery) -> Result<Vec<Product>, ClientError>;
    async fn get(&self, id: u64) -> Result<Product, ClientError>;
    async fn create(&self, fields: ProductFields) -> Result<Product, ClientError>;
    async fn update(&self, id: u64, fields: ProductFields) -> Result<Product, ClientError>;
    async fn delete(&self, id: u64) -> Result<(), ClientError>;
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Transport failure: {0}")]
    Transport(String),
}

/// Thin reqwest wrapper over the HTTP surface.
pub struct HttpCatalog {
    base_url: String,
    http: reqwest::Client,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn products_url(&self) -> String {
        format!("{}/produtos", self.base_url)
    }

    fn product_url(&self, id: u64) -> String {
        format!("{}/produtos/{id}", self.base_url)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn list(&self, query: ListQuery) -> Result<Vec<Product>, ClientError> {
        let mut request = self.http.get(self.products_url());
        if let Some(name) = &query.name {
            request = request.query(&[("nome", name.as_str())]);
        }
        if let Some(sort) = query.sort {
            request = request.query(&[("ordenarPor", sort.wire_value())]);
        }
        let response = request.send().await.map_err(transport)?;
        decode(response).await
    }

    async fn get(&self, id: u64) -> Result<Product, ClientError> {
        let response = self
            .http
            .get(self.product_url(id))
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, ClientError> {
        let response = self
            .http
            .post(self.products_url())
            .json(&fields)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn update(&self, id: u64, fields: ProductFields) -> Result<Product, ClientError> {
        let response = self
            .http
            .put(self.product_url(id))
            .json(&fields)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn delete(&self, id: u64) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.product_url(id))
            .send()
            .await
            .map_err(transport)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(rejected(response).await)
        }
    }
}

fn transport(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))
    } else {
        Err(rejected(response).await)
    }
}

/// Extracts the server's `mensagem` from an error payload, falling back
/// to the bare status code.
async fn rejected(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|payload| {
            payload
                .get("mensagem")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {status}"));
    ClientError::Rejected { status, message }
}
