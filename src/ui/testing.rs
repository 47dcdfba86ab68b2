//! Scripted test double for the catalog port.
//!
//! Same strategy as mocking a store client: tests queue canned replies,
//! run the session, then assert the recorded conversation instead of
//! standing up a real server.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Product, ProductFields};
use crate::store::ListQuery;

use super::backend::{CatalogApi, ClientError};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ListQuery),
    Get(u64),
    Create(ProductFields),
    Update(u64, ProductFields),
    Delete(u64),
}

#[derive(Debug, Clone)]
pub enum Reply {
    Products(Vec<Product>),
    Product(Product),
    Deleted,
    Fail(ClientError),
}

#[derive(Default)]
pub struct MockCatalog {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Reply {
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock catalog ran out of scripted replies")
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn list(&self, query: ListQuery) -> Result<Vec<Product>, ClientError> {
        match self.record(Call::List(query)) {
            Reply::Products(products) => Ok(products),
            Reply::Fail(err) => Err(err),
            other => panic!("unexpected reply for list: {other:?}"),
        }
    }

    async fn get(&self, id: u64) -> Result<Product, ClientError> {
        match self.record(Call::Get(id)) {
            Reply::Product(product) => Ok(product),
            Reply::Fail(err) => Err(err),
            other => panic!("unexpected reply for get: {other:?}"),
        }
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, ClientError> {
        match self.record(Call::Create(fields)) {
            Reply::Product(product) => Ok(product),
            Reply::Fail(err) => Err(err),
            other => panic!("unexpected reply for create: {other:?}"),
        }
    }

    async fn update(&self, id: u64, fields: ProductFields) -> Result<Product, ClientError> {
        match self.record(Call::Update(id, fields)) {
            Reply::Product(product) => Ok(product),
            Reply::Fail(err) => Err(err),
            other => panic!("unexpected reply for update: {other:?}"),
        }
    }

    async fn delete(&self, id: u64) -> Result<(), ClientError> {
        match self.record(Call::Delete(id)) {
            Reply::Deleted => Ok(()),
            Reply::Fail(err) => Err(err),
            other => panic!("unexpected reply for delete: {other:?}"),
        }
    }
}
