use std::collections::BTreeMap;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::domain::{Product, ProductFields};

use super::client::StoreClient;
use super::error::StoreError;
use super::messages::{ListQuery, ServiceResponse, SortKey, StoreRequest};

/// Owns the product collection and the id counter.
///
/// All mutation goes through the service loop, so requests are processed
/// one at a time and id assignment needs no further synchronization. Ids
/// start at 1, grow by 1 per create, and are never reused; a `BTreeMap`
/// keeps unsorted listings in ascending id order, which equals insertion
/// order.
pub struct StoreService {
    receiver: mpsc::Receiver<StoreRequest>,
    products: BTreeMap<u64, Product>,
    next_id: u64,
}

impl StoreService {
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            products: BTreeMap::new(),
            next_id: 1,
        };
        (service, StoreClient::new(sender))
    }

    #[instrument(name = "store_service", skip(self))]
    pub async fn run(mut self) {
        info!("StoreService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::List { query, respond_to } => {
                    self.handle_list(&query, respond_to);
                }
                StoreRequest::Get { id, respond_to } => {
                    self.handle_get(id, respond_to);
                }
                StoreRequest::Create { fields, respond_to } => {
                    self.handle_create(fields, respond_to);
                }
                StoreRequest::Update {
                    id,
                    fields,
                    respond_to,
                } => {
                    self.handle_update(id, fields, respond_to);
                }
                StoreRequest::Delete { id, respond_to } => {
                    self.handle_delete(id, respond_to);
                }
                StoreRequest::Shutdown => {
                    info!("StoreService shutting down");
                    break;
                }
                #[cfg(test)]
                StoreRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.products.len()));
                }
            }
        }
        info!("StoreService stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list(&self, query: &ListQuery, respond_to: ServiceResponse<Vec<Product>>) {
        debug!("Processing list request");
        let mut result: Vec<Product> = match &query.name {
            Some(needle) => {
                let needle = needle.to_lowercase();
                self.products
                    .values()
                    .filter(|p| p.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            None => self.products.values().cloned().collect(),
        };
        if query.sort == Some(SortKey::QuantityAsc) {
            // Stable sort, so equal quantities keep their id order.
            result.sort_by_key(|p| p.quantity);
        }
        debug!(count = result.len(), "List complete");
        let _ = respond_to.send(Ok(result));
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get(&self, id: u64, respond_to: ServiceResponse<Product>) {
        debug!("Processing get request");
        let result = self
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id));
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, fields, respond_to))]
    fn handle_create(&mut self, fields: ProductFields, respond_to: ServiceResponse<Product>) {
        let id = self.next_id;
        self.next_id += 1;
        let product = Product::new(id, fields);
        self.products.insert(id, product.clone());
        info!(product_id = id, name = %product.name, "Product created");
        let _ = respond_to.send(Ok(product));
    }

    #[instrument(fields(product_id = %id), skip(self, fields, respond_to))]
    fn handle_update(
        &mut self,
        id: u64,
        fields: ProductFields,
        respond_to: ServiceResponse<Product>,
    ) {
        match self.products.get_mut(&id) {
            Some(product) => {
                product.apply(fields);
                info!("Product updated");
                let _ = respond_to.send(Ok(product.clone()));
            }
            None => {
                debug!("Product not found");
                let _ = respond_to.send(Err(StoreError::NotFound(id)));
            }
        }
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_delete(&mut self, id: u64, respond_to: ServiceResponse<()>) {
        match self.products.remove(&id) {
            Some(_) => {
                info!("Product deleted");
                let _ = respond_to.send(Ok(()));
            }
            None => {
                debug!("Product not found");
                let _ = respond_to.send(Err(StoreError::NotFound(id)));
            }
        }
    }
}
