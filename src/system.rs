//! System startup and shutdown: wires the store service and owns its
//! task handle.

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::store::{StoreClient, StoreService};

const STORE_BUFFER_SIZE: usize = 32;

pub struct CatalogSystem {
    pub store: StoreClient,
    handle: JoinHandle<()>,
}

impl CatalogSystem {
    pub fn new() -> Self {
        let (service, store) = StoreService::new(STORE_BUFFER_SIZE);
        let handle = tokio::spawn(service.run());
        Self { store, handle }
    }

    /// Stops the store service and waits for its task to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        self.store.shutdown().await;
        drop(self.store);
        if let Err(e) = self.handle.await {
            error!("Store service task failed: {:?}", e);
            return Err(format!("Store service task failed: {:?}", e));
        }
        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for CatalogSystem {
    fn default() -> Self {
        Self::new()
    }
}
