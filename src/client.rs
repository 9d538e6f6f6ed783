//! Thin wrapper over the MongoDB driver client.

use std::sync::Arc;

use bson::{Document, doc};
use mongodb::{Client, Collection, Database};
use tracing::info;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// A handle to the remote document store.
///
/// The MongoDB driver handles connection pooling internally; this wraps the
/// driver's Client together with the configured database so the gateway can
/// bind its collection. Construction does not perform a network round trip;
/// an unreachable server surfaces on the first operation.
#[derive(Clone)]
pub struct StoreClient {
    client: Client,
    database: Database,
    config: Arc<StoreConfig>,
}

impl StoreClient {
    /// Create a new client from configuration.
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        let options = config.to_client_options().await?;

        let client = Client::with_options(options)
            .map_err(|e| StoreError::connection(format!("failed to create client: {}", e)))?;

        let database = client.database(&config.database);

        info!(
            host = %config.host,
            database = %config.database,
            collection = %config.collection,
            "document store client created"
        );

        Ok(Self {
            client,
            database,
            config: Arc::new(config),
        })
    }

    /// Get the configured collection handle.
    pub fn collection(&self) -> Collection<Document> {
        self.database.collection(&self.config.collection)
    }

    /// Get the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Get the underlying MongoDB client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Check if the client is healthy by pinging the server.
    pub async fn is_healthy(&self) -> bool {
        self.database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .is_ok()
    }
}
