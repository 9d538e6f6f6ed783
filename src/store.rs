//! The document store seam.
//!
//! [`DocumentStore`] covers exactly the driver surface the gateway needs:
//! insert-one, find, update-many and delete-many. The live implementation
//! is backed by a `mongodb::Collection`; tests substitute an in-memory
//! implementation to observe (or fail) store interactions.

use async_trait::async_trait;
use bson::{Bson, Document};
use futures::TryStreamExt;
use mongodb::Collection;

use crate::client::StoreClient;
use crate::config::StoreConfig;
use crate::error::StoreResult;

/// Minimal driver surface for one document collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document, returning the identifier the store generated.
    async fn insert_one(&self, document: Document) -> StoreResult<Bson>;

    /// Find all documents matching the filter, in the store's natural order.
    async fn find(&self, filter: Document) -> StoreResult<Vec<Document>>;

    /// Apply an update document to every match, returning the number of
    /// documents whose stored value actually changed.
    async fn update_many(&self, filter: Document, update: Document) -> StoreResult<u64>;

    /// Remove every match, returning the number of documents removed.
    async fn delete_many(&self, filter: Document) -> StoreResult<u64>;
}

/// Live store backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Wrap an existing collection handle.
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Connect to the store and bind the configured collection.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        let client = StoreClient::new(config).await?;
        Ok(Self::new(client.collection()))
    }

    /// Get the underlying collection handle.
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, document: Document) -> StoreResult<Bson> {
        let result = self.collection.insert_one(document, None).await?;
        Ok(result.inserted_id)
    }

    async fn find(&self, filter: Document) -> StoreResult<Vec<Document>> {
        let cursor = self.collection.find(filter, None).await?;
        let documents = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn update_many(&self, filter: Document, update: Document) -> StoreResult<u64> {
        let result = self.collection.update_many(filter, update, None).await?;
        Ok(result.modified_count)
    }

    async fn delete_many(&self, filter: Document) -> StoreResult<u64> {
        let result = self.collection.delete_many(filter, None).await?;
        Ok(result.deleted_count)
    }
}
