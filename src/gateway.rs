//! The collection gateway façade.

use bson::{Bson, Document, doc};
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::store::{DocumentStore, MongoStore};

/// CRUD gateway over a single document collection.
///
/// Each operation is one round trip: validate the input locally, delegate to
/// the store, normalize the result. The suppressed-default methods
/// ([`create`](Self::create), [`read`](Self::read), [`update`](Self::update),
/// [`delete`](Self::delete)) absorb every failure and return `false`, `0` or
/// an empty vec, so a caller cannot distinguish "nothing matched" from "the
/// store was unreachable". The `try_` variants return an explicit
/// [`StoreResult`] for callers that need to tell failure kinds apart.
///
/// # Example
///
/// ```rust,ignore
/// use shelter_store::{CollectionGateway, StoreConfig, doc};
///
/// let gateway = CollectionGateway::connect(StoreConfig::new("aacuser", "secret")).await?;
///
/// gateway.create(doc! { "name": "Fido", "species": "dog" }).await;
/// let dogs = gateway.read(doc! { "species": "dog" }).await;
/// ```
#[derive(Clone)]
pub struct CollectionGateway<S = MongoStore> {
    store: S,
}

impl CollectionGateway<MongoStore> {
    /// Connect to the store and bind the configured collection.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        Ok(Self::with_store(MongoStore::connect(config).await?))
    }
}

impl<S: DocumentStore> CollectionGateway<S> {
    /// Create a gateway over an existing store handle.
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert one document into the collection.
    ///
    /// Returns `true` only if the store confirmed a generated identifier.
    /// A value that is not a non-empty document is rejected without a store
    /// call, and any store failure is absorbed; both report `false`.
    pub async fn create(&self, document: impl Into<Bson>) -> bool {
        let Bson::Document(document) = document.into() else {
            return false;
        };
        match self.try_create(document).await {
            Ok(inserted_id) => !matches!(inserted_id, Bson::Null),
            Err(err) => {
                warn!(error = %err, "create suppressed");
                false
            }
        }
    }

    /// Find all documents matching the query, in the store's natural order.
    ///
    /// A value that is not a document is rejected without a store call; an
    /// empty document is valid and matches everything. Any store failure is
    /// absorbed; rejection and failure both report an empty vec.
    pub async fn read(&self, query: impl Into<Bson>) -> Vec<Document> {
        let Bson::Document(query) = query.into() else {
            return Vec::new();
        };
        match self.try_read(query).await {
            Ok(documents) => documents,
            Err(err) => {
                warn!(error = %err, "read suppressed");
                Vec::new()
            }
        }
    }

    /// Set the named fields on every document matching the query.
    ///
    /// Returns the number of documents whose stored value actually changed;
    /// matched-but-unchanged documents are excluded, per the store's
    /// modified-count semantics. Either argument not being a non-empty
    /// document rejects without a store call, and any store failure is
    /// absorbed; both report `0`.
    pub async fn update(&self, query: impl Into<Bson>, update_spec: impl Into<Bson>) -> u64 {
        let (Bson::Document(query), Bson::Document(update_spec)) =
            (query.into(), update_spec.into())
        else {
            return 0;
        };
        match self.try_update(query, update_spec).await {
            Ok(modified) => modified,
            Err(err) => {
                warn!(error = %err, "update suppressed");
                0
            }
        }
    }

    /// Remove every document matching the query.
    ///
    /// Returns the number of documents removed. A value that is not a
    /// non-empty document is rejected without a store call, and any store
    /// failure is absorbed; both report `0`.
    pub async fn delete(&self, query: impl Into<Bson>) -> u64 {
        let Bson::Document(query) = query.into() else {
            return 0;
        };
        match self.try_delete(query).await {
            Ok(deleted) => deleted,
            Err(err) => {
                warn!(error = %err, "delete suppressed");
                0
            }
        }
    }

    /// Insert one document, returning the store-generated identifier.
    pub async fn try_create(&self, document: Document) -> StoreResult<Bson> {
        if document.is_empty() {
            return Err(StoreError::invalid_input("document must not be empty"));
        }
        debug!(fields = document.len(), "inserting document");
        self.store.insert_one(document).await
    }

    /// Find all documents matching the query.
    pub async fn try_read(&self, query: Document) -> StoreResult<Vec<Document>> {
        debug!(?query, "finding documents");
        self.store.find(query).await
    }

    /// Set the named fields on every match, returning the modified count.
    pub async fn try_update(&self, query: Document, update_spec: Document) -> StoreResult<u64> {
        if query.is_empty() {
            return Err(StoreError::invalid_input("query must not be empty"));
        }
        if update_spec.is_empty() {
            return Err(StoreError::invalid_input("update spec must not be empty"));
        }
        debug!(?query, fields = update_spec.len(), "updating documents");
        self.store
            .update_many(query, doc! { "$set": update_spec })
            .await
    }

    /// Remove every match, returning the deleted count.
    pub async fn try_delete(&self, query: Document) -> StoreResult<u64> {
        if query.is_empty() {
            return Err(StoreError::invalid_input("query must not be empty"));
        }
        debug!(?query, "deleting documents");
        self.store.delete_many(query).await
    }
}
