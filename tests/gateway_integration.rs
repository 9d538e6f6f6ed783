//! Integration tests for the collection gateway.
//!
//! These tests run the gateway against an in-memory store that counts calls,
//! replicates the store's modified-count semantics and can be switched into
//! a failing mode to simulate connectivity loss.

use async_trait::async_trait;
use bson::{Bson, Document, doc, oid::ObjectId};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use shelter_store::gateway::CollectionGateway;
use shelter_store::store::DocumentStore;
use shelter_store::{StoreError, StoreResult};

#[derive(Default)]
struct MemoryState {
    documents: Vec<Document>,
    calls: usize,
    failing: bool,
}

/// In-memory document store with call counting and failure injection.
#[derive(Default)]
struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    fn new() -> Self {
        Self::default()
    }

    /// Number of operations that reached the store.
    fn calls(&self) -> usize {
        self.state.lock().calls
    }

    /// Make every subsequent operation fail with a connection error.
    fn inject_failure(&self) {
        self.state.lock().failing = true;
    }

    fn matches(document: &Document, filter: &Document) -> bool {
        filter.iter().all(|(k, v)| document.get(k) == Some(v))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, document: Document) -> StoreResult<Bson> {
        let mut state = self.state.lock();
        state.calls += 1;
        if state.failing {
            return Err(StoreError::connection("simulated connectivity loss"));
        }

        let mut document = document;
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };
        state.documents.push(document);
        Ok(id)
    }

    async fn find(&self, filter: Document) -> StoreResult<Vec<Document>> {
        let mut state = self.state.lock();
        state.calls += 1;
        if state.failing {
            return Err(StoreError::connection("simulated connectivity loss"));
        }

        Ok(state
            .documents
            .iter()
            .filter(|doc| Self::matches(doc, &filter))
            .cloned()
            .collect())
    }

    async fn update_many(&self, filter: Document, update: Document) -> StoreResult<u64> {
        let mut state = self.state.lock();
        state.calls += 1;
        if state.failing {
            return Err(StoreError::connection("simulated connectivity loss"));
        }

        let spec = update
            .get_document("$set")
            .map_err(|_| StoreError::invalid_input("update must be a $set document"))?
            .clone();

        // Mongo's modified count: a match whose fields already hold the
        // target values is not counted.
        let mut modified = 0;
        for document in state.documents.iter_mut() {
            if !Self::matches(document, &filter) {
                continue;
            }
            let mut changed = false;
            for (key, value) in spec.iter() {
                if document.get(key) != Some(value) {
                    document.insert(key.clone(), value.clone());
                    changed = true;
                }
            }
            if changed {
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn delete_many(&self, filter: Document) -> StoreResult<u64> {
        let mut state = self.state.lock();
        state.calls += 1;
        if state.failing {
            return Err(StoreError::connection("simulated connectivity loss"));
        }

        let before = state.documents.len();
        state.documents.retain(|doc| !Self::matches(doc, &filter));
        Ok((before - state.documents.len()) as u64)
    }
}

fn gateway() -> CollectionGateway<MemoryStore> {
    CollectionGateway::with_store(MemoryStore::new())
}

#[tokio::test]
async fn test_rejected_inputs_never_reach_the_store() {
    let gw = gateway();

    assert!(!gw.create(doc! {}).await);
    assert!(!gw.create("not a mapping").await);
    assert!(gw.read(Bson::Int32(5)).await.is_empty());
    assert_eq!(gw.update(doc! {}, doc! { "species": "canine" }).await, 0);
    assert_eq!(gw.update(doc! { "species": "dog" }, doc! {}).await, 0);
    assert_eq!(gw.delete(doc! {}).await, 0);
    assert_eq!(gw.delete("not a mapping").await, 0);

    assert_eq!(gw.store().calls(), 0);
}

#[tokio::test]
async fn test_create_then_read_round_trip() {
    let gw = gateway();

    assert!(gw.create(doc! { "name": "Fido", "species": "dog" }).await);

    let all = gw.read(doc! {}).await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].get_str("name").unwrap(), "Fido");
    assert_eq!(all[0].get_str("species").unwrap(), "dog");
    assert!(all[0].get_object_id("_id").is_ok());
}

#[tokio::test]
async fn test_read_preserves_insertion_order() {
    let gw = gateway();

    assert!(gw.create(doc! { "name": "Fido", "species": "dog" }).await);
    assert!(gw.create(doc! { "name": "Rex", "species": "dog" }).await);

    let dogs = gw.read(doc! { "species": "dog" }).await;
    assert_eq!(dogs.len(), 2);
    assert_eq!(dogs[0].get_str("name").unwrap(), "Fido");
    assert_eq!(dogs[1].get_str("name").unwrap(), "Rex");
}

#[tokio::test]
async fn test_full_lifecycle_scenario() {
    let gw = gateway();

    assert!(gw.create(doc! { "name": "Fido", "species": "dog" }).await);

    let dogs = gw.read(doc! { "species": "dog" }).await;
    assert_eq!(dogs.len(), 1);
    assert_eq!(dogs[0].get_str("name").unwrap(), "Fido");

    let modified = gw
        .update(doc! { "species": "dog" }, doc! { "species": "canine" })
        .await;
    assert_eq!(modified, 1);

    let deleted = gw.delete(doc! { "species": "canine" }).await;
    assert_eq!(deleted, 1);

    assert!(gw.read(doc! { "species": "canine" }).await.is_empty());
}

#[tokio::test]
async fn test_update_is_idempotent_on_modified_count() {
    let gw = gateway();

    assert!(gw.create(doc! { "name": "Fido", "species": "dog" }).await);
    assert!(gw.create(doc! { "name": "Rex", "species": "dog" }).await);

    let first = gw
        .update(doc! { "species": "dog" }, doc! { "outcome": "adopted" })
        .await;
    assert_eq!(first, 2);

    // Matched but unchanged: not counted as modified.
    let second = gw
        .update(doc! { "species": "dog" }, doc! { "outcome": "adopted" })
        .await;
    assert_eq!(second, 0);
}

#[tokio::test]
async fn test_update_leaves_unnamed_fields_untouched() {
    let gw = gateway();

    assert!(
        gw.create(doc! { "name": "Fido", "species": "dog", "age": 3 })
            .await
    );

    assert_eq!(
        gw.update(doc! { "name": "Fido" }, doc! { "age": 4 }).await,
        1
    );

    let fido = &gw.read(doc! { "name": "Fido" }).await[0];
    assert_eq!(fido.get_i32("age").unwrap(), 4);
    assert_eq!(fido.get_str("species").unwrap(), "dog");
}

#[tokio::test]
async fn test_update_adds_missing_fields() {
    let gw = gateway();

    assert!(gw.create(doc! { "name": "Fido", "species": "dog" }).await);

    assert_eq!(
        gw.update(doc! { "name": "Fido" }, doc! { "outcome": "adopted" })
            .await,
        1
    );

    let fido = &gw.read(doc! { "name": "Fido" }).await[0];
    assert_eq!(fido.get_str("outcome").unwrap(), "adopted");
}

#[tokio::test]
async fn test_delete_then_read_is_empty() {
    let gw = gateway();

    assert!(gw.create(doc! { "name": "Fido", "species": "dog" }).await);
    assert!(gw.create(doc! { "name": "Tom", "species": "cat" }).await);

    assert_eq!(gw.delete(doc! { "species": "dog" }).await, 1);
    assert!(gw.read(doc! { "species": "dog" }).await.is_empty());

    // Unrelated documents survive.
    assert_eq!(gw.read(doc! {}).await.len(), 1);
}

#[tokio::test]
async fn test_store_failure_yields_documented_defaults() {
    let gw = gateway();
    gw.store().inject_failure();

    assert!(!gw.create(doc! { "name": "Fido" }).await);
    assert!(gw.read(doc! {}).await.is_empty());
    assert_eq!(
        gw.update(doc! { "species": "dog" }, doc! { "species": "canine" })
            .await,
        0
    );
    assert_eq!(gw.delete(doc! { "species": "dog" }).await, 0);
}

#[tokio::test]
async fn test_try_variants_surface_failure_kind() {
    let gw = gateway();
    gw.store().inject_failure();

    let err = gw.try_read(doc! {}).await.unwrap_err();
    assert!(err.is_connection_error());

    let err = gw.try_create(doc! { "name": "Fido" }).await.unwrap_err();
    assert!(err.is_connection_error());

    // Local validation is reported distinctly from store failure.
    let err = gw.try_delete(doc! {}).await.unwrap_err();
    assert!(err.is_invalid_input());
}
