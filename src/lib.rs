//! # shelter-store
//!
//! MongoDB collection gateway for shelter animal records.
//!
//! This crate provides:
//! - Connection configuration with injected credentials and deployment defaults
//! - A thin client over the official MongoDB driver (pooling is built-in)
//! - A [`CollectionGateway`] exposing Create, Read, Update and Delete over one
//!   collection, with local input validation and absorbed store failures
//! - `try_`-prefixed variants that surface failures as [`StoreError`] instead
//!   of collapsing them into defaults
//! - Query building and BSON document helpers
//!
//! ## Example
//!
//! ```rust,ignore
//! use shelter_store::{CollectionGateway, StoreConfig, doc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoreConfig::new("aacuser", "secret");
//!     let gateway = CollectionGateway::connect(config).await?;
//!
//!     // Returns true only if the store confirms an inserted id.
//!     let created = gateway.create(doc! { "name": "Fido", "species": "dog" }).await;
//!     assert!(created);
//!
//!     // Empty query matches all documents.
//!     let animals = gateway.read(doc! {}).await;
//!     println!("{} animals on record", animals.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Failure contract
//!
//! The four gateway operations never propagate a store failure: `create`
//! reports `false`, `read` an empty vec, `update` and `delete` report `0`.
//! Callers that need to distinguish "nothing matched" from "store
//! unreachable" use `try_create` / `try_read` / `try_update` / `try_delete`.

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod store;

pub use bson::oid::ObjectId;
pub use bson::{Bson, Document, doc};
pub use client::StoreClient;
pub use config::{StoreConfig, StoreConfigBuilder};
pub use error::{StoreError, StoreResult};
pub use filter::FilterBuilder;
pub use gateway::CollectionGateway;
pub use store::{DocumentStore, MongoStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::StoreClient;
    pub use crate::config::{StoreConfig, StoreConfigBuilder};
    pub use crate::document::DocumentExt;
    pub use crate::error::{StoreError, StoreResult};
    pub use crate::filter::FilterBuilder;
    pub use crate::gateway::CollectionGateway;
    pub use crate::store::{DocumentStore, MongoStore};
    pub use bson::oid::ObjectId;
    pub use bson::{Bson, Document, doc};
}
