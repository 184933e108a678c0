//! Document store trait
//!
//! The seam between the adapter and a concrete database. Every method takes
//! a collection name; identifiers are ObjectId hex strings.

use async_trait::async_trait;
use bson::Document;

use super::errors::StoreResult;

/// A schemaless document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Name of the database this handle points at
    fn database_name(&self) -> &str;

    /// Round-trip to the server to prove the connection works
    async fn ping(&self) -> StoreResult<()>;

    /// Insert a document and return its new identifier.
    ///
    /// The store assigns `_id`; callers must not set it.
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<String>;

    /// Up to `limit` documents in storage order. `limit` is always positive.
    async fn find_many(&self, collection: &str, limit: i64) -> StoreResult<Vec<Document>>;

    /// The document whose `_id` matches `id`.
    ///
    /// Malformed identifiers match nothing.
    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Set `fields` on the document with `_id == id`; returns whether one matched
    async fn update_by_id(&self, collection: &str, id: &str, fields: Document)
        -> StoreResult<bool>;

    /// Names of all collections in the database
    async fn list_collection_names(&self) -> StoreResult<Vec<String>>;
}
