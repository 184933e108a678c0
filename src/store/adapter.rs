//! Store adapter
//!
//! The only component that touches persistence. It owns the (optional)
//! store handle for the life of the process, maps record kinds to
//! collections, and stamps timestamps on writes.
//!
//! When no store could be set up, the adapter is still constructed and
//! every data operation fails with [`StoreError::NotConfigured`].

use std::sync::Arc;

use bson::{DateTime, Document};
use chrono::Utc;

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{Record, RecordKind};

use super::config::StoreConfig;
use super::document::DocumentStore;
use super::errors::{StoreError, StoreResult};
use super::mongo::MongoStore;

/// Process-wide handle to the document store
#[derive(Clone, Default)]
pub struct StoreAdapter {
    store: Option<Arc<dyn DocumentStore>>,
}

impl StoreAdapter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    /// An adapter with no store; every data operation reports "not configured"
    pub fn unconfigured() -> Self {
        Self { store: None }
    }

    /// Build the adapter from configuration. Never fails: a missing or
    /// unusable configuration yields an unconfigured adapter.
    pub async fn connect(config: &StoreConfig) -> Self {
        let Some((url, name)) = config.target() else {
            log_event_with_fields(
                Event::StoreUnavailable,
                &[("reason", "DATABASE_URL or DATABASE_NAME not set")],
            );
            return Self::unconfigured();
        };

        match MongoStore::connect(url, name).await {
            Ok(store) => {
                let adapter = Self::new(Arc::new(store));
                adapter.log_connected();
                adapter
            }
            Err(e) => {
                log_event_with_fields(
                    Event::StoreUnavailable,
                    &[("database", name), ("reason", e.to_string().as_str())],
                );
                Self::unconfigured()
            }
        }
    }

    /// Log `STORE_CONNECTED` with the database name
    pub fn log_connected(&self) {
        if let Some(name) = self.database_name() {
            log_event_with_fields(Event::StoreConnected, &[("database", name)]);
        }
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    /// The underlying store, or `NotConfigured`
    pub fn store(&self) -> StoreResult<&Arc<dyn DocumentStore>> {
        self.store.as_ref().ok_or(StoreError::NotConfigured)
    }

    /// Validate and insert `record` into its kind's collection.
    ///
    /// Returns the new record's identifier.
    pub async fn create_document<R: Record + Sync>(&self, record: &R) -> StoreResult<String> {
        let store = self.store()?;
        record.validate()?;

        let mut document = bson::to_document(record)?;
        document.remove("_id");

        let now = DateTime::from_chrono(Utc::now());
        document.insert("created_at", now);
        document.insert("updated_at", now);

        let collection = R::KIND.collection();
        let id = store.insert_one(collection, document).await?;

        log_event_with_fields(
            Event::RecordCreated,
            &[("collection", collection), ("id", id.as_str())],
        );
        Ok(id)
    }

    /// Up to `limit` records of `kind`, each with its `_id`.
    ///
    /// A non-positive limit yields an empty list without querying.
    pub async fn get_documents(&self, kind: RecordKind, limit: i64) -> StoreResult<Vec<Document>> {
        let store = self.store()?;
        if limit <= 0 {
            return Ok(Vec::new());
        }
        store.find_many(kind.collection(), limit).await
    }

    /// The record of `kind` with identifier `id`, if any
    pub async fn find_document(&self, kind: RecordKind, id: &str) -> StoreResult<Option<Document>> {
        self.store()?.find_by_id(kind.collection(), id).await
    }

    /// Set `fields` (plus a fresh `updated_at`) on one record.
    ///
    /// Returns whether a record matched.
    pub async fn update_document(
        &self,
        kind: RecordKind,
        id: &str,
        mut fields: Document,
    ) -> StoreResult<bool> {
        let store = self.store()?;
        fields.insert("updated_at", DateTime::from_chrono(Utc::now()));
        store.update_by_id(kind.collection(), id, fields).await
    }

    /// Database name of the configured store
    pub fn database_name(&self) -> Option<&str> {
        self.store.as_ref().map(|s| s.database_name())
    }

    /// Round-trip to the configured store
    pub async fn ping(&self) -> StoreResult<()> {
        self.store()?.ping().await
    }

    /// Collection names present in the database
    pub async fn collection_names(&self) -> StoreResult<Vec<String>> {
        self.store()?.list_collection_names().await
    }
}
