//! In-process document store
//!
//! Keeps documents per collection in insertion order and assigns fresh
//! ObjectIds, so identifiers look exactly like the MongoDB ones. Used by
//! `start --memory` and by the test suites.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};

use super::document::DocumentStore;
use super::errors::{StoreError, StoreResult};
use super::mongo::id_to_string;

const MEMORY_DATABASE_NAME: &str = "memory";

/// Documents held in a map: collection -> documents
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Vec<Document>>>,

    /// Collections whose inserts fail, for exercising error paths
    rejected: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later insert into `collection` fail with an execution error
    pub fn reject_inserts(&self, collection: &str) {
        if let Ok(mut rejected) = self.rejected.write() {
            rejected.insert(collection.to_string());
        }
    }

    /// Number of documents currently in `collection`
    pub fn count(&self, collection: &str) -> usize {
        self.data
            .read()
            .map(|data| data.get(collection).map(Vec::len).unwrap_or(0))
            .unwrap_or(0)
    }

    fn matches_id(document: &Document, oid: &ObjectId) -> bool {
        matches!(document.get("_id"), Some(Bson::ObjectId(id)) if id == oid)
    }
}

fn poisoned() -> StoreError {
    StoreError::Execution("Lock poisoned".to_string())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn database_name(&self) -> &str {
        MEMORY_DATABASE_NAME
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> StoreResult<String> {
        if self.rejected.read().map_err(|_| poisoned())?.contains(collection) {
            return Err(StoreError::Execution(format!(
                "insert into '{}' rejected",
                collection
            )));
        }

        let id = Bson::ObjectId(ObjectId::new());
        document.insert("_id", id.clone());

        let mut data = self.data.write().map_err(|_| poisoned())?;
        data.entry(collection.to_string()).or_default().push(document);

        Ok(id_to_string(id))
    }

    async fn find_many(&self, collection: &str, limit: i64) -> StoreResult<Vec<Document>> {
        let data = self.data.read().map_err(|_| poisoned())?;
        let take = usize::try_from(limit).unwrap_or(0);

        Ok(data
            .get(collection)
            .map(|docs| docs.iter().take(take).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let data = self.data.read().map_err(|_| poisoned())?;

        Ok(data
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| Self::matches_id(d, &oid)))
            .cloned())
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> StoreResult<bool> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let mut data = self.data.write().map_err(|_| poisoned())?;

        let Some(document) = data
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| Self::matches_id(d, &oid)))
        else {
            return Ok(false);
        };

        for (key, value) in fields {
            document.insert(key, value);
        }
        Ok(true)
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let data = self.data.read().map_err(|_| poisoned())?;
        let mut names: Vec<String> = data.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
