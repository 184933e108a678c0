//! MongoDB-backed document store

use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use futures_util::TryStreamExt;
use mongodb::{Client, Database};

use super::document::DocumentStore;
use super::errors::{StoreError, StoreResult};

/// A handle to one MongoDB database.
///
/// The driver pools connections internally; cloning shares the pool.
#[derive(Clone)]
pub struct MongoStore {
    client: Arc<Client>,
    database_name: String,
}

impl MongoStore {
    /// Create a client for `url` bound to `database_name`.
    ///
    /// The driver connects lazily, so success here only means the
    /// connection string parsed and a client exists.
    pub async fn connect(url: &str, database_name: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            database_name: database_name.to_string(),
        })
    }

    fn database(&self) -> Database {
        self.client.database(&self.database_name)
    }
}

/// String form of a store-assigned identifier
pub(crate) fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn database_name(&self) -> &str {
        &self.database_name
    }

    async fn ping(&self) -> StoreResult<()> {
        self.database()
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<String> {
        let coll = self.database().collection::<Document>(collection);
        let result = coll.insert_one(document).await?;
        Ok(id_to_string(result.inserted_id))
    }

    async fn find_many(&self, collection: &str, limit: i64) -> StoreResult<Vec<Document>> {
        let coll = self.database().collection::<Document>(collection);
        let cursor = coll.find(doc! {}).limit(limit).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let coll = self.database().collection::<Document>(collection);
        Ok(coll.find_one(doc! { "_id": oid }).await?)
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
        let coll = self.database().collection::<Document>(collection);
        let result = coll
            .update_one(doc! { "_id": oid }, doc! { "$set": fields })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.database().list_collection_names().await?)
    }
}
