use bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, Collection};
use serde_json::Value;
use storeql_core::{CatalogConfig, Doc, DocumentCollection, Result, StoreError};
use tracing::debug;

use crate::convert::{doc_to_document, document_to_doc, json_to_bson};

/// Key-value document operations against one Mongo collection. The configured
/// bucket maps to the database and the scope-qualified collection name to the
/// collection; records carry the store key as `_id`.
pub struct MongoCollection {
    collection: Collection<Document>,
}

impl MongoCollection {
    pub async fn connect(uri: &str, config: &CatalogConfig) -> Result<Self> {
        let client = Client::with_uri_str(uri).await.map_err(storage)?;
        let collection = client
            .database(&config.bucket)
            .collection::<Document>(&config.namespace());
        debug!(
            bucket = %config.bucket,
            collection = %config.namespace(),
            "connected product collection"
        );
        Ok(Self { collection })
    }
}

fn storage(err: mongodb::error::Error) -> StoreError {
    StoreError::Storage(err.to_string())
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        &*err.kind,
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == 11000
    )
}

#[async_trait::async_trait]
impl DocumentCollection for MongoCollection {
    async fn get(&self, id: &str) -> Result<Doc> {
        let found = self
            .collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(storage)?;
        match found {
            Some(document) => Ok(document_to_doc(&document)),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn insert(&self, id: &str, fields: Doc) -> Result<()> {
        let mut document = doc_to_document(&fields);
        document.insert("_id", id);
        self.collection.insert_one(document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                StoreError::AlreadyExists(id.to_string())
            } else {
                storage(e)
            }
        })?;
        Ok(())
    }

    async fn replace(&self, id: &str, fields: Doc) -> Result<()> {
        let result = self
            .collection
            .replace_one(doc! { "_id": id }, doc_to_document(&fields))
            .await
            .map_err(storage)?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(storage)?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn replace_field(&self, id: &str, path: &str, value: Value) -> Result<()> {
        // The filter requires the field path to exist, so patching a missing
        // field classifies the same as a missing key.
        let mut filter = Document::new();
        filter.insert("_id", id);
        filter.insert(path, doc! { "$exists": true });

        let mut set = Document::new();
        set.insert(path, json_to_bson(&value));

        let result = self
            .collection
            .update_one(filter, doc! { "$set": set })
            .await
            .map_err(storage)?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound(format!("{id}.{path}")));
        }
        Ok(())
    }
}
