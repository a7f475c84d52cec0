use bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use storeql_core::{CatalogConfig, Result, SearchIndex, StoreError};
use tracing::debug;

/// Term search over the product collection's text index, returning store keys
/// in relevance order. The serving path assumes the index already exists.
pub struct MongoSearchIndex {
    collection: Collection<Document>,
    index_name: String,
}

impl MongoSearchIndex {
    pub async fn connect(uri: &str, config: &CatalogConfig) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::Search(e.to_string()))?;
        let collection = client
            .database(&config.bucket)
            .collection::<Document>(&config.namespace());
        Ok(Self {
            collection,
            index_name: config.search_index.clone(),
        })
    }

    /// Harness affordance: create the backing text index over the searchable
    /// fields. Production deployments maintain the index out of band.
    pub async fn ensure_index(&self) -> Result<()> {
        let options = IndexOptions::builder()
            .name(self.index_name.clone())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "name": "text", "tags": "text" })
            .options(options)
            .build();
        self.collection
            .create_index(model)
            .await
            .map_err(|e| StoreError::Search(e.to_string()))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SearchIndex for MongoSearchIndex {
    async fn matching_ids(&self, term: &str, limit: usize) -> Result<Vec<String>> {
        debug!(term, limit, index = %self.index_name, "text search");

        let mut cursor = self
            .collection
            .find(doc! { "$text": { "$search": term } })
            .projection(doc! { "_id": 1, "score": { "$meta": "textScore" } })
            .sort(doc! { "score": { "$meta": "textScore" } })
            .limit(limit as i64)
            .await
            .map_err(|e| StoreError::Search(e.to_string()))?;

        let mut ids = Vec::new();
        while cursor
            .advance()
            .await
            .map_err(|e| StoreError::Search(e.to_string()))?
        {
            let document = cursor
                .deserialize_current()
                .map_err(|e| StoreError::Search(e.to_string()))?;
            if let Ok(id) = document.get_str("_id") {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }
}
