pub mod config;
pub mod error;
pub mod testing;

pub use config::CatalogConfig;
pub use error::{Result, StoreError};

use serde_json::Value;

/// A stored record: a bag of named JSON fields. The store key is tracked
/// separately and is never a field of the record itself.
pub type Doc = serde_json::Map<String, Value>;

#[async_trait::async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Fetch the record at `id`. `NotFound` when the key is absent.
    async fn get(&self, id: &str) -> Result<Doc>;
    /// Write a new record at `id`. `AlreadyExists` when the key is taken.
    async fn insert(&self, id: &str, fields: Doc) -> Result<()>;
    /// Replace the whole record at `id`, not a merge. `NotFound` when absent.
    async fn replace(&self, id: &str, fields: Doc) -> Result<()>;
    /// Remove the record at `id`. `NotFound` when absent.
    async fn remove(&self, id: &str) -> Result<()>;
    /// Sub-document patch: overwrite one named field, leaving the rest of the
    /// record untouched. `NotFound` when the key or the field path is absent.
    async fn replace_field(&self, id: &str, path: &str, value: Value) -> Result<()>;
}

#[async_trait::async_trait]
pub trait SearchIndex: Send + Sync {
    /// Keys of records matching `term`, in the backend's relevance order,
    /// at most `limit` of them.
    async fn matching_ids(&self, term: &str, limit: usize) -> Result<Vec<String>>;
}
