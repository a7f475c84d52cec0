use std::env;

/// Where the product records live and how search against them is addressed.
///
/// Historically these were literals baked into every resolver call; they are
/// now read once at startup and passed down with the store handles.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Top namespacing level of the document store.
    pub bucket: String,
    /// Middle namespacing level, within the bucket.
    pub scope: String,
    /// The collection holding product records.
    pub collection: String,
    /// Name of the pre-existing full-text index over the collection.
    pub search_index: String,
    /// Result cap applied to every search query.
    pub search_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            bucket: "store-bucket".to_string(),
            scope: "products-scope".to_string(),
            collection: "products".to_string(),
            search_index: "index-products".to_string(),
            search_limit: 2,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by `STOREQL_*` environment variables where set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bucket: env::var("STOREQL_BUCKET").unwrap_or(defaults.bucket),
            scope: env::var("STOREQL_SCOPE").unwrap_or(defaults.scope),
            collection: env::var("STOREQL_COLLECTION").unwrap_or(defaults.collection),
            search_index: env::var("STOREQL_SEARCH_INDEX").unwrap_or(defaults.search_index),
            search_limit: env::var("STOREQL_SEARCH_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.search_limit),
        }
    }

    /// Scope-qualified collection name, for backends with fewer than three
    /// namespacing levels.
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.scope, self.collection)
    }
}
