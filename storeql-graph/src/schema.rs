use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};
use serde_json::Value;
use storeql_core::{CatalogConfig, DocumentCollection, SearchIndex, StoreError};
use tracing::warn;
use uuid::Uuid;

use crate::product::Product;

pub type StoreqlSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Store, search, and catalog config become schema context data, injected
/// once here and never re-derived inside a resolver.
pub fn build_schema(
    store: Arc<dyn DocumentCollection>,
    search: Arc<dyn SearchIndex>,
    config: CatalogConfig,
) -> StoreqlSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .data(search)
        .data(config)
        .finish()
}

/// Log for the operator, then hand the failure to the engine unchanged apart
/// from a machine-readable code extension.
fn store_failure(operation: &'static str, err: StoreError) -> async_graphql::Error {
    warn!(operation, error = %err, "store call failed");
    let code = err.code();
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code))
}

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    async fn get_product(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<Product> {
        let store = ctx.data_unchecked::<Arc<dyn DocumentCollection>>();
        let fields = store
            .get(&id)
            .await
            .map_err(|e| store_failure("getProduct", e))?;
        Ok(Product::from_doc(fields))
    }

    async fn get_all_products_with_term(
        &self,
        ctx: &Context<'_>,
        term: String,
    ) -> async_graphql::Result<Vec<Product>> {
        let store = ctx.data_unchecked::<Arc<dyn DocumentCollection>>();
        let search = ctx.data_unchecked::<Arc<dyn SearchIndex>>();
        let config = ctx.data_unchecked::<CatalogConfig>();

        let ids = search
            .matching_ids(&term, config.search_limit)
            .await
            .map_err(|e| store_failure("getAllProductsWithTerm", e))?;

        // Output order is the index's relevance order. A hit whose record is
        // gone by fetch time fails the whole operation; no partial results.
        let mut products = Vec::with_capacity(ids.len());
        for id in &ids {
            let fields = store
                .get(id)
                .await
                .map_err(|e| store_failure("getAllProductsWithTerm", e))?;
            products.push(Product::from_doc(fields));
        }
        Ok(products)
    }
}

pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        product: Product,
    ) -> async_graphql::Result<Product> {
        let store = ctx.data_unchecked::<Arc<dyn DocumentCollection>>();
        let key = Uuid::new_v4().to_string();
        store
            .insert(&key, product.to_doc())
            .await
            .map_err(|e| store_failure("createProduct", e))?;
        // Echoes the input; the generated key is not part of the response
        // shape.
        Ok(product)
    }

    async fn delete_product(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<bool> {
        let store = ctx.data_unchecked::<Arc<dyn DocumentCollection>>();
        store
            .remove(&id)
            .await
            .map_err(|e| store_failure("deleteProduct", e))?;
        Ok(true)
    }

    async fn update_product(
        &self,
        ctx: &Context<'_>,
        id: String,
        product: Product,
    ) -> async_graphql::Result<Product> {
        let store = ctx.data_unchecked::<Arc<dyn DocumentCollection>>();
        store
            .replace(&id, product.to_doc())
            .await
            .map_err(|e| store_failure("updateProduct", e))?;
        Ok(product)
    }

    async fn set_quantity(
        &self,
        ctx: &Context<'_>,
        id: String,
        quantity: i32,
    ) -> async_graphql::Result<bool> {
        let store = ctx.data_unchecked::<Arc<dyn DocumentCollection>>();
        store
            .replace_field(&id, "quantity", Value::from(quantity))
            .await
            .map_err(|e| store_failure("setQuantity", e))?;
        Ok(true)
    }
}
