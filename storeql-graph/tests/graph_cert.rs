use std::sync::Arc;

use serde_json::{json, Value};
use storeql_core::{CatalogConfig, Doc, DocumentCollection, SearchIndex};
use storeql_graph::{build_schema, StoreqlSchema};
use storeql_memory::MemoryStore;

fn harness() -> (Arc<MemoryStore>, StoreqlSchema) {
    let store = Arc::new(MemoryStore::new());
    let schema = build_schema(
        Arc::clone(&store) as Arc<dyn DocumentCollection>,
        Arc::clone(&store) as Arc<dyn SearchIndex>,
        CatalogConfig::default(),
    );
    (store, schema)
}

fn product_doc(name: &str, price: f64, quantity: i64, tags: &[&str]) -> Doc {
    let mut fields = Doc::new();
    fields.insert("name".to_string(), json!(name));
    fields.insert("price".to_string(), json!(price));
    fields.insert("quantity".to_string(), json!(quantity));
    fields.insert("tags".to_string(), json!(tags));
    fields
}

async fn data(schema: &StoreqlSchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

/// Executes a query expected to fail and returns (message, code extension).
async fn failure(schema: &StoreqlSchema, query: &str) -> (String, Value) {
    let response = schema.execute(query).await;
    assert_eq!(response.errors.len(), 1, "expected exactly one error");
    let error = serde_json::to_value(&response.errors[0]).unwrap();
    (
        response.errors[0].message.clone(),
        error["extensions"]["code"].clone(),
    )
}

#[tokio::test]
async fn get_product_returns_stored_fields() {
    let (store, schema) = harness();
    store
        .insert("p-1", product_doc("lamp", 12.5, 3, &["light"]))
        .await
        .unwrap();

    let result = data(
        &schema,
        r#"{ getProduct(id: "p-1") { name price quantity tags } }"#,
    )
    .await;
    assert_eq!(
        result,
        json!({ "getProduct": {
            "name": "lamp", "price": 12.5, "quantity": 3, "tags": ["light"]
        }})
    );
}

#[tokio::test]
async fn get_product_missing_key_is_not_found() {
    let (_store, schema) = harness();
    let (message, code) = failure(&schema, r#"{ getProduct(id: "nope") { name } }"#).await;
    assert!(message.contains("Not found"));
    assert_eq!(code, json!("NOT_FOUND"));
}

#[tokio::test]
async fn create_product_echoes_the_input_without_a_key() {
    let (store, schema) = harness();
    let result = data(
        &schema,
        r#"mutation {
            createProduct(product: { name: "Gema", price: 1.5, quantity: 3, tags: ["new"] }) {
                name price quantity tags
            }
        }"#,
    )
    .await;
    assert_eq!(
        result,
        json!({ "createProduct": {
            "name": "Gema", "price": 1.5, "quantity": 3, "tags": ["new"]
        }})
    );

    // The record landed under a generated key, discoverable via search.
    let ids = store.matching_ids("gema", 2).await.unwrap();
    assert_eq!(ids.len(), 1);
}

#[tokio::test]
async fn create_product_round_trips_through_the_store() {
    let (store, schema) = harness();
    data(
        &schema,
        r#"mutation {
            createProduct(product: { name: "turntable", price: 89.5, quantity: 2, tags: ["audio"] }) { name }
        }"#,
    )
    .await;

    let id = store.matching_ids("turntable", 2).await.unwrap().remove(0);
    let fields = store.get(&id).await.unwrap();
    assert_eq!(fields.get("name").unwrap(), &json!("turntable"));
    assert_eq!(fields.get("price").unwrap(), &json!(89.5));
    assert_eq!(fields.get("quantity").unwrap(), &json!(2));
    assert_eq!(fields.get("tags").unwrap(), &json!(["audio"]));
}

#[tokio::test]
async fn update_product_replaces_the_whole_record() {
    let (store, schema) = harness();
    store
        .insert("p-up", product_doc("desk", 120.5, 2, &["wood"]))
        .await
        .unwrap();

    let result = data(
        &schema,
        r#"mutation {
            updateProduct(id: "p-up", product: { name: "standing desk" }) { name price }
        }"#,
    )
    .await;
    assert_eq!(
        result,
        json!({ "updateProduct": { "name": "standing desk", "price": null } })
    );

    // Full replace, not a merge: the omitted fields are gone from the store.
    let fields = store.get("p-up").await.unwrap();
    assert_eq!(fields.get("name").unwrap(), &json!("standing desk"));
    assert!(fields.get("price").is_none());
    assert!(fields.get("quantity").is_none());
    assert!(fields.get("tags").is_none());
}

#[tokio::test]
async fn update_product_missing_key_is_not_found() {
    let (_store, schema) = harness();
    let (message, code) = failure(
        &schema,
        r#"mutation { updateProduct(id: "nope", product: { name: "x" }) { name } }"#,
    )
    .await;
    assert!(message.contains("Not found"));
    assert_eq!(code, json!("NOT_FOUND"));
}

#[tokio::test]
async fn set_quantity_patches_only_quantity() {
    let (store, schema) = harness();
    store
        .insert("p-qty", product_doc("chair", 45.25, 10, &["office"]))
        .await
        .unwrap();

    let result = data(&schema, r#"mutation { setQuantity(id: "p-qty", quantity: 7) }"#).await;
    assert_eq!(result, json!({ "setQuantity": true }));

    let fields = store.get("p-qty").await.unwrap();
    assert_eq!(fields.get("quantity").unwrap(), &json!(7));
    assert_eq!(fields.get("name").unwrap(), &json!("chair"));
    assert_eq!(fields.get("price").unwrap(), &json!(45.25));
    assert_eq!(fields.get("tags").unwrap(), &json!(["office"]));
}

#[tokio::test]
async fn set_quantity_missing_key_is_not_found() {
    let (_store, schema) = harness();
    let (message, code) = failure(
        &schema,
        r#"mutation { setQuantity(id: "nope", quantity: 5) }"#,
    )
    .await;
    assert!(message.contains("Not found"));
    assert_eq!(code, json!("NOT_FOUND"));
}

#[tokio::test]
async fn set_quantity_missing_field_is_not_found() {
    let (store, schema) = harness();
    let mut fields = Doc::new();
    fields.insert("name".to_string(), json!("untracked"));
    store.insert("p-bare", fields).await.unwrap();

    let (message, code) = failure(
        &schema,
        r#"mutation { setQuantity(id: "p-bare", quantity: 5) }"#,
    )
    .await;
    assert!(message.contains("Not found"));
    assert_eq!(code, json!("NOT_FOUND"));
}

#[tokio::test]
async fn delete_product_then_get_is_not_found() {
    let (store, schema) = harness();
    store
        .insert("p-del", product_doc("stool", 19.5, 4, &[]))
        .await
        .unwrap();

    let result = data(&schema, r#"mutation { deleteProduct(id: "p-del") }"#).await;
    assert_eq!(result, json!({ "deleteProduct": true }));

    let (message, code) = failure(&schema, r#"{ getProduct(id: "p-del") { name } }"#).await;
    assert!(message.contains("Not found"));
    assert_eq!(code, json!("NOT_FOUND"));
}

#[tokio::test]
async fn delete_product_missing_key_is_not_found() {
    let (_store, schema) = harness();
    let (message, code) = failure(&schema, r#"mutation { deleteProduct(id: "nope") }"#).await;
    assert!(message.contains("Not found"));
    assert_eq!(code, json!("NOT_FOUND"));
}

#[tokio::test]
async fn search_caps_results_at_the_configured_limit() {
    let (store, schema) = harness();
    storeql_core::testing::seed_search_data(store.as_ref()).await;

    let result = data(
        &schema,
        r#"{ getAllProductsWithTerm(term: "usb") { name } }"#,
    )
    .await;
    let products = result["getAllProductsWithTerm"].as_array().unwrap();
    assert_eq!(products.len(), 2, "three records match but the cap is two");
}

#[tokio::test]
async fn search_returns_relevance_order() {
    let (store, schema) = harness();
    storeql_core::testing::seed_search_data(store.as_ref()).await;

    let result = data(
        &schema,
        r#"{ getAllProductsWithTerm(term: "wireless") { name } }"#,
    )
    .await;
    assert_eq!(
        result,
        json!({ "getAllProductsWithTerm": [
            { "name": "wireless headset" },
            { "name": "wireless mouse" }
        ]})
    );
}

#[tokio::test]
async fn search_unmatched_term_is_empty() {
    let (store, schema) = harness();
    storeql_core::testing::seed_search_data(store.as_ref()).await;

    let result = data(
        &schema,
        r#"{ getAllProductsWithTerm(term: "zeppelin") { name } }"#,
    )
    .await;
    assert_eq!(result, json!({ "getAllProductsWithTerm": [] }));
}

#[tokio::test]
async fn sdl_exposes_the_wire_contract() {
    let (_store, schema) = harness();
    let sdl = schema.sdl();

    for expected in [
        "getProduct(id: String!): Product!",
        "getAllProductsWithTerm(term: String!): [Product!]!",
        "createProduct(product: ProductInput!): Product!",
        "deleteProduct(id: String!): Boolean!",
        "updateProduct(id: String!, product: ProductInput!): Product!",
        "setQuantity(id: String!, quantity: Int!): Boolean!",
        "type Product",
        "input ProductInput",
        "type Query",
        "type Mutation",
    ] {
        assert!(sdl.contains(expected), "SDL is missing `{expected}`:\n{sdl}");
    }

    for field in ["name: String", "price: Float", "quantity: Int", "tags: [String!]"] {
        assert!(sdl.contains(field), "SDL is missing `{field}`:\n{sdl}");
    }
}
