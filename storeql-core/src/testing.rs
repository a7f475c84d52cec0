use crate::{Doc, DocumentCollection, SearchIndex, StoreError};
use serde_json::json;

fn product(name: &str, price: f64, quantity: i64, tags: &[&str]) -> Doc {
    let mut fields = Doc::new();
    fields.insert("name".to_string(), json!(name));
    fields.insert("price".to_string(), json!(price));
    fields.insert("quantity".to_string(), json!(quantity));
    fields.insert("tags".to_string(), json!(tags));
    fields
}

// ---- Collection Certification Tests ----

pub async fn test_get_returns_inserted_fields(store: &dyn DocumentCollection) {
    store
        .insert("cert-rt", product("lamp", 12.5, 3, &["light"]))
        .await
        .unwrap();

    let fields = store.get("cert-rt").await.unwrap();
    assert_eq!(fields.get("name").unwrap(), &json!("lamp"));
    assert_eq!(fields.get("price").unwrap(), &json!(12.5));
    assert_eq!(fields.get("quantity").unwrap(), &json!(3));
    assert_eq!(fields.get("tags").unwrap(), &json!(["light"]));
}

pub async fn test_replace_is_full_not_merge(store: &dyn DocumentCollection) {
    store
        .insert("cert-replace", product("desk", 120.5, 2, &["wood"]))
        .await
        .unwrap();

    let mut slim = Doc::new();
    slim.insert("name".to_string(), json!("standing desk"));
    store.replace("cert-replace", slim).await.unwrap();

    let fields = store.get("cert-replace").await.unwrap();
    assert_eq!(fields.get("name").unwrap(), &json!("standing desk"));
    assert!(fields.get("price").is_none(), "replace must drop old fields");
    assert!(fields.get("quantity").is_none());
    assert!(fields.get("tags").is_none());
}

pub async fn test_patch_leaves_other_fields(store: &dyn DocumentCollection) {
    store
        .insert("cert-patch", product("chair", 45.25, 10, &["office"]))
        .await
        .unwrap();

    store
        .replace_field("cert-patch", "quantity", json!(7))
        .await
        .unwrap();

    let fields = store.get("cert-patch").await.unwrap();
    assert_eq!(fields.get("quantity").unwrap(), &json!(7));
    assert_eq!(fields.get("name").unwrap(), &json!("chair"));
    assert_eq!(fields.get("price").unwrap(), &json!(45.25));
    assert_eq!(fields.get("tags").unwrap(), &json!(["office"]));
}

pub async fn test_remove_is_final(store: &dyn DocumentCollection) {
    store
        .insert("cert-remove", product("stool", 19.5, 4, &[]))
        .await
        .unwrap();

    store.remove("cert-remove").await.unwrap();

    let err = store.get("cert-remove").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

pub async fn test_get_missing_key_is_not_found(store: &dyn DocumentCollection) {
    let err = store.get("cert-absent").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

pub async fn test_replace_missing_key_is_not_found(store: &dyn DocumentCollection) {
    let err = store
        .replace("cert-absent", product("ghost", 1.5, 1, &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

pub async fn test_remove_missing_key_is_not_found(store: &dyn DocumentCollection) {
    let err = store.remove("cert-absent").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

pub async fn test_patch_missing_key_is_not_found(store: &dyn DocumentCollection) {
    let err = store
        .replace_field("cert-absent", "quantity", json!(5))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

pub async fn test_patch_missing_field_is_not_found(store: &dyn DocumentCollection) {
    let mut fields = Doc::new();
    fields.insert("name".to_string(), json!("no quantity here"));
    store.insert("cert-no-qty", fields).await.unwrap();

    let err = store
        .replace_field("cert-no-qty", "quantity", json!(5))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

pub async fn test_insert_collision_is_already_exists(store: &dyn DocumentCollection) {
    store
        .insert("cert-twice", product("first", 1.5, 1, &[]))
        .await
        .unwrap();

    let err = store
        .insert("cert-twice", product("second", 2.5, 2, &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(_)));
}

// ---- Search Certification Tests ----

/// Seeds records whose relevance order for "wireless" (gamma > beta > alpha)
/// is the reverse of both insertion order and alphabetical key order, plus
/// three records matching "usb" to exercise the result cap.
pub async fn seed_search_data(store: &dyn DocumentCollection) {
    store
        .insert("alpha-keyboard", product("keyboard", 49.5, 10, &["wireless"]))
        .await
        .unwrap();
    store
        .insert(
            "beta-mouse",
            product("wireless mouse", 24.5, 30, &["wireless"]),
        )
        .await
        .unwrap();
    store
        .insert(
            "gamma-headset",
            product(
                "wireless headset",
                149.5,
                5,
                &["wireless", "wireless earbuds"],
            ),
        )
        .await
        .unwrap();

    store
        .insert("usb-hub", product("usb hub", 19.5, 3, &["usb"]))
        .await
        .unwrap();
    store
        .insert("usb-cable", product("usb cable", 9.5, 50, &["usb", "cable"]))
        .await
        .unwrap();
    store
        .insert("usb-dock", product("docking station", 89.5, 4, &["usb"]))
        .await
        .unwrap();
}

pub async fn test_search_respects_limit(index: &dyn SearchIndex) {
    let ids = index.matching_ids("usb", 2).await.unwrap();
    assert_eq!(ids.len(), 2, "three records match but the cap is two");
}

pub async fn test_search_orders_by_relevance(index: &dyn SearchIndex) {
    let ids = index.matching_ids("wireless", 3).await.unwrap();
    assert_eq!(
        ids,
        vec!["gamma-headset", "beta-mouse", "alpha-keyboard"],
        "order must be backend relevance, not insertion or alphabetical"
    );
}

pub async fn test_search_unmatched_term_is_empty(index: &dyn SearchIndex) {
    let ids = index.matching_ids("zeppelin", 2).await.unwrap();
    assert!(ids.is_empty());
}
