use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use storeql_core::Doc;

/// The catalog entry on the wire, doubling as the `ProductInput` input type.
/// Every field is optional; the store key is tracked separately and is never
/// a field. Fields omitted from input stay absent in the stored record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "ProductInput")]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Product {
    pub fn to_doc(&self) -> Doc {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(fields)) => fields,
            _ => Doc::new(),
        }
    }

    /// Lenient read: unknown stored fields are ignored, malformed ones read
    /// back empty.
    pub fn from_doc(fields: Doc) -> Self {
        serde_json::from_value(serde_json::Value::Object(fields)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omitted_fields_are_absent_in_the_doc() {
        let product = Product {
            name: Some("lamp".to_string()),
            ..Product::default()
        };
        let fields = product.to_doc();
        assert_eq!(fields.get("name").unwrap(), &json!("lamp"));
        assert!(fields.get("price").is_none());
        assert!(fields.get("quantity").is_none());
        assert!(fields.get("tags").is_none());
    }

    #[test]
    fn doc_round_trip_preserves_fields() {
        let product = Product {
            name: Some("lamp".to_string()),
            price: Some(12.5),
            quantity: Some(3),
            tags: Some(vec!["light".to_string(), "desk".to_string()]),
        };
        assert_eq!(Product::from_doc(product.to_doc()), product);
    }

    #[test]
    fn unknown_stored_fields_are_ignored() {
        let mut fields = Doc::new();
        fields.insert("name".to_string(), json!("lamp"));
        fields.insert("warehouse".to_string(), json!("east"));
        let product = Product::from_doc(fields);
        assert_eq!(product.name.as_deref(), Some("lamp"));
    }
}
