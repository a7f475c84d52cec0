use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::schema::StoreqlSchema;

#[derive(Clone)]
struct GraphState {
    schema: StoreqlSchema,
}

/// Axum router serving the schema over POST at the given path.
pub fn graphql_router(path: &str, schema: StoreqlSchema) -> Router {
    Router::new()
        .route(path, post(execute_handler))
        .with_state(GraphState { schema })
}

async fn execute_handler(State(state): State<GraphState>, body: Bytes) -> Response {
    let request: async_graphql::Request = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": [{ "message": e.to_string() }] })),
            )
                .into_response();
        }
    };

    let response = state.schema.execute(request).await;
    let body = json!({
        "data": response.data,
        "errors": if response.errors.is_empty() {
            Value::Null
        } else {
            serde_json::to_value(&response.errors).unwrap_or(Value::Null)
        },
    });
    Json(body).into_response()
}
