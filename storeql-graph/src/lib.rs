mod product;
mod routes;
mod schema;

pub use product::Product;
pub use routes::graphql_router;
pub use schema::{build_schema, MutationRoot, QueryRoot, StoreqlSchema};
