//! dynamo-crud: generic DynamoDB repository, RFC 7807 problem errors and ULID ids, with an axum
//! CRUD surface on top.

pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod id;
pub mod logging;
pub mod middleware;
pub mod problem;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{load_from_env, load_with, validate, AppConfig, ServerConfig, StoreConfig};
pub use context::Context;
pub use entity::{Entity, Website};
pub use error::{ConfigError, StoreError};
pub use id::IdGenerator;
pub use problem::{to_problem, Problem, CONTENT_TYPE_PROBLEM};
pub use repository::{Page, Repository};
pub use response::ListResponse;
pub use routes::{app, common_routes, common_routes_with_ready, entity_routes};
pub use state::AppState;
pub use store::{k1, DynamoDbStore, InMemoryStore, Item, Key, KvStore};
