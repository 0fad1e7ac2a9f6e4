//! Websites service: CRUD for `Website` entities over DynamoDB.
//!
//! Run from repo root: `cargo run -p websites-api`
//! Requires `TABLE_NAME`; see `dynamo_crud::config::loader` for the other variables.

use aws_config::BehaviorVersion;
use dynamo_crud::{app, load_from_env, AppState, DynamoDbStore, IdGenerator, Repository, Website};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    dynamo_crud::logging::init();

    let config = load_from_env()?;
    let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let store = DynamoDbStore::new(&sdk_config, &config.store);
    tracing::info!(
        table = %config.store.table_name,
        endpoint = ?config.store.endpoint,
        "using dynamodb"
    );

    let repo: Repository<Website> =
        Repository::new(Arc::new(store), config.store.table_name.clone());
    let state = AppState::new(repo, Arc::new(IdGenerator::new()), &config.server);
    let app = app(state, config.server.max_body_bytes);

    let listener = TcpListener::bind(&config.server.bind_addr).await?;
    tracing::info!("websites-api listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
