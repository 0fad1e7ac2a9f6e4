//! Amazon DynamoDB backend.

use super::{Item, Key, KvStore, ScanPage, ScanRequest};
use crate::config::StoreConfig;
use crate::error::StoreError;
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::Client;
use aws_smithy_types::timeout::TimeoutConfig;
use std::time::Duration;

#[derive(Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl std::fmt::Debug for DynamoDbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoDbStore").finish_non_exhaustive()
    }
}

impl DynamoDbStore {
    /// Builds a client from the shared SDK config (HTTP client, retry config, credentials),
    /// then applies region, endpoint and timeout overrides from `config`.
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &StoreConfig) -> Self {
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);

        if let Some(region) = &config.region {
            builder = builder.region(aws_sdk_dynamodb::config::Region::new(region.clone()));
        }

        // DynamoDB Local / SAM local
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        if let Some(timeout_ms) = config.timeout_ms {
            let timeout_config = TimeoutConfig::builder()
                .operation_timeout(Duration::from_millis(timeout_ms))
                .build();
            builder = builder.timeout_config(timeout_config);
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn backend_error<E>(op: &'static str, err: E) -> StoreError
where
    E: std::error::Error,
{
    StoreError::backend(op, DisplayErrorContext(err).to_string())
}

#[async_trait]
impl KvStore for DynamoDbStore {
    async fn scan(&self, request: ScanRequest) -> Result<ScanPage, StoreError> {
        tracing::debug!(table = %request.table_name, limit = request.limit, "dynamodb scan");
        let out = self
            .client
            .scan()
            .table_name(&request.table_name)
            .limit(request.limit)
            .set_exclusive_start_key(request.exclusive_start_key.filter(|k| !k.is_empty()))
            .send()
            .await
            .map_err(|e| backend_error("Scan", e))?;

        Ok(ScanPage {
            items: out.items().to_vec(),
            last_evaluated_key: out.last_evaluated_key().filter(|k| !k.is_empty()).cloned(),
            scanned_count: out.scanned_count(),
        })
    }

    async fn get_item(&self, table_name: &str, key: Key) -> Result<Option<Item>, StoreError> {
        tracing::debug!(table = %table_name, "dynamodb get_item");
        let out = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| backend_error("GetItem", e))?;

        Ok(out.item().filter(|item| !item.is_empty()).cloned())
    }

    async fn put_item(&self, table_name: &str, item: Item) -> Result<(), StoreError> {
        tracing::debug!(table = %table_name, "dynamodb put_item");
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| backend_error("PutItem", e))?;
        Ok(())
    }

    async fn delete_item(&self, table_name: &str, key: Key) -> Result<(), StoreError> {
        tracing::debug!(table = %table_name, "dynamodb delete_item");
        self.client
            .delete_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| backend_error("DeleteItem", e))?;
        Ok(())
    }
}
