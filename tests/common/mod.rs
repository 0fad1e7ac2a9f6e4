#![allow(dead_code)]

use async_trait::async_trait;
use dynamo_crud::config::ServerConfig;
use dynamo_crud::store::{Item, Key, KvStore, ScanPage, ScanRequest};
use dynamo_crud::{AppState, IdGenerator, Repository, StoreError, Website};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const TABLE: &str = "websites";

/// Backend that is always down. Counts how often it was reached.
#[derive(Debug, Default)]
pub struct FailingStore {
    calls: AtomicUsize,
}

impl FailingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self, op: &'static str) -> StoreError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StoreError::backend(op, "connection refused")
    }
}

#[async_trait]
impl KvStore for FailingStore {
    async fn scan(&self, _request: ScanRequest) -> Result<ScanPage, StoreError> {
        Err(self.fail("Scan"))
    }

    async fn get_item(&self, _table_name: &str, _key: Key) -> Result<Option<Item>, StoreError> {
        Err(self.fail("GetItem"))
    }

    async fn put_item(&self, _table_name: &str, _item: Item) -> Result<(), StoreError> {
        Err(self.fail("PutItem"))
    }

    async fn delete_item(&self, _table_name: &str, _key: Key) -> Result<(), StoreError> {
        Err(self.fail("DeleteItem"))
    }
}

pub fn website(id: &str, name: &str) -> Website {
    Website {
        id: id.into(),
        name: name.into(),
        ..Default::default()
    }
}

pub fn state(store: Arc<dyn KvStore>) -> AppState<Website> {
    AppState::new(
        Repository::new(store, TABLE),
        Arc::new(IdGenerator::new()),
        &ServerConfig::default(),
    )
}
