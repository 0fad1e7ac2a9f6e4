//! In-memory backend for local development and tests.
//!
//! Each table is a `BTreeMap` keyed by partition key, so scans run in ascending key order and
//! an exclusive start key resumes strictly after it. Tables spring into existence on first write;
//! reading an unknown table sees it empty.

use super::{k1, key_id, Item, Key, KvStore, ScanPage, ScanRequest};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::RwLock;

type Table = BTreeMap<String, Item>;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently stored in `table_name`.
    pub fn len(&self, table_name: &str) -> usize {
        self.tables
            .read()
            .map(|tables| tables.get(table_name).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, table_name: &str) -> bool {
        self.len(table_name) == 0
    }
}

fn lock_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::backend("lock", e.to_string())
}

fn point_id(op: &'static str, key: &Key) -> Result<String, StoreError> {
    key_id(key)
        .map(str::to_owned)
        .ok_or_else(|| StoreError::backend(op, "key is missing the partition attribute"))
}

#[async_trait]
impl KvStore for InMemoryStore {
    async fn scan(&self, request: ScanRequest) -> Result<ScanPage, StoreError> {
        let limit = usize::try_from(request.limit)
            .ok()
            .filter(|l| *l > 0)
            .ok_or_else(|| StoreError::backend("Scan", "limit must be at least 1"))?;
        let start = match request.exclusive_start_key.filter(|k| !k.is_empty()) {
            Some(key) => Some(point_id("Scan", &key)?),
            None => None,
        };

        let tables = self.tables.read().map_err(lock_error)?;
        let Some(table) = tables.get(&request.table_name) else {
            return Ok(ScanPage::default());
        };

        let lower = match &start {
            Some(s) => Bound::Excluded(s.as_str()),
            None => Bound::Unbounded,
        };
        let mut items: Vec<Item> = table
            .range::<str, _>((lower, Bound::Unbounded))
            .take(limit + 1)
            .map(|(_, item)| item.clone())
            .collect();

        let last_evaluated_key = if items.len() > limit {
            items.truncate(limit);
            items.last().and_then(key_id).map(k1)
        } else {
            None
        };

        Ok(ScanPage {
            scanned_count: items.len() as i32,
            items,
            last_evaluated_key,
        })
    }

    async fn get_item(&self, table_name: &str, key: Key) -> Result<Option<Item>, StoreError> {
        let id = point_id("GetItem", &key)?;
        let tables = self.tables.read().map_err(lock_error)?;
        Ok(tables.get(table_name).and_then(|t| t.get(&id)).cloned())
    }

    async fn put_item(&self, table_name: &str, item: Item) -> Result<(), StoreError> {
        let id = point_id("PutItem", &item)?;
        let mut tables = self.tables.write().map_err(lock_error)?;
        tables.entry(table_name.to_string()).or_default().insert(id, item);
        Ok(())
    }

    async fn delete_item(&self, table_name: &str, key: Key) -> Result<(), StoreError> {
        let id = point_id("DeleteItem", &key)?;
        let mut tables = self.tables.write().map_err(lock_error)?;
        if let Some(table) = tables.get_mut(table_name) {
            table.remove(&id);
        }
        Ok(())
    }
}
