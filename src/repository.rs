//! Generic CRUD and cursor pagination over one [`KvStore`] table.
//!
//! Every failure leaves the repository as a [`Problem`]: the store or codec error is wrapped
//! exactly once, with a short client-facing detail. Nothing is retried.

use crate::context::Context;
use crate::error::StoreError;
use crate::problem::Problem;
use crate::store::{from_item, is_point_key, key_id, to_item, Key, KvStore, ScanRequest};
use axum::http::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;

const ERR_MARSHAL_ITEM: &str = "failed to marshal item";
const ERR_FETCHING_ITEMS: &str = "failed to fetch items";
const ERR_FETCHING_ITEM: &str = "failed to fetch item";
const ERR_CREATING_ITEM: &str = "failed to create item";
const ERR_UPDATING_ITEM: &str = "failed to update item";
const ERR_DELETING_ITEM: &str = "failed to delete item";
const ERR_UNMARSHAL_ITEMS: &str = "failed to unmarshal items";
const ERR_UNMARSHAL_ITEM: &str = "failed to unmarshal item";

const INTERNAL: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// One page of a scan.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Pass back as the cursor of the next `list` call; `None` once the table is exhausted.
    pub next_cursor: Option<Key>,
    pub scanned_count: i32,
}

/// Typed access to the items of one table. Cheap to clone; holds no mutable state.
pub struct Repository<T> {
    store: Arc<dyn KvStore>,
    table_name: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            table_name: self.table_name.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("table_name", &self.table_name)
            .finish_non_exhaustive()
    }
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(store: Arc<dyn KvStore>, table_name: impl Into<String>) -> Self {
        Self {
            store,
            table_name: table_name.into(),
            _item: PhantomData,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Scans up to `limit` items, resuming after `cursor` (`None` or empty: from the start).
    /// A non-empty cursor must be a point key.
    /// The backend may return fewer than `limit` items before the end of the table.
    pub async fn list(
        &self,
        ctx: &Context,
        limit: i32,
        cursor: Option<Key>,
    ) -> Result<Page<T>, Problem> {
        if limit < 1 {
            return Err(Problem::bad_request(format!(
                "limit must be at least 1, got {}",
                limit
            )));
        }

        let cursor = cursor.filter(|k| !k.is_empty());
        if let Some(key) = &cursor {
            self.check_key(key)?;
        }

        let request = ScanRequest {
            table_name: self.table_name.clone(),
            limit,
            exclusive_start_key: cursor,
        };
        let page = ctx
            .run(|| self.store.scan(request))
            .await
            .map_err(|e| self.fail("list", INTERNAL, ERR_FETCHING_ITEMS, e))?;

        let items = page
            .items
            .iter()
            .map(from_item)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| self.fail("list", INTERNAL, ERR_UNMARSHAL_ITEMS, e))?;

        Ok(Page {
            items,
            next_cursor: page.last_evaluated_key.filter(|k| !k.is_empty()),
            scanned_count: page.scanned_count,
        })
    }

    /// `Ok(None)` when nothing is stored under `key`.
    pub async fn get(&self, ctx: &Context, key: Key) -> Result<Option<T>, Problem> {
        self.check_key(&key)?;

        let item = ctx
            .run(|| self.store.get_item(&self.table_name, key))
            .await
            .map_err(|e| self.fail("get", INTERNAL, ERR_FETCHING_ITEM, e))?;

        item.map(|item| from_item(&item))
            .transpose()
            .map_err(|e| self.fail("get", INTERNAL, ERR_UNMARSHAL_ITEM, e))
    }

    /// Unconditional put. The identity field must already be set; an existing item under the
    /// same key is replaced.
    pub async fn create(&self, ctx: &Context, item: &T) -> Result<(), Problem> {
        self.put("create", ERR_CREATING_ITEM, ctx, item).await
    }

    /// Insert-or-replace with no precondition on the key existing.
    pub async fn update(&self, ctx: &Context, item: &T) -> Result<(), Problem> {
        self.put("update", ERR_UPDATING_ITEM, ctx, item).await
    }

    /// Deleting an absent key succeeds.
    pub async fn delete(&self, ctx: &Context, key: Key) -> Result<(), Problem> {
        self.check_key(&key)?;

        ctx.run(|| self.store.delete_item(&self.table_name, key))
            .await
            .map_err(|e| self.fail("delete", INTERNAL, ERR_DELETING_ITEM, e))
    }

    async fn put(
        &self,
        op: &'static str,
        write_error: &'static str,
        ctx: &Context,
        item: &T,
    ) -> Result<(), Problem> {
        let record = to_item(item)
            .and_then(|record| {
                if key_id(&record).is_some_and(|id| !id.is_empty()) {
                    Ok(record)
                } else {
                    Err(StoreError::marshal("item has no partition key"))
                }
            })
            .map_err(|e| self.fail(op, StatusCode::BAD_REQUEST, ERR_MARSHAL_ITEM, e))?;

        ctx.run(|| self.store.put_item(&self.table_name, record))
            .await
            .map_err(|e| self.fail(op, INTERNAL, write_error, e))
    }

    fn check_key(&self, key: &Key) -> Result<(), Problem> {
        if is_point_key(key) {
            Ok(())
        } else {
            Err(Problem::bad_request("key must hold exactly the partition attribute")
                .with_detail("invalid key"))
        }
    }

    fn fail(
        &self,
        op: &'static str,
        status: StatusCode,
        message: &'static str,
        err: StoreError,
    ) -> Problem {
        if status.is_server_error() {
            tracing::error!(table = %self.table_name, op, error = %err, "{}", message);
        } else {
            tracing::warn!(table = %self.table_name, op, error = %err, "{}", message);
        }
        Problem::wrap(err, status, message).with_detail(message)
    }
}
