use async_trait::async_trait;
use std::fmt::Debug;

use crate::collection::Collection;
use crate::document::{Document, Key, KeyValue};
use crate::error::StoreResult;
use crate::expr::{Condition, Direction, Filter, SortCondition, UpdateSet};

/// Result of a batch write. Items the backend could not accept are handed
/// back so the caller can report or resubmit them.
#[derive(Debug, Default)]
pub struct BatchPutOutcome {
    pub written: usize,
    pub unprocessed: Vec<Document>,
}

impl BatchPutOutcome {
    pub fn is_complete(&self) -> bool {
        self.unprocessed.is_empty()
    }
}

/// Partition/sort-key document store.
///
/// Implementations are shared across request handlers behind an `Arc` and
/// must tolerate unbounded concurrent use. Conditional writes are atomic
/// with respect to the item they address.
#[async_trait]
pub trait DocumentStore: Debug + Send + Sync {
    async fn get(&self, collection: Collection, key: &Key) -> StoreResult<Option<Document>>;

    /// Items of one partition in sort-key order, optionally narrowed by a
    /// sort condition.
    async fn query(
        &self,
        collection: Collection,
        partition: &KeyValue,
        sort: Option<&SortCondition>,
        direction: Direction,
    ) -> StoreResult<Vec<Document>>;

    /// Every item of the collection matching `filter`. Order is unspecified.
    async fn scan(&self, collection: Collection, filter: Option<&Filter>)
    -> StoreResult<Vec<Document>>;

    /// Writes a whole document. With a condition, fails with
    /// `StoreError::ConditionFailed` and leaves state untouched when the
    /// predicate does not hold.
    async fn put(
        &self,
        collection: Collection,
        document: Document,
        condition: Option<&Condition>,
    ) -> StoreResult<()>;

    /// Applies `SET` assignments to one item and returns the item as stored
    /// afterwards. Creates the item when absent unless the condition forbids it.
    async fn update(
        &self,
        collection: Collection,
        key: &Key,
        update: &UpdateSet,
        condition: Option<&Condition>,
    ) -> StoreResult<Document>;

    async fn delete(&self, collection: Collection, key: &Key) -> StoreResult<()>;

    async fn batch_put(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> StoreResult<BatchPutOutcome>;
}
