//! Partition query engine.
//!
//! Thin, stateless layer over a [`DocumentStore`] that every read path goes
//! through. It owns the composite-key prefix rule: a prefix query for `"1"`
//! asks the store for sort keys beginning with `"1#"`, so partitions holding
//! both semester 1 and semester 10 never bleed into each other.

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::collection::Collection;
use crate::document::{composite_prefix, decode, Document, Key, KeyValue};
use crate::error::StoreResult;
use crate::expr::{Direction, Filter, SortCondition};
use crate::store::DocumentStore;

pub struct QueryEngine;

impl QueryEngine {
    /// All documents of a partition in ascending sort-key order.
    #[instrument(skip(store))]
    pub async fn query_by_partition(
        store: &dyn DocumentStore,
        collection: Collection,
        partition: &KeyValue,
    ) -> StoreResult<Vec<Document>> {
        store
            .query(collection, partition, None, Direction::Forward)
            .await
    }

    /// All documents of a partition, newest sort key first.
    #[instrument(skip(store))]
    pub async fn query_by_partition_desc(
        store: &dyn DocumentStore,
        collection: Collection,
        partition: &KeyValue,
    ) -> StoreResult<Vec<Document>> {
        store
            .query(collection, partition, None, Direction::Backward)
            .await
    }

    /// Documents whose composite sort key's first field equals `sort_prefix`.
    #[instrument(skip(store))]
    pub async fn query_by_partition_and_sort_prefix(
        store: &dyn DocumentStore,
        collection: Collection,
        partition: &KeyValue,
        sort_prefix: &str,
    ) -> StoreResult<Vec<Document>> {
        let condition = SortCondition::BeginsWith(composite_prefix(sort_prefix));
        store
            .query(collection, partition, Some(&condition), Direction::Forward)
            .await
    }

    #[instrument(skip(store))]
    pub async fn get_by_key(
        store: &dyn DocumentStore,
        collection: Collection,
        key: &Key,
    ) -> StoreResult<Option<Document>> {
        store.get(collection, key).await
    }

    /// Full-collection scan. An empty result is not an error.
    #[instrument(skip(store))]
    pub async fn scan_with_filter(
        store: &dyn DocumentStore,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Vec<Document>> {
        let filter = (!filter.is_empty()).then_some(filter);
        store.scan(collection, filter).await
    }

    /// Typed point read.
    pub async fn get_as<T: DeserializeOwned>(
        store: &dyn DocumentStore,
        collection: Collection,
        key: &Key,
    ) -> StoreResult<Option<T>> {
        Self::get_by_key(store, collection, key)
            .await?
            .map(decode)
            .transpose()
    }

    /// Typed partition query.
    pub async fn query_as<T: DeserializeOwned>(
        store: &dyn DocumentStore,
        collection: Collection,
        partition: &KeyValue,
    ) -> StoreResult<Vec<T>> {
        Self::query_by_partition(store, collection, partition)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Typed scan.
    pub async fn scan_as<T: DeserializeOwned>(
        store: &dyn DocumentStore,
        collection: Collection,
        filter: &Filter,
    ) -> StoreResult<Vec<T>> {
        Self::scan_with_filter(store, collection, filter)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    async fn results_store() -> MemoryStore {
        let store = MemoryStore::new();
        for sk in ["1#x", "10#y", "1#z"] {
            store
                .put(
                    Collection::Results,
                    doc(json!({"StudentID": "S1", "Semester#SubjectCode": sk})),
                    None,
                )
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_sort_prefix_excludes_longer_field_values() {
        let store = results_store().await;
        let rows =
            QueryEngine::query_by_partition_and_sort_prefix(&store, Collection::Results, &"S1".into(), "1")
                .await
                .unwrap();

        let keys: Vec<_> = rows
            .iter()
            .map(|r| r["Semester#SubjectCode"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["1#x", "1#z"]);
    }

    #[tokio::test]
    async fn test_partition_query_descending() {
        let store = results_store().await;
        let rows = QueryEngine::query_by_partition_desc(&store, Collection::Results, &"S1".into())
            .await
            .unwrap();
        let keys: Vec<_> = rows
            .iter()
            .map(|r| r["Semester#SubjectCode"].as_str().unwrap().to_string())
            .collect();
        // '#' sorts below '0', so "10#y" is the largest key.
        assert_eq!(keys, vec!["10#y", "1#z", "1#x"]);
    }

    #[tokio::test]
    async fn test_query_unknown_partition_is_empty() {
        let store = results_store().await;
        let rows = QueryEngine::query_by_partition(&store, Collection::Results, &"S9".into())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_scan_with_no_matches_succeeds() {
        let store = MemoryStore::new();
        let rows = QueryEngine::scan_with_filter(
            &store,
            Collection::Student,
            &Filter::new().eq("Section", "Z"),
        )
        .await
        .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_get_as_decodes_record() {
        #[derive(serde::Deserialize)]
        struct Student {
            #[serde(rename = "StudentID")]
            student_id: String,
        }

        let store = MemoryStore::new();
        store
            .put(Collection::Student, doc(json!({"StudentID": "S1"})), None)
            .await
            .unwrap();
        let student: Student = QueryEngine::get_as(&store, Collection::Student, &Key::partition("S1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.student_id, "S1");
    }
}
