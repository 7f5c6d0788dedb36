//! In-process store used for local runs and tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::collection::Collection;
use crate::document::{Document, Key, KeyValue};
use crate::error::{StoreError, StoreResult};
use crate::expr::{Condition, Direction, Filter, SortCondition, UpdateSet};
use crate::store::{BatchPutOutcome, DocumentStore};

type Table = BTreeMap<Key, Document>;

/// Each collection is a `BTreeMap` ordered by (partition, sort), so partition
/// queries come back in key order. Conditional writes check and write under a
/// single write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Collection, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items held in a collection.
    pub fn len(&self, collection: Collection) -> usize {
        self.tables.read().get(&collection).map_or(0, Table::len)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }
}

/// Rewrites key attributes into their canonical encoding, so a numeric sort
/// key sent as `"3"` is stored as `3`.
fn normalize_keys(collection: Collection, key: &Key, document: &mut Document) {
    for (name, value) in key.attributes(collection) {
        document.insert(name.to_string(), value);
    }
}

fn partition_range<'a>(
    table: &'a Table,
    partition: &'a KeyValue,
) -> impl Iterator<Item = (&'a Key, &'a Document)> + 'a {
    let start = Key {
        partition: partition.clone(),
        sort: None,
    };
    table.range(start..).take_while(move |(k, _)| &k.partition == partition)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: Collection, key: &Key) -> StoreResult<Option<Document>> {
        let key = key.normalize(collection)?;
        Ok(self
            .tables
            .read()
            .get(&collection)
            .and_then(|t| t.get(&key))
            .cloned())
    }

    async fn query(
        &self,
        collection: Collection,
        partition: &KeyValue,
        sort: Option<&SortCondition>,
        direction: Direction,
    ) -> StoreResult<Vec<Document>> {
        let partition = Key {
            partition: partition.clone(),
            sort: None,
        }
        .normalize_partition(collection)?;
        let tables = self.tables.read();
        let Some(table) = tables.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut items: Vec<Document> = partition_range(table, &partition)
            .filter(|(k, _)| sort.is_none_or(|cond| cond.matches(k.sort.as_ref())))
            .map(|(_, doc)| doc.clone())
            .collect();

        if direction == Direction::Backward {
            items.reverse();
        }
        Ok(items)
    }

    async fn scan(
        &self,
        collection: Collection,
        filter: Option<&Filter>,
    ) -> StoreResult<Vec<Document>> {
        let tables = self.tables.read();
        Ok(tables
            .get(&collection)
            .map(|table| {
                table
                    .values()
                    .filter(|doc| filter.is_none_or(|f| f.matches(doc)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn put(
        &self,
        collection: Collection,
        mut document: Document,
        condition: Option<&Condition>,
    ) -> StoreResult<()> {
        let key = Key::from_document(collection, &document)?;
        normalize_keys(collection, &key, &mut document);

        let mut tables = self.tables.write();
        let table = tables.entry(collection).or_default();
        if let Some(cond) = condition {
            if !cond.evaluate(table.get(&key)) {
                debug!(collection = %collection, key = %key, "conditional put rejected");
                return Err(StoreError::ConditionFailed {
                    collection: collection.table_name(),
                });
            }
        }
        table.insert(key, document);
        Ok(())
    }

    async fn update(
        &self,
        collection: Collection,
        key: &Key,
        update: &UpdateSet,
        condition: Option<&Condition>,
    ) -> StoreResult<Document> {
        let key = &key.normalize(collection)?;
        let schema = collection.key_schema();
        if let Some((name, _)) = update
            .assignments()
            .iter()
            .find(|(name, _)| schema.attribute_names().any(|k| k == name))
        {
            return Err(StoreError::invalid_key(
                collection.table_name(),
                format!("cannot update key attribute {name}"),
            ));
        }

        let mut tables = self.tables.write();
        let table = tables.entry(collection).or_default();
        let current = table.get(key);
        if let Some(cond) = condition {
            if !cond.evaluate(current) {
                debug!(collection = %collection, key = %key, "conditional update rejected");
                return Err(StoreError::ConditionFailed {
                    collection: collection.table_name(),
                });
            }
        }

        let mut document = current.cloned().unwrap_or_default();
        normalize_keys(collection, key, &mut document);
        update.apply(&mut document);
        table.insert(key.clone(), document.clone());
        Ok(document)
    }

    async fn delete(&self, collection: Collection, key: &Key) -> StoreResult<()> {
        let key = key.normalize(collection)?;
        if let Some(table) = self.tables.write().get_mut(&collection) {
            table.remove(&key);
        }
        Ok(())
    }

    async fn batch_put(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> StoreResult<BatchPutOutcome> {
        let keyed = documents
            .into_iter()
            .map(|mut doc| {
                let key = Key::from_document(collection, &doc)?;
                normalize_keys(collection, &key, &mut doc);
                Ok((key, doc))
            })
            .collect::<StoreResult<Vec<_>>>()?;

        let written = keyed.len();
        let mut tables = self.tables.write();
        tables.entry(collection).or_default().extend(keyed);
        Ok(BatchPutOutcome {
            written,
            unprocessed: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MemoryStore::new();
        store
            .put(
                Collection::Student,
                doc(json!({"StudentID": "S1", "Name": "Asha"})),
                None,
            )
            .await
            .unwrap();

        let got = store
            .get(Collection::Student, &Key::partition("S1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got["Name"], json!("Asha"));
        assert!(store
            .get(Collection::Student, &Key::partition("S2"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_query_orders_numeric_sort_keys() {
        let store = MemoryStore::new();
        for sem in [10, 2, 1] {
            store
                .put(
                    Collection::FeesPaid,
                    doc(json!({"StudentID": "S1", "Sem": sem})),
                    None,
                )
                .await
                .unwrap();
        }
        store
            .put(
                Collection::FeesPaid,
                doc(json!({"StudentID": "S2", "Sem": 1})),
                None,
            )
            .await
            .unwrap();

        let rows = store
            .query(Collection::FeesPaid, &"S1".into(), None, Direction::Forward)
            .await
            .unwrap();
        let sems: Vec<_> = rows.iter().map(|r| r["Sem"].clone()).collect();
        assert_eq!(sems, vec![json!(1), json!(2), json!(10)]);

        let rows = store
            .query(Collection::FeesPaid, &"S1".into(), None, Direction::Backward)
            .await
            .unwrap();
        assert_eq!(rows[0]["Sem"], json!(10));
    }

    #[tokio::test]
    async fn test_conditional_put_rejects_duplicate() {
        let store = MemoryStore::new();
        let app = doc(json!({"StudentID": "S1", "CompanyID": "C1"}));
        store
            .put(
                Collection::PlacementApplications,
                app.clone(),
                Some(&Condition::ItemNotExists),
            )
            .await
            .unwrap();
        let err = store
            .put(
                Collection::PlacementApplications,
                app,
                Some(&Condition::ItemNotExists),
            )
            .await
            .unwrap_err();
        assert!(err.is_condition_failed());
        assert_eq!(store.len(Collection::PlacementApplications), 1);
    }

    #[tokio::test]
    async fn test_update_upserts_and_returns_new_document() {
        let store = MemoryStore::new();
        let key = Key::partition("S1").with_sort(2);
        let updated = store
            .update(
                Collection::AdmitCards,
                &key,
                &UpdateSet::new().set("Downloaded", true),
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated["StudentID"], json!("S1"));
        assert_eq!(updated["Semester"], json!(2));
        assert_eq!(updated["Downloaded"], json!(true));
    }

    #[tokio::test]
    async fn test_update_rejects_key_attribute() {
        let store = MemoryStore::new();
        let err = store
            .update(
                Collection::Student,
                &Key::partition("S1"),
                &UpdateSet::new().set("StudentID", "S2"),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey { .. }));
    }

    #[tokio::test]
    async fn test_conditional_update_on_missing_item() {
        let store = MemoryStore::new();
        let err = store
            .update(
                Collection::HostelFee,
                &Key::partition("S1"),
                &UpdateSet::new().set("Version", 1),
                Some(&Condition::version_equals("Version", 0)),
            )
            .await
            .unwrap_err();
        assert!(err.is_condition_failed());
        assert!(store.is_empty(Collection::HostelFee));
    }

    #[tokio::test]
    async fn test_batch_put_rejects_invalid_key_without_writing() {
        let store = MemoryStore::new();
        let docs = vec![
            doc(json!({"StudentID": "S1", "Date#SubjectCode": "2024-01-01#MA101"})),
            doc(json!({"StudentID": "S1"})),
        ];
        assert!(store.batch_put(Collection::Attendance, docs).await.is_err());
        assert!(store.is_empty(Collection::Attendance));
    }

    #[tokio::test]
    async fn test_scan_with_filter_and_delete() {
        let store = MemoryStore::new();
        let docs = vec![
            doc(json!({"StudentID": "S1", "HostelID": "H001", "RoomNo": "3"})),
            doc(json!({"StudentID": "S2", "HostelID": "H002", "RoomNo": "1"})),
        ];
        let outcome = store.batch_put(Collection::HostelAssigned, docs).await.unwrap();
        assert_eq!(outcome.written, 2);

        let filter = Filter::new().eq("HostelID", "H001");
        let rows = store
            .scan(Collection::HostelAssigned, Some(&filter))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);

        store
            .delete(Collection::HostelAssigned, &Key::partition("S1"))
            .await
            .unwrap();
        let rows = store
            .scan(Collection::HostelAssigned, Some(&filter))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
