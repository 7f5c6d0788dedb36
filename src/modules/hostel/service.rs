//! Hostel view composition, the fee ledger and room allocation.
//!
//! The fee ledger and the room counter are both guarded by a `Version`
//! attribute: each write is conditional on the version that was read, and a
//! lost race re-reads and tries again up to the configured attempt limit.

use anyhow::anyhow;
use campusgate_core::AppError;
use campusgate_core::derived::{parse_lenient_int, today};
use campusgate_observability::tracing_utils::ErrorExt;
use campusgate_observability::{track_cas_retry, track_fee_payment, track_room_allocated};
use campusgate_store::expr::read_version;
use campusgate_store::{
    Collection, Condition, Document, DocumentStore, Filter, Key, KeyValue, QueryEngine,
    UpdateSet, decode, encode,
};
use serde_json::json;
use tracing::{Instrument, debug, instrument, warn};

use super::model::{
    COMPLAINT_INITIAL_STATUS, CreateHostelComplaintDto, FeeMark, FeePayment, Hostel,
    HostelAssignment, HostelComplaint, HostelFee, HostelView,
};

const VERSION: &str = "Version";

pub struct HostelService;

impl HostelService {
    /// Joins a student's assignment with the hostel it points at.
    #[instrument(skip(store))]
    pub async fn compose_hostel_view(
        store: &dyn DocumentStore,
        student_id: &str,
    ) -> Result<HostelView, AppError> {
        let assignment: HostelAssignment = QueryEngine::get_as(
            store,
            Collection::HostelAssigned,
            &Key::partition(student_id),
        )
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Not found")))?;

        let hostel: Option<Hostel> = match assignment.hostel_id.as_deref() {
            Some(hostel_id) => {
                QueryEngine::get_as(store, Collection::Hostel, &Key::partition(hostel_id)).await?
            }
            None => None,
        };

        Ok(HostelView::merge(&assignment, hostel.as_ref()))
    }

    #[instrument(skip(store))]
    pub async fn get_fee_ledger(
        store: &dyn DocumentStore,
        student_id: &str,
    ) -> Result<Document, AppError> {
        QueryEngine::get_by_key(store, Collection::HostelFee, &Key::partition(student_id))
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("No fee record found")))
    }

    /// Moves one fee line from Unpaid to Paid.
    ///
    /// Paying a line that is already Paid succeeds without writing. Every
    /// other line is written back exactly as it was read.
    #[instrument(skip(store))]
    pub async fn mark_fee_item_paid(
        store: &dyn DocumentStore,
        student_id: &str,
        item: &str,
        max_attempts: u32,
    ) -> Result<FeePayment, AppError> {
        let key = Key::partition(student_id);

        for attempt in 1..=max_attempts.max(1) {
            let ledger: HostelFee = QueryEngine::get_as(store, Collection::HostelFee, &key)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow!("No record found")))?;

            let lines = match ledger.mark_paid(item) {
                FeeMark::UnknownItem => {
                    return Err(AppError::not_found(anyhow!("No fee item named '{item}'")));
                }
                FeeMark::AlreadyPaid => {
                    track_fee_payment("already_paid");
                    return Ok(FeePayment::AlreadyPaid);
                }
                FeeMark::Marked(lines) => lines,
            };

            let update = UpdateSet::new()
                .set("Fees", serde_json::to_value(&lines)?)
                .set(VERSION, ledger.version + 1);
            let condition = Condition::version_equals(VERSION, ledger.version);

            let span = campusgate_observability::store_span!(
                "update",
                "HostelFee",
                student_id = %student_id,
                attempt
            );
            match store
                .update(Collection::HostelFee, &key, &update, Some(&condition))
                .instrument(span)
                .await
            {
                Ok(_) => {
                    debug!(version = ledger.version + 1, "fee line marked paid");
                    track_fee_payment("paid");
                    return Ok(FeePayment::Marked);
                }
                Err(err) if err.is_condition_failed() => {
                    warn!(attempt, "fee ledger changed underneath, retrying");
                    track_cas_retry("hostel_fee.pay");
                }
                Err(err) => return Err(err.into()),
            }
        }

        track_fee_payment("conflict");
        Err(AppError::conflict(anyhow!(
            "Fee record is being updated concurrently, please retry"
        )))
    }

    /// Highest room number assigned in a hostel. Non-numeric room numbers
    /// count as 0; an empty hostel gives 0.
    pub async fn max_assigned_room(
        store: &dyn DocumentStore,
        hostel_id: &str,
    ) -> Result<i64, AppError> {
        let filter = Filter::new().eq_text("HostelID", hostel_id);
        let assigned =
            QueryEngine::scan_with_filter(store, Collection::HostelAssigned, &filter).await?;

        Ok(assigned
            .iter()
            .map(|doc| parse_lenient_int(doc.get("RoomNo")))
            .max()
            .unwrap_or(0)
            .max(0))
    }

    /// Hands out the next room number in a hostel.
    ///
    /// The result is one past the larger of the highest assigned room and the
    /// hostel's counter document. The counter is committed with a conditional
    /// write, so two concurrent callers can never receive the same number.
    #[instrument(skip(store))]
    pub async fn allocate_next_room(
        store: &dyn DocumentStore,
        hostel_id: &str,
        max_attempts: u32,
    ) -> Result<i64, AppError> {
        let key = Key::partition(hostel_id);

        for attempt in 1..=max_attempts.max(1) {
            let scan_max = Self::max_assigned_room(store, hostel_id).await?;
            let counter = store.get(Collection::HostelRoomCounter, &key).await?;

            let (last_room, version) = match &counter {
                Some(doc) => (
                    parse_lenient_int(doc.get("LastRoomNo")),
                    read_version(doc, VERSION).unwrap_or(0),
                ),
                None => (0, 0),
            };
            let next = scan_max.max(last_room).checked_add(1).ok_or_else(|| {
                AppError::internal(anyhow!("Room numbers exhausted in {hostel_id}"))
            })?;

            let committed = match counter {
                None => {
                    let doc = encode(&json!({
                        "HostelID": hostel_id,
                        "LastRoomNo": next,
                        "Version": 1,
                    }))?;
                    store
                        .put(
                            Collection::HostelRoomCounter,
                            doc,
                            Some(&Condition::ItemNotExists),
                        )
                        .await
                        .map(|_| ())
                }
                Some(_) => {
                    let update = UpdateSet::new()
                        .set("LastRoomNo", next)
                        .set(VERSION, version + 1);
                    store
                        .update(
                            Collection::HostelRoomCounter,
                            &key,
                            &update,
                            Some(&Condition::version_equals(VERSION, version)),
                        )
                        .await
                        .map(|_| ())
                }
            };

            match committed {
                Ok(()) => {
                    debug!(room = next, "room allocated");
                    track_room_allocated(hostel_id);
                    return Ok(next);
                }
                Err(err) if err.is_condition_failed() => {
                    warn!(attempt, "room counter changed underneath, retrying");
                    track_cas_retry("hostel.allocate_room");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::conflict(anyhow!(
            "Could not allocate a room in {hostel_id}, please retry"
        )))
    }

    /// Allocates a room and records the assignment for a new student.
    #[instrument(skip(store))]
    pub async fn assign_new_student(
        store: &dyn DocumentStore,
        student_id: &str,
        hostel_id: &str,
        phone_no: Option<&str>,
        max_attempts: u32,
    ) -> Result<HostelAssignment, AppError> {
        let room = Self::allocate_next_room(store, hostel_id, max_attempts).await?;

        let assignment = HostelAssignment {
            student_id: student_id.to_string(),
            hostel_id: Some(hostel_id.to_string()),
            room_no: Some(room.to_string()),
            check_in_date: Some(today()),
            student_phone_no: phone_no.map(str::to_string),
            ..HostelAssignment::default()
        };

        store
            .put(Collection::HostelAssigned, encode(&assignment)?, None)
            .await
            .log_error("recording hostel assignment")?;

        Ok(assignment)
    }

    #[instrument(skip(store))]
    pub async fn get_complaints(
        store: &dyn DocumentStore,
        student_id: &str,
    ) -> Result<Vec<Document>, AppError> {
        Ok(QueryEngine::query_by_partition(
            store,
            Collection::HostelComplaint,
            &KeyValue::from(student_id),
        )
        .await?)
    }

    #[instrument(skip(store, dto))]
    pub async fn create_complaint(
        store: &dyn DocumentStore,
        dto: CreateHostelComplaintDto,
    ) -> Result<HostelComplaint, AppError> {
        let complaint_id = dto
            .complaint_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("C{}", chrono::Utc::now().timestamp_millis()));

        let complaint = HostelComplaint {
            student_id: dto.student_id,
            complaint_id,
            category: dto.category,
            title: dto.title,
            description: dto.description,
            room_no: dto.room_no,
            status: COMPLAINT_INITIAL_STATUS.to_string(),
            raised_on: today(),
        };

        store
            .put(
                Collection::HostelComplaint,
                encode(&complaint)?,
                Some(&Condition::ItemNotExists),
            )
            .await
            .map_err(|err| {
                if err.is_condition_failed() {
                    AppError::conflict(anyhow!("Complaint already exists"))
                } else {
                    err.into()
                }
            })?;

        Ok(complaint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use campusgate_store::{
        BatchPutOutcome, Direction, MemoryStore, SortCondition, StoreResult,
    };
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    async fn put(store: &MemoryStore, collection: Collection, value: Value) {
        store.put(collection, doc(value), None).await.unwrap();
    }

    /// Store where another writer gets in first on the next `races`
    /// conditional writes. The rival bumps `Version` and, on the room
    /// counter, takes the next room for itself.
    #[derive(Debug)]
    struct RacingStore {
        inner: MemoryStore,
        races: AtomicUsize,
        lost: AtomicUsize,
    }

    impl RacingStore {
        fn new(inner: MemoryStore, races: usize) -> Self {
            Self {
                inner,
                races: AtomicUsize::new(races),
                lost: AtomicUsize::new(0),
            }
        }

        fn lost(&self) -> usize {
            self.lost.load(Ordering::SeqCst)
        }

        async fn rival_write(&self, collection: Collection, key: &Key) -> StoreResult<()> {
            let won = self
                .races
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if !won {
                return Ok(());
            }
            self.lost.fetch_add(1, Ordering::SeqCst);

            let current = self.inner.get(collection, key).await?;
            let version = current
                .as_ref()
                .and_then(|doc| read_version(doc, VERSION))
                .unwrap_or(0);
            let mut update = UpdateSet::new().set(VERSION, version + 1);
            if collection == Collection::HostelRoomCounter {
                let last = parse_lenient_int(current.as_ref().and_then(|doc| doc.get("LastRoomNo")));
                update = update.set("LastRoomNo", last + 1);
            }
            self.inner.update(collection, key, &update, None).await.map(|_| ())
        }
    }

    #[async_trait]
    impl DocumentStore for RacingStore {
        async fn get(&self, collection: Collection, key: &Key) -> StoreResult<Option<Document>> {
            self.inner.get(collection, key).await
        }

        async fn query(
            &self,
            collection: Collection,
            partition: &KeyValue,
            sort: Option<&SortCondition>,
            direction: Direction,
        ) -> StoreResult<Vec<Document>> {
            self.inner.query(collection, partition, sort, direction).await
        }

        async fn scan(
            &self,
            collection: Collection,
            filter: Option<&Filter>,
        ) -> StoreResult<Vec<Document>> {
            self.inner.scan(collection, filter).await
        }

        async fn put(
            &self,
            collection: Collection,
            document: Document,
            condition: Option<&Condition>,
        ) -> StoreResult<()> {
            if condition.is_some() && collection == Collection::HostelRoomCounter {
                if let Some(hostel_id) = document.get("HostelID").and_then(Value::as_str) {
                    self.rival_write(collection, &Key::partition(hostel_id)).await?;
                }
            }
            self.inner.put(collection, document, condition).await
        }

        async fn update(
            &self,
            collection: Collection,
            key: &Key,
            update: &UpdateSet,
            condition: Option<&Condition>,
        ) -> StoreResult<Document> {
            if condition.is_some() {
                self.rival_write(collection, key).await?;
            }
            self.inner.update(collection, key, update, condition).await
        }

        async fn delete(&self, collection: Collection, key: &Key) -> StoreResult<()> {
            self.inner.delete(collection, key).await
        }

        async fn batch_put(
            &self,
            collection: Collection,
            documents: Vec<Document>,
        ) -> StoreResult<BatchPutOutcome> {
            self.inner.batch_put(collection, documents).await
        }
    }

    async fn unpaid_ledger() -> MemoryStore {
        let store = MemoryStore::new();
        put(
            &store,
            Collection::HostelFee,
            json!({
                "StudentID": "S1",
                "Fees": [
                    {"Item": "Mess", "Status": "Unpaid"},
                    {"Item": "Room", "Status": "Unpaid"}
                ]
            }),
        )
        .await;
        store
    }

    #[tokio::test]
    async fn test_allocate_on_empty_hostel_is_one() {
        let store = MemoryStore::new();
        let room = HostelService::allocate_next_room(&store, "H001", 5)
            .await
            .unwrap();
        assert_eq!(room, 1);
    }

    #[tokio::test]
    async fn test_allocate_after_mixed_room_numbers() {
        let store = MemoryStore::new();
        for (student, room) in [("S1", "3"), ("S2", "5"), ("S3", "x")] {
            put(
                &store,
                Collection::HostelAssigned,
                json!({"StudentID": student, "HostelID": "H001", "RoomNo": room}),
            )
            .await;
        }
        put(
            &store,
            Collection::HostelAssigned,
            json!({"StudentID": "S4", "HostelID": "H002", "RoomNo": "40"}),
        )
        .await;

        let room = HostelService::allocate_next_room(&store, "H001", 5)
            .await
            .unwrap();
        assert_eq!(room, 6);
    }

    #[tokio::test]
    async fn test_repeated_allocation_never_repeats() {
        let store = MemoryStore::new();
        let first = HostelService::allocate_next_room(&store, "H001", 5)
            .await
            .unwrap();
        let second = HostelService::allocate_next_room(&store, "H001", 5)
            .await
            .unwrap();
        assert_eq!((first, second), (1, 2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_allocations_are_distinct() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                HostelService::allocate_next_room(store.as_ref(), "H001", 50).await
            }));
        }

        let mut rooms = Vec::new();
        for handle in handles {
            rooms.push(handle.await.unwrap().unwrap());
        }
        rooms.sort();
        assert_eq!(rooms, (1..=8).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_mark_paid_twice_changes_one_line() {
        let store = MemoryStore::new();
        put(
            &store,
            Collection::HostelFee,
            json!({
                "StudentID": "S1",
                "Fees": [
                    {"Item": "Mess", "Status": "Unpaid", "Amount": 1200},
                    {"Item": "Room", "Status": "Unpaid"}
                ]
            }),
        )
        .await;

        let first = HostelService::mark_fee_item_paid(&store, "S1", "Mess", 5)
            .await
            .unwrap();
        let second = HostelService::mark_fee_item_paid(&store, "S1", "Mess", 5)
            .await
            .unwrap();
        assert_eq!(first, FeePayment::Marked);
        assert_eq!(second, FeePayment::AlreadyPaid);

        let ledger = HostelService::get_fee_ledger(&store, "S1").await.unwrap();
        assert_eq!(
            ledger["Fees"],
            json!([
                {"Item": "Mess", "Status": "Paid", "Amount": 1200},
                {"Item": "Room", "Status": "Unpaid"}
            ])
        );
        assert_eq!(ledger["Version"], 1);
    }

    #[tokio::test]
    async fn test_mark_paid_missing_ledger_or_item() {
        let store = MemoryStore::new();
        let err = HostelService::mark_fee_item_paid(&store, "S9", "Mess", 5)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);

        put(
            &store,
            Collection::HostelFee,
            json!({"StudentID": "S1", "Fees": [{"Item": "Mess", "Status": "Unpaid"}]}),
        )
        .await;
        let err = HostelService::mark_fee_item_paid(&store, "S1", "Gym", 5)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_payments_keep_both_lines() {
        let store = std::sync::Arc::new(MemoryStore::new());
        put(
            &store,
            Collection::HostelFee,
            json!({
                "StudentID": "S1",
                "Fees": [
                    {"Item": "Mess", "Status": "Unpaid"},
                    {"Item": "Room", "Status": "Unpaid"}
                ]
            }),
        )
        .await;

        let a = {
            let store = store.clone();
            tokio::spawn(async move {
                HostelService::mark_fee_item_paid(store.as_ref(), "S1", "Mess", 20).await
            })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move {
                HostelService::mark_fee_item_paid(store.as_ref(), "S1", "Room", 20).await
            })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let ledger = HostelService::get_fee_ledger(store.as_ref(), "S1")
            .await
            .unwrap();
        assert_eq!(ledger["Fees"][0]["Status"], "Paid");
        assert_eq!(ledger["Fees"][1]["Status"], "Paid");
    }

    #[tokio::test]
    async fn test_fee_payment_retries_after_losing_a_race() {
        let store = RacingStore::new(unpaid_ledger().await, 2);

        let outcome = HostelService::mark_fee_item_paid(&store, "S1", "Mess", 5)
            .await
            .unwrap();
        assert_eq!(outcome, FeePayment::Marked);
        assert_eq!(store.lost(), 2);

        let ledger = HostelService::get_fee_ledger(&store, "S1").await.unwrap();
        assert_eq!(ledger["Version"], 3);
        assert_eq!(
            ledger["Fees"],
            json!([
                {"Item": "Mess", "Status": "Paid"},
                {"Item": "Room", "Status": "Unpaid"}
            ])
        );
    }

    #[tokio::test]
    async fn test_fee_payment_conflict_when_attempts_run_out() {
        let store = RacingStore::new(unpaid_ledger().await, 3);

        let err = HostelService::mark_fee_item_paid(&store, "S1", "Mess", 3)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(store.lost(), 3);

        let ledger = HostelService::get_fee_ledger(&store, "S1").await.unwrap();
        assert_eq!(ledger["Fees"][0]["Status"], "Unpaid");
        assert_eq!(ledger["Version"], 3);
    }

    #[tokio::test]
    async fn test_room_allocation_skips_rooms_taken_by_rivals() {
        let store = RacingStore::new(MemoryStore::new(), 2);

        // The rival creates the counter on room 1, then takes room 2.
        let room = HostelService::allocate_next_room(&store, "H001", 5)
            .await
            .unwrap();
        assert_eq!(room, 3);
        assert_eq!(store.lost(), 2);

        let counter = store
            .get(Collection::HostelRoomCounter, &Key::partition("H001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(counter["LastRoomNo"], 3);
        assert_eq!(counter["Version"], 3);
    }

    #[tokio::test]
    async fn test_room_allocation_conflict_with_single_attempt() {
        let store = RacingStore::new(MemoryStore::new(), 1);

        let err = HostelService::allocate_next_room(&store, "H001", 1)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let room = HostelService::allocate_next_room(&store, "H001", 1)
            .await
            .unwrap();
        assert_eq!(room, 2);
    }

    #[tokio::test]
    async fn test_allocate_fails_cleanly_when_room_numbers_exhausted() {
        let store = MemoryStore::new();
        put(
            &store,
            Collection::HostelAssigned,
            json!({"StudentID": "S1", "HostelID": "H001", "RoomNo": "1e30"}),
        )
        .await;

        let err = HostelService::allocate_next_room(&store, "H001", 5)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_view_tolerates_missing_hostel() {
        let store = MemoryStore::new();
        put(
            &store,
            Collection::HostelAssigned,
            json!({"StudentID": "S1", "HostelID": "H404", "RoomNo": "7"}),
        )
        .await;

        let view = HostelService::compose_hostel_view(&store, "S1")
            .await
            .unwrap();
        assert_eq!(view.hostel_name, "H404");
        assert_eq!(view.room_number, "7");
        assert_eq!(view.monthly_fee, "-");

        let missing = HostelService::compose_hostel_view(&store, "S2").await;
        assert!(missing.is_err());
    }
}
