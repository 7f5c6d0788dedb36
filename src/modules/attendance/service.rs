use anyhow::anyhow;
use campusgate_core::AppError;
use campusgate_core::derived::{AttendanceOverall, overall_attendance};
use campusgate_store::{Collection, Document, DocumentStore, KeyValue, QueryEngine, encode};
use tracing::{info, instrument, warn};

use super::model::AttendanceRecord;

pub struct AttendanceService;

impl AttendanceService {
    #[instrument(skip(store))]
    pub async fn get_attendance(
        store: &dyn DocumentStore,
        student_id: &str,
    ) -> Result<Vec<Document>, AppError> {
        Ok(QueryEngine::query_by_partition(
            store,
            Collection::Attendance,
            &KeyValue::from(student_id),
        )
        .await?)
    }

    /// Writes a batch of attendance rows. Rows that share a student, date
    /// and subject overwrite each other.
    #[instrument(skip(store, records), fields(count = records.len()))]
    pub async fn record_attendance(
        store: &dyn DocumentStore,
        records: Vec<AttendanceRecord>,
    ) -> Result<usize, AppError> {
        let documents = records
            .into_iter()
            .map(|record| encode(&record.with_sort_key()))
            .collect::<Result<Vec<_>, _>>()?;

        let outcome = store.batch_put(Collection::Attendance, documents).await?;
        if !outcome.is_complete() {
            warn!(
                unprocessed = outcome.unprocessed.len(),
                "attendance batch partially written"
            );
            return Err(AppError::dependency(anyhow!(
                "{} attendance rows were not written",
                outcome.unprocessed.len()
            )));
        }

        info!(written = outcome.written, "attendance recorded");
        Ok(outcome.written)
    }

    #[instrument(skip(store))]
    pub async fn overall(
        store: &dyn DocumentStore,
        student_id: &str,
    ) -> Result<AttendanceOverall, AppError> {
        let rows = Self::get_attendance(store, student_id).await?;
        Ok(overall_attendance(&rows))
    }
}
