use campusgate_core::AppError;
use campusgate_core::derived::sort_by_numeric_key;
use campusgate_store::{Collection, Document, DocumentStore, KeyValue, QueryEngine};
use tracing::instrument;

pub struct FeeService;

impl FeeService {
    /// Fee structure of a course, ascending by semester.
    #[instrument(skip(store))]
    pub async fn get_fee_structure(
        store: &dyn DocumentStore,
        course_id: &str,
    ) -> Result<Vec<Document>, AppError> {
        let mut rows = QueryEngine::query_by_partition(
            store,
            Collection::FeesStructure,
            &KeyValue::from(course_id),
        )
        .await?;
        sort_by_numeric_key(&mut rows, "Sem");
        Ok(rows)
    }

    /// Fee payments of a student, ascending by semester.
    #[instrument(skip(store))]
    pub async fn get_fees_paid(
        store: &dyn DocumentStore,
        student_id: &str,
    ) -> Result<Vec<Document>, AppError> {
        let mut rows = QueryEngine::query_by_partition(
            store,
            Collection::FeesPaid,
            &KeyValue::from(student_id),
        )
        .await?;
        sort_by_numeric_key(&mut rows, "Sem");
        Ok(rows)
    }
}
