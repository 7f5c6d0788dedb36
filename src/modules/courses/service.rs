use anyhow::anyhow;
use campusgate_core::AppError;
use campusgate_store::{Collection, Document, DocumentStore, Filter, Key, QueryEngine};
use serde_json::Value;
use tracing::instrument;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(store))]
    pub async fn list_courses(store: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
        Ok(QueryEngine::scan_with_filter(store, Collection::CourseDetails, &Filter::new()).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_course(store: &dyn DocumentStore, course_id: &str) -> Result<Document, AppError> {
        QueryEngine::get_by_key(store, Collection::CourseDetails, &Key::partition(course_id))
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    /// Section names offered for a course semester; empty when none are
    /// configured.
    #[instrument(skip(store))]
    pub async fn get_sections(
        store: &dyn DocumentStore,
        course_id: &str,
        semester: i64,
    ) -> Result<Value, AppError> {
        let filter = Filter::new()
            .eq_text("CourseID", course_id)
            .eq("Semester", semester);
        let rows = QueryEngine::scan_with_filter(store, Collection::CourseSections, &filter).await?;

        Ok(rows
            .into_iter()
            .next()
            .and_then(|mut row| row.remove("Sections"))
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }
}

/// Parses a semester that must be numeric to address a numeric key.
pub fn parse_semester(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(anyhow!("semester must be a number")))
}
