//! Subjects, circulars and learning resources for a course.

use campusgate_core::AppError;
use campusgate_store::{Collection, Document, DocumentStore, Filter, Key, KeyValue, QueryEngine};
use tracing::instrument;

pub struct AcademicsService;

impl AcademicsService {
    /// Subjects of a course narrowed in memory. Branch and specialization
    /// compare case-insensitively; semester compares on its text form.
    /// The partition's order is kept.
    #[instrument(skip(store))]
    pub async fn get_subjects(
        store: &dyn DocumentStore,
        course_id: &str,
        branch: Option<&str>,
        specialization: Option<&str>,
        semester: Option<&str>,
    ) -> Result<Vec<Document>, AppError> {
        let mut filter = Filter::new();
        if let Some(branch) = branch {
            filter = filter.eq_ignore_case("Branch", branch);
        }
        if let Some(specialization) = specialization {
            filter = filter.eq_ignore_case("Specialization", specialization);
        }
        if let Some(semester) = semester {
            filter = filter.eq_text("Semester", semester);
        }

        let mut subjects =
            QueryEngine::query_by_partition(store, Collection::Subjects, &KeyValue::from(course_id))
                .await?;
        subjects.retain(|subject| filter.matches(subject));
        Ok(subjects)
    }

    /// One subject by code, or an empty document when unknown.
    #[instrument(skip(store))]
    pub async fn get_subject_by_code(
        store: &dyn DocumentStore,
        course_id: &str,
        subject_code: &str,
    ) -> Result<Document, AppError> {
        let key = Key::partition(course_id).with_sort(subject_code);
        Ok(QueryEngine::get_by_key(store, Collection::Subjects, &key)
            .await?
            .unwrap_or_default())
    }

    /// Circulars of a course, newest first.
    #[instrument(skip(store))]
    pub async fn get_circulars(
        store: &dyn DocumentStore,
        course_id: &str,
    ) -> Result<Vec<Document>, AppError> {
        Ok(QueryEngine::query_by_partition_desc(
            store,
            Collection::Circulars,
            &KeyValue::from(course_id),
        )
        .await?)
    }

    /// Active resources for a course, branch and semester. Section and
    /// specialization narrow further when given.
    #[instrument(skip(store))]
    pub async fn get_resources(
        store: &dyn DocumentStore,
        course_id: &str,
        branch: &str,
        semester: i64,
        section: Option<&str>,
        specialization: Option<&str>,
    ) -> Result<Vec<Document>, AppError> {
        let mut filter = Filter::new()
            .eq_text("CourseID", course_id)
            .eq_text("Branch", branch)
            .eq("Semester", semester)
            .eq("IsActive", true);
        if let Some(section) = section {
            filter = filter.eq_text("Section", section);
        }
        if let Some(specialization) = specialization {
            filter = filter.eq_text("Specialization", specialization);
        }

        Ok(QueryEngine::scan_with_filter(store, Collection::Resources, &filter).await?)
    }
}
