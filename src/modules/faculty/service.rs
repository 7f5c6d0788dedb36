use anyhow::anyhow;
use campusgate_core::AppError;
use campusgate_store::{
    Collection, Condition, Document, DocumentStore, Filter, Key, KeyValue, QueryEngine,
    composite, text_attr,
};
use tracing::{info, instrument};

use super::model::FacultyProfileUpdate;

pub struct FacultyService;

impl FacultyService {
    /// The faculty record for an id, whichever department it sits under.
    #[instrument(skip(store))]
    pub async fn get_faculty(store: &dyn DocumentStore, faculty_id: &str) -> Result<Document, AppError> {
        QueryEngine::query_by_partition(store, Collection::Faculty, &KeyValue::from(faculty_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(anyhow!("Faculty not found")))
    }

    /// Applies the supplied profile fields and returns the updated record.
    #[instrument(skip(store, update))]
    pub async fn update_profile(
        store: &dyn DocumentStore,
        faculty_id: &str,
        update: FacultyProfileUpdate,
    ) -> Result<Document, AppError> {
        let changes = update.into_update_set();
        if changes.is_empty() {
            return Err(AppError::bad_request(anyhow!("No valid fields to update")));
        }

        let current = Self::get_faculty(store, faculty_id).await?;
        let department = text_attr(&current, "Department")
            .ok_or_else(|| AppError::internal(anyhow!("faculty {faculty_id} has no Department")))?
            .into_owned();

        let key = Key::partition(faculty_id).with_sort(department);
        let updated = store
            .update(
                Collection::Faculty,
                &key,
                &changes,
                Some(&Condition::ItemExists),
            )
            .await?;

        info!(fields = changes.assignments().len(), "faculty profile updated");
        Ok(updated)
    }

    /// Every feedback row that names this faculty member.
    #[instrument(skip(store))]
    pub async fn get_feedback(
        store: &dyn DocumentStore,
        faculty_id: &str,
    ) -> Result<Vec<Document>, AppError> {
        let filter = Filter::new().eq_text("FacultyID", faculty_id);
        Ok(QueryEngine::scan_with_filter(store, Collection::Feedback, &filter).await?)
    }

    /// The assignment of a faculty member to a course semester section, or
    /// an empty document when there is none.
    #[instrument(skip(store))]
    pub async fn get_assignment(
        store: &dyn DocumentStore,
        course_id: &str,
        semester: &str,
        section: &str,
        faculty_id: &str,
    ) -> Result<Document, AppError> {
        let filter = Filter::new()
            .eq_text("CourseSemester", composite(course_id, semester))
            .eq_text("Section", section)
            .eq_text("FacultyID", faculty_id);

        Ok(
            QueryEngine::scan_with_filter(store, Collection::FacultyAssignments, &filter)
                .await?
                .into_iter()
                .next()
                .unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use campusgate_store::MemoryStore;
    use serde_json::json;

    async fn store_with_faculty() -> MemoryStore {
        let store = MemoryStore::new();
        let doc = json!({
            "FacultyID": "F1",
            "Department": "CSE",
            "Name": "Dr. Rao",
            "Designation": "Professor"
        })
        .as_object()
        .cloned()
        .unwrap();
        store.put(Collection::Faculty, doc, None).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_update_profile_touches_only_given_fields() {
        let store = store_with_faculty().await;
        let update: FacultyProfileUpdate =
            serde_json::from_value(json!({"PhoneNo": 9876543210u64, "Address": "Block C"}))
                .unwrap();

        let updated = FacultyService::update_profile(&store, "F1", update)
            .await
            .unwrap();
        assert_eq!(updated["PhoneNo"], "9876543210");
        assert_eq!(updated["Address"], "Block C");
        assert_eq!(updated["Designation"], "Professor");
        assert_eq!(updated["Department"], "CSE");
    }

    #[tokio::test]
    async fn test_update_profile_rejects_empty_and_unknown() {
        let store = store_with_faculty().await;

        let err = FacultyService::update_profile(&store, "F1", FacultyProfileUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let update: FacultyProfileUpdate =
            serde_json::from_value(json!({"Name": "Dr. R. Rao"})).unwrap();
        let err = FacultyService::update_profile(&store, "F404", update)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_assignment_lookup() {
        let store = MemoryStore::new();
        let doc = json!({
            "CourseSemester": "BTECH#3",
            "SubjectCode#Section": "CS301#A",
            "SubjectCode": "CS301",
            "Section": "A",
            "FacultyID": "F1"
        })
        .as_object()
        .cloned()
        .unwrap();
        store.put(Collection::FacultyAssignments, doc, None).await.unwrap();

        let found = FacultyService::get_assignment(&store, "BTECH", "3", "A", "F1")
            .await
            .unwrap();
        assert_eq!(found["SubjectCode"], "CS301");

        let missing = FacultyService::get_assignment(&store, "BTECH", "3", "B", "F1")
            .await
            .unwrap();
        assert!(missing.is_empty());
    }
}
