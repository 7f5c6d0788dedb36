use anyhow::anyhow;
use campusgate_core::derived::sort_by_numeric_key;
use campusgate_core::{AppError, ObjectStore};
use campusgate_store::{Collection, Document, DocumentStore, Filter, Key, QueryEngine, encode};
use tracing::{info, instrument};

use super::model::{CreateStudentDto, Student, StudentCreated, StudentFilterParams, photo_key};
use crate::modules::hostel::{DEFAULT_HOSTEL_ID, HostelService};

pub struct StudentService;

impl StudentService {
    /// Stores the student, then allocates the next free room in the requested
    /// hostel (or the default one) and records the assignment.
    #[instrument(skip(store, dto), fields(student_id = %dto.student_id))]
    pub async fn create_student(
        store: &dyn DocumentStore,
        dto: CreateStudentDto,
        max_attempts: u32,
    ) -> Result<StudentCreated, AppError> {
        let (student, hostel_id) = dto.into_parts();
        let hostel_id = hostel_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOSTEL_ID.to_string());

        store
            .put(Collection::Student, encode(&student)?, None)
            .await?;

        let hostel_assignment = HostelService::assign_new_student(
            store,
            &student.student_id,
            &hostel_id,
            student.phone_no.as_deref(),
            max_attempts,
        )
        .await?;

        info!(
            hostel_id = %hostel_id,
            room = ?hostel_assignment.room_no,
            "student created with hostel room"
        );
        Ok(StudentCreated {
            student,
            hostel_assignment,
        })
    }

    #[instrument(skip(store))]
    pub async fn list_students(store: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
        Ok(QueryEngine::scan_with_filter(store, Collection::Student, &Filter::new()).await?)
    }

    /// Replaces a student record wholesale.
    #[instrument(skip(store, student), fields(student_id = %student.student_id))]
    pub async fn replace_student(store: &dyn DocumentStore, student: Student) -> Result<Student, AppError> {
        store
            .put(Collection::Student, encode(&student)?, None)
            .await?;
        Ok(student)
    }

    /// Deletes the student record only; attendance, fees and other ledgers
    /// keyed by the student are left in place.
    #[instrument(skip(store))]
    pub async fn delete_student(store: &dyn DocumentStore, student_id: &str) -> Result<(), AppError> {
        store
            .delete(Collection::Student, &Key::partition(student_id))
            .await?;
        Ok(())
    }

    /// Students matching the given filters. Absent, blank and `"all"`
    /// filters match everyone; section compares case-insensitively.
    #[instrument(skip(store))]
    pub async fn filter_students(
        store: &dyn DocumentStore,
        params: &StudentFilterParams,
    ) -> Result<Vec<Document>, AppError> {
        let mut filter = Filter::new();
        if let Some(course_id) = StudentFilterParams::selective(params.course_id.as_deref()) {
            filter = filter.eq_text("CourseID", course_id);
        }
        if let Some(branch) = StudentFilterParams::selective(params.branch.as_deref()) {
            filter = filter.eq_text("Branch", branch);
        }
        if let Some(semester) = StudentFilterParams::selective(params.semester.as_deref()) {
            filter = filter.eq_text("CurrentSem", semester);
        }
        if let Some(section) = StudentFilterParams::selective(params.section.as_deref()) {
            filter = filter.eq_ignore_case("Section", section);
        }

        Ok(QueryEngine::scan_with_filter(store, Collection::Student, &filter).await?)
    }

    /// Students of one course semester section, by class roll number.
    #[instrument(skip(store))]
    pub async fn section_roster(
        store: &dyn DocumentStore,
        course_id: &str,
        semester: i64,
        section: &str,
    ) -> Result<Vec<Document>, AppError> {
        let filter = Filter::new()
            .eq_text("CourseID", course_id)
            .eq("CurrentSem", semester)
            .eq_text("Section", section);

        let mut students =
            QueryEngine::scan_with_filter(store, Collection::Student, &filter).await?;
        sort_by_numeric_key(&mut students, "ClassRollNo");
        Ok(students)
    }

    #[instrument(skip(objects, content), fields(bytes = content.len()))]
    pub async fn upload_photo(
        objects: &dyn ObjectStore,
        student_id: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        if content.is_empty() {
            return Err(AppError::bad_request(anyhow!("No file uploaded.")));
        }
        let url = objects
            .put_object(&photo_key(student_id), content, content_type)
            .await?;
        info!(url = %url, "student photo stored");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusgate_store::MemoryStore;
    use serde_json::json;

    fn create_dto(id: &str, extra: serde_json::Value) -> CreateStudentDto {
        let mut body = json!({"StudentID": id, "Name": "Test Student"});
        if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            body.extend(extra.clone());
        }
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_rooms() {
        let store = MemoryStore::new();
        let first = StudentService::create_student(&store, create_dto("S1", json!({})), 5)
            .await
            .unwrap();
        let second = StudentService::create_student(&store, create_dto("S2", json!({})), 5)
            .await
            .unwrap();

        assert_eq!(first.hostel_assignment.hostel_id.as_deref(), Some("H001"));
        assert_eq!(first.hostel_assignment.room_no.as_deref(), Some("1"));
        assert_eq!(second.hostel_assignment.room_no.as_deref(), Some("2"));
        assert_eq!(store.len(Collection::HostelAssigned), 2);
    }

    #[tokio::test]
    async fn test_create_in_named_hostel() {
        let store = MemoryStore::new();
        let created = StudentService::create_student(
            &store,
            create_dto("S1", json!({"HostelID": "H002", "PhoneNo": 9000000001u64})),
            5,
        )
        .await
        .unwrap();

        let value = serde_json::to_value(&created).unwrap();
        assert_eq!(value["StudentID"], "S1");
        assert_eq!(value["hostelAssignment"]["HostelID"], "H002");
        assert_eq!(value["hostelAssignment"]["StudentPhoneNo"], "9000000001");
        assert!(value.get("HostelID").is_none());
    }

    #[tokio::test]
    async fn test_filter_and_roster() {
        let store = MemoryStore::new();
        let rows = json!([
            {"StudentID": "S1", "CourseID": "BTECH", "Branch": "CSE", "CurrentSem": 3, "Section": "A", "ClassRollNo": "10"},
            {"StudentID": "S2", "CourseID": "BTECH", "Branch": "CSE", "CurrentSem": 3, "Section": "a", "ClassRollNo": "2"},
            {"StudentID": "S3", "CourseID": "BTECH", "Branch": "ECE", "CurrentSem": 3, "Section": "A", "ClassRollNo": "x"},
            {"StudentID": "S4", "CourseID": "MBA", "Branch": "HR", "CurrentSem": 1, "Section": "A"}
        ]);
        let docs = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().cloned().unwrap())
            .collect();
        store.batch_put(Collection::Student, docs).await.unwrap();

        let params = StudentFilterParams {
            course_id: Some("BTECH".into()),
            branch: Some("all".into()),
            semester: Some("3".into()),
            section: Some(" A ".into()),
        };
        let found = StudentService::filter_students(&store, &params).await.unwrap();
        assert_eq!(found.len(), 3);

        let roster = StudentService::section_roster(&store, "BTECH", 3, "A")
            .await
            .unwrap();
        let ids: Vec<&str> = roster
            .iter()
            .map(|s| s["StudentID"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["S3", "S1"]);
    }

    #[tokio::test]
    async fn test_delete_leaves_ledgers() {
        let store = MemoryStore::new();
        StudentService::create_student(&store, create_dto("S1", json!({})), 5)
            .await
            .unwrap();
        StudentService::delete_student(&store, "S1").await.unwrap();

        assert!(store.is_empty(Collection::Student));
        assert_eq!(store.len(Collection::HostelAssigned), 1);
    }
}
