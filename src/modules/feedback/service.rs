//! Course feedback and the roster of faculty a student can rate.

use campusgate_core::AppError;
use campusgate_core::derived::{parse_lenient_int, today};
use campusgate_observability::tracing_utils::record_success;
use campusgate_store::{
    Collection, Document, DocumentStore, Key, KeyValue, QueryEngine, composite, encode,
    text_attr,
};
use serde_json::Value;
use tracing::{Instrument, debug, instrument};

use super::model::{FacultyAssignment, FacultyRosterEntry, FeedbackDto, Subject};

pub struct FeedbackService;

impl FeedbackService {
    /// Who teaches each subject of a course semester.
    ///
    /// Subjects come from the course partition, narrowed to the semester by
    /// numeric comparison. Each subject is matched to the first faculty
    /// assignment with the same subject code, and the faculty member is
    /// looked up under the subject's branch as department. Subjects with no
    /// assignment, or whose faculty record is missing, are left out.
    #[instrument(skip(store))]
    pub async fn compose_faculty_roster(
        store: &dyn DocumentStore,
        course_id: &str,
        semester: &str,
    ) -> Result<Vec<FacultyRosterEntry>, AppError> {
        let wanted = parse_lenient_int(Some(&Value::String(semester.to_string())));

        let subjects: Vec<Subject> =
            QueryEngine::query_as(store, Collection::Subjects, &KeyValue::from(course_id)).await?;
        let assignments: Vec<FacultyAssignment> = QueryEngine::query_as(
            store,
            Collection::FacultyAssignments,
            &KeyValue::from(composite(course_id, semester)),
        )
        .await?;

        let mut roster = Vec::new();
        for subject in subjects.iter().filter(|s| {
            parse_lenient_int(s.semester.clone().map(Value::String).as_ref()) == wanted
        }) {
            let Some(assignment) = assignments
                .iter()
                .find(|a| a.subject_code == subject.subject_code)
            else {
                debug!(subject = %subject.subject_code, "no faculty assigned");
                continue;
            };

            let department = subject.branch.clone().unwrap_or_default();
            let key = Key::partition(assignment.faculty_id.as_str()).with_sort(department);
            let span = campusgate_observability::store_span!(
                "get",
                "Faculty",
                faculty_id = %assignment.faculty_id
            );
            let faculty = QueryEngine::get_by_key(store, Collection::Faculty, &key)
                .instrument(span)
                .await?;
            let Some(faculty) = faculty else {
                debug!(faculty = %assignment.faculty_id, "faculty record missing");
                continue;
            };

            roster.push(FacultyRosterEntry {
                faculty_id: text(&faculty, "FacultyID").unwrap_or_else(|| assignment.faculty_id.clone()),
                faculty_name: text(&faculty, "Name").unwrap_or_default(),
                subject_code: subject.subject_code.clone(),
                subject_name: subject.subject_name.clone().unwrap_or_default(),
            });
        }

        record_success();
        Ok(roster)
    }

    #[instrument(skip(store))]
    pub async fn list_for_student(
        store: &dyn DocumentStore,
        student_id: &str,
    ) -> Result<Vec<Document>, AppError> {
        Ok(QueryEngine::query_by_partition(
            store,
            Collection::Feedback,
            &KeyValue::from(student_id),
        )
        .await?)
    }

    /// Stores feedback for a (student, subject), replacing an earlier
    /// submission. The submission date is always today.
    #[instrument(skip(store, feedback))]
    pub async fn submit(store: &dyn DocumentStore, mut feedback: FeedbackDto) -> Result<(), AppError> {
        feedback.submitted_at = Some(today());
        store
            .put(Collection::Feedback, encode(&feedback)?, None)
            .await?;
        Ok(())
    }
}

fn text(document: &Document, attribute: &str) -> Option<String> {
    text_attr(document, attribute).map(|v| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusgate_store::MemoryStore;
    use serde_json::json;

    async fn seed(store: &MemoryStore, collection: Collection, rows: Value) {
        let docs = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row.as_object().cloned().unwrap())
            .collect();
        store.batch_put(collection, docs).await.unwrap();
    }

    async fn fixture() -> MemoryStore {
        let store = MemoryStore::new();
        seed(
            &store,
            Collection::Subjects,
            json!([
                {"CourseID": "BTECH", "SubjectCode": "CS301", "SubjectName": "Compilers", "Branch": "CSE", "Semester": 3},
                {"CourseID": "BTECH", "SubjectCode": "CS302", "SubjectName": "Networks", "Branch": "CSE", "Semester": "3"},
                {"CourseID": "BTECH", "SubjectCode": "CS303", "SubjectName": "Graphics", "Branch": "CSE", "Semester": 3},
                {"CourseID": "BTECH", "SubjectCode": "CS401", "SubjectName": "Databases", "Branch": "CSE", "Semester": 4}
            ]),
        )
        .await;
        seed(
            &store,
            Collection::FacultyAssignments,
            json!([
                {"CourseSemester": "BTECH#3", "SubjectCode#Section": "CS301#A", "SubjectCode": "CS301", "FacultyID": "F1", "Section": "A"},
                {"CourseSemester": "BTECH#3", "SubjectCode#Section": "CS301#B", "SubjectCode": "CS301", "FacultyID": "F9", "Section": "B"},
                {"CourseSemester": "BTECH#3", "SubjectCode#Section": "CS302#A", "SubjectCode": "CS302", "FacultyID": "F2", "Section": "A"}
            ]),
        )
        .await;
        seed(
            &store,
            Collection::Faculty,
            json!([
                {"FacultyID": "F1", "Department": "CSE", "Name": "Dr. Rao"},
                {"FacultyID": "F9", "Department": "CSE", "Name": "Dr. Iyer"}
            ]),
        )
        .await;
        store
    }

    #[tokio::test]
    async fn test_roster_first_match_and_skips() {
        let store = fixture().await;
        let roster = FeedbackService::compose_faculty_roster(&store, "BTECH", "3")
            .await
            .unwrap();

        // CS302's faculty is missing and CS303 has no assignment.
        assert_eq!(
            roster,
            vec![FacultyRosterEntry {
                faculty_id: "F1".into(),
                faculty_name: "Dr. Rao".into(),
                subject_code: "CS301".into(),
                subject_name: "Compilers".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_roster_for_empty_semester() {
        let store = fixture().await;
        let roster = FeedbackService::compose_faculty_roster(&store, "BTECH", "7")
            .await
            .unwrap();
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn test_submit_overwrites_date() {
        let store = MemoryStore::new();
        let feedback: FeedbackDto = serde_json::from_value(json!({
            "StudentID": "S1",
            "SubjectCode": "CS301",
            "FacultyID": "F1",
            "Rating": 4,
            "SubmittedAt": "1999-01-01"
        }))
        .unwrap();

        FeedbackService::submit(&store, feedback).await.unwrap();
        let rows = FeedbackService::list_for_student(&store, "S1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_ne!(rows[0]["SubmittedAt"], "1999-01-01");
        assert_eq!(rows[0]["Rating"], 4);
    }
}
