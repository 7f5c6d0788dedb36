//! Subjects, faculty assignments, attendance, exams and results.

use campusgate_core::derived::AttendanceOverall;
use campusgate_core::serde::{
    deserialize_i64_lenient, deserialize_optional_string_or_number,
    deserialize_string_or_number,
};
use campusgate_store::{composite, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Stored `Subjects` document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Subject {
    #[serde(rename = "CourseID")]
    pub course_id: String,
    #[serde(rename = "SubjectCode")]
    pub subject_code: String,
    #[serde(rename = "SubjectName", default)]
    pub subject_name: Option<String>,
    #[serde(rename = "Branch", default)]
    pub branch: Option<String>,
    #[serde(rename = "Specialization", default)]
    pub specialization: Option<String>,
    #[serde(
        rename = "Semester",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub semester: Option<String>,
}

/// Stored `FacultyAssignments` document, partitioned by `<course>#<semester>`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacultyAssignment {
    #[serde(rename = "CourseSemester")]
    pub course_semester: String,
    #[serde(rename = "SubjectCode")]
    pub subject_code: String,
    #[serde(rename = "FacultyID")]
    pub faculty_id: String,
    #[serde(
        rename = "Section",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub section: Option<String>,
}

/// One entry of the feedback roster: who teaches which subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FacultyRosterEntry {
    #[serde(rename = "FacultyID")]
    pub faculty_id: String,
    #[serde(rename = "FacultyName")]
    pub faculty_name: String,
    #[serde(rename = "SubjectCode")]
    pub subject_code: String,
    #[serde(rename = "SubjectName")]
    pub subject_name: String,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SubjectFilterParams {
    pub course_id: Option<String>,
    pub branch: Option<String>,
    pub specialization: Option<String>,
    pub semester: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SubjectByCodeParams {
    pub course_id: Option<String>,
    pub subject_code: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFilterParams {
    pub course_id: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<String>,
    pub section: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FacultyAssignmentParams {
    pub course_id: Option<String>,
    pub semester: Option<String>,
    pub section: Option<String>,
    pub faculty_id: Option<String>,
}

/// One attendance row. The sort key is derived from date and subject code
/// when the client leaves it out.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AttendanceRecord {
    #[serde(rename = "StudentID")]
    #[validate(length(min = 1, message = "StudentID is required"))]
    pub student_id: String,
    #[serde(rename = "Date")]
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[serde(rename = "SubjectCode")]
    #[validate(length(min = 1, message = "SubjectCode is required"))]
    pub subject_code: String,
    #[serde(rename = "Status")]
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    #[serde(rename = "Date#SubjectCode", default)]
    pub date_subject: Option<String>,
    #[serde(
        rename = "Semester",
        default,
        deserialize_with = "deserialize_optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub semester: Option<String>,
    #[serde(rename = "MarkedBy", default, skip_serializing_if = "Option::is_none")]
    pub marked_by: Option<String>,
}

impl AttendanceRecord {
    /// Fills in the composite sort key.
    pub fn with_sort_key(mut self) -> Self {
        if self.date_subject.as_deref().is_none_or(str::is_empty) {
            self.date_subject = Some(composite(&self.date, &self.subject_code));
        }
        self
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AttendanceBatch {
    #[serde(default)]
    #[validate(length(min = 1, message = "Invalid records"), nested)]
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceOverallResponse {
    #[schema(value_type = Object)]
    pub overall: AttendanceOverall,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CourseSemesterParams {
    pub course_id: Option<String>,
    pub semester: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct SemesterParams {
    pub semester: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AdmitCardDownloadedRequest {
    #[serde(rename = "studentId", deserialize_with = "deserialize_string_or_number")]
    #[validate(length(min = 1, message = "studentId is required"))]
    pub student_id: String,
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    #[validate(range(min = 1, message = "semester must be positive"))]
    #[schema(value_type = i64)]
    pub semester: i64,
}

/// Results for one semester plus the optional semester summary.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ResultsView {
    #[schema(value_type = Vec<Object>)]
    pub subjects: Vec<Document>,
    #[schema(value_type = Option<Object>)]
    pub summary: Option<Document>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attendance_sort_key_derived() {
        let record: AttendanceRecord = serde_json::from_value(json!({
            "StudentID": "S1",
            "Date": "2024-03-01",
            "SubjectCode": "CS101",
            "Status": "Present"
        }))
        .unwrap();
        let record = record.with_sort_key();
        assert_eq!(record.date_subject.as_deref(), Some("2024-03-01#CS101"));
    }

    #[test]
    fn test_attendance_sort_key_kept_when_supplied() {
        let record: AttendanceRecord = serde_json::from_value(json!({
            "StudentID": "S1",
            "Date": "2024-03-01",
            "SubjectCode": "CS101",
            "Status": "Absent",
            "Date#SubjectCode": "2024-03-01#CS101#2"
        }))
        .unwrap();
        assert_eq!(
            record.with_sort_key().date_subject.as_deref(),
            Some("2024-03-01#CS101#2")
        );
    }

    #[test]
    fn test_empty_batch_fails_validation() {
        let batch: AttendanceBatch = serde_json::from_value(json!({"records": []})).unwrap();
        assert!(batch.validate().is_err());

        let missing: AttendanceBatch = serde_json::from_value(json!({})).unwrap();
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_results_view_serializes_null_summary() {
        let value = serde_json::to_value(ResultsView::default()).unwrap();
        assert_eq!(value, json!({"subjects": [], "summary": null}));
    }

    #[test]
    fn test_admit_card_semester_accepts_string() {
        let req: AdmitCardDownloadedRequest =
            serde_json::from_value(json!({"studentId": "S1", "semester": "4"})).unwrap();
        assert_eq!(req.semester, 4);
        assert!(req.validate().is_ok());
    }
}
