//! Grievances and course feedback.

use campusgate_core::serde::{deserialize_optional_number, deserialize_optional_string_or_number};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const GRIEVANCE_INITIAL_STATUS: &str = "Under Review";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateGrievanceDto {
    #[serde(rename = "StudentID", default)]
    #[validate(length(min = 1))]
    pub student_id: String,
    #[serde(rename = "Title", default)]
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(rename = "Category", default)]
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(rename = "Priority", default)]
    #[validate(length(min = 1))]
    pub priority: String,
    #[serde(rename = "Description", default)]
    #[validate(length(min = 1))]
    pub description: String,
}

/// Stored `Grievances` document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Grievance {
    #[serde(rename = "StudentID")]
    pub student_id: String,
    #[serde(rename = "GrievanceID")]
    pub grievance_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Priority")]
    pub priority: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "SubmittedAt")]
    pub submitted_at: String,
    #[serde(rename = "LastUpdatedAt")]
    pub last_updated_at: String,
}

impl Grievance {
    pub fn open(dto: CreateGrievanceDto, grievance_id: String, today: String) -> Self {
        Self {
            student_id: dto.student_id,
            grievance_id,
            title: dto.title,
            category: dto.category,
            priority: dto.priority,
            description: dto.description,
            status: GRIEVANCE_INITIAL_STATUS.to_string(),
            submitted_at: today.clone(),
            last_updated_at: today,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GrievanceCreated {
    pub success: bool,
    pub grievance: Grievance,
}

/// Stored `Feedback` document: one per (student, subject).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct FeedbackDto {
    #[serde(rename = "StudentID")]
    #[validate(length(min = 1, message = "StudentID is required"))]
    pub student_id: String,
    #[serde(rename = "SubjectCode")]
    #[validate(length(min = 1, message = "SubjectCode is required"))]
    pub subject_code: String,
    #[serde(rename = "FacultyID")]
    #[validate(length(min = 1, message = "FacultyID is required"))]
    pub faculty_id: String,
    #[serde(
        rename = "Rating",
        default,
        deserialize_with = "deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<f64>)]
    pub rating: Option<serde_json::Number>,
    #[serde(rename = "Comments", default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(
        rename = "Semester",
        default,
        deserialize_with = "deserialize_optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub semester: Option<String>,
    /// Always overwritten with the submission date.
    #[serde(rename = "SubmittedAt", default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
}
