//! Placement applications.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const INITIAL_STATUS: &str = "Applied";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ApplyRequest {
    #[serde(rename = "studentId", default)]
    #[validate(length(min = 1))]
    pub student_id: String,
    #[serde(rename = "companyId", default)]
    #[validate(length(min = 1))]
    pub company_id: String,
    #[serde(rename = "courseId", default)]
    #[validate(length(min = 1))]
    pub course_id: String,
}

/// Stored `PlacementApplications` document. One per (student, company).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlacementApplication {
    #[serde(rename = "StudentID")]
    pub student_id: String,
    #[serde(rename = "CompanyID")]
    pub company_id: String,
    #[serde(rename = "CourseID")]
    pub course_id: String,
    #[serde(rename = "AppliedOn")]
    pub applied_on: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl PlacementApplication {
    pub fn submitted(request: ApplyRequest, applied_on: String) -> Self {
        Self {
            student_id: request.student_id,
            company_id: request.company_id,
            course_id: request.course_id,
            applied_on,
            status: INITIAL_STATUS.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DrivesParams {
    pub course_id: Option<String>,
}
