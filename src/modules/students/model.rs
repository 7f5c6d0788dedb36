use campusgate_models::hostel::HostelAssignment;
use serde::Serialize;
use utoipa::ToSchema;

pub use campusgate_models::people::{
    CreateStudentDto, RosterParams, Student, StudentFilterParams, StudentProfileDto,
};

/// Multipart field carrying the photo.
pub const PHOTO_FIELD: &str = "photo";
pub const PHOTO_CONTENT_TYPE: &str = "image/jpeg";

/// A newly created student together with the room it was given.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentCreated {
    #[serde(flatten)]
    pub student: Student,
    #[serde(rename = "hostelAssignment")]
    pub hostel_assignment: HostelAssignment,
}

pub fn photo_key(student_id: &str) -> String {
    format!("{student_id}.jpg")
}
