//! # Campusgate Models
//!
//! Typed records and request/response DTOs for the collections the gateway
//! reads and writes. Stored records use the PascalCase attribute names of the
//! underlying tables; inbound DTOs reject unknown fields.
//!
//! # Modules
//!
//! - [`people`]: students, faculty profile updates and login
//! - [`hostel`]: assignments, hostel metadata, fee ledger and complaints
//! - [`academics`]: subjects, faculty assignments, attendance, exams, results
//! - [`placement`]: placement applications
//! - [`grievances`]: grievances and course feedback

pub mod academics;
pub mod grievances;
pub mod hostel;
pub mod people;
pub mod placement;

use serde::Serialize;
use utoipa::ToSchema;

pub use academics::{
    AdmitCardDownloadedRequest, AttendanceBatch, AttendanceOverallResponse, AttendanceRecord,
    FacultyAssignment, FacultyRosterEntry, ResultsView, Subject,
};
pub use grievances::{CreateGrievanceDto, FeedbackDto, Grievance, GrievanceCreated};
pub use hostel::{
    CreateHostelComplaintDto, FeeLine, FeeMark, FeeStatus, Hostel, HostelAssignment,
    HostelComplaint, HostelComplaintCreated, HostelFee, HostelView, PayFeeRequest,
};
pub use people::{
    CreateStudentDto, FacultyField, FacultyProfileUpdate, FacultyProfileUpdated, LoginRequest,
    LoginResponse, LoginUser, Student, StudentProfileDto,
};
pub use placement::{ApplyRequest, PlacementApplication};

/// `{"success": true}` acknowledgement used by write endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{"url": ...}` returned by uploads.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub url: String,
}
