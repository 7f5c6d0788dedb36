use serde::Deserialize;
use utoipa::IntoParams;

pub use campusgate_models::academics::{
    AttendanceBatch, AttendanceOverallResponse, AttendanceRecord,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceParams {
    pub student_id: Option<String>,
}
