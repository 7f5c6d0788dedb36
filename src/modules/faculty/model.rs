pub use campusgate_models::academics::FacultyAssignmentParams;
pub use campusgate_models::people::{FacultyField, FacultyProfileUpdate, FacultyProfileUpdated};

pub const PROFILE_UPDATED: &str = "Profile updated successfully";
