pub use campusgate_models::academics::{FacultyAssignment, FacultyRosterEntry, Subject};
pub use campusgate_models::grievances::FeedbackDto;
