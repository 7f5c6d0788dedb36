pub mod academics;
pub mod admin;
pub mod attendance;
pub mod auth;
pub mod courses;
pub mod exams;
pub mod faculty;
pub mod feedback;
pub mod fees;
pub mod grievances;
pub mod hostel;
pub mod placement;
pub mod students;
