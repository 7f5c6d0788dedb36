pub use campusgate_models::people::{LoginRequest, LoginResponse, LoginUser};

pub const STUDENT_USER_TYPE: &str = "student";
