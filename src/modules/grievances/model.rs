pub use campusgate_models::grievances::{CreateGrievanceDto, Grievance, GrievanceCreated};
