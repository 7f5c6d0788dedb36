pub use campusgate_models::placement::{ApplyRequest, DrivesParams, PlacementApplication};
