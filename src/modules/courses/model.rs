pub use campusgate_models::academics::CourseSemesterParams;
