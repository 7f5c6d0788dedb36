pub use campusgate_models::academics::{
    AdmitCardDownloadedRequest, CourseSemesterParams, ResultsView, SemesterParams,
};
