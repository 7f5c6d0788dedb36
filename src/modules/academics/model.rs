pub use campusgate_models::academics::{
    ResourceFilterParams, Subject, SubjectByCodeParams, SubjectFilterParams,
};
