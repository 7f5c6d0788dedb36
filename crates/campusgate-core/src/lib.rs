//! # Campusgate Core
//!
//! Shared building blocks for the Campusgate gateway:
//!
//! - [`errors`]: application error type with HTTP response conversion
//! - [`derived`]: attendance percentage and result-set orderings
//! - [`object_storage`]: upload storage (local directory or S3)
//! - [`serde`]: lenient string-or-number deserializers

pub mod derived;
pub mod errors;
pub mod object_storage;
pub mod serde;

pub use errors::{AppError, ErrorResponse};
pub use object_storage::{LocalObjectStore, ObjectStore, S3ObjectStore, StorageError, UploadLimits};
