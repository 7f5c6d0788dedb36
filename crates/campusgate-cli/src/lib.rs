//! # Campusgate CLI
//!
//! Seeding and bulk-import utilities used by the `campusgate-cli` binary.
//!
//! ```ignore
//! use campusgate_cli::seeder::{seed_all, SeedConfig};
//!
//! let report = seed_all(store.as_ref(), &SeedConfig::default()).await?;
//! ```

pub mod import;
pub mod seeder;
