//! # Campusgate
//!
//! HTTP gateway for a campus management system. Every endpoint is a thin
//! translation onto a keyed document store: students, faculty, courses,
//! attendance, exams, hostel, placement, grievances and feedback.
//!
//! The server is assembled from:
//!
//! - [`state`]: shared [`AppState`](state::AppState) holding the document and
//!   object stores plus runtime config
//! - [`router`]: the `/api` tree, the root-level routes and the doc UIs
//! - [`modules`]: one folder per feature area (controller, service, router)
//! - [`validator`]: the `ValidatedJson` extractor
//! - [`docs`]: the OpenAPI document
//!
//! Writes that read-then-modify (hostel fee payments, room allocation) use
//! version-checked conditional updates and retry a bounded number of times
//! before answering `409 Conflict`.
//!
//! ```ignore
//! let state = campusgate::state::init_app_state().await?;
//! let app = campusgate::router::init_router(state);
//! ```

pub mod docs;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;
