//! # Campusgate Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`store`]: document store backend, region and retry bound
//! - [`object_store`]: upload storage backend and limits
//! - [`cors`]: allowed origins
//! - [`rate_limit`]: per-client rate limiting
//! - [`server`]: bind addresses
//!
//! Every type has a `from_env()` constructor and a `Default`.

pub mod cors;
pub mod object_store;
pub mod rate_limit;
pub mod server;
pub mod store;

pub use cors::CorsConfig;
pub use object_store::{ObjectStoreBackend, ObjectStoreConfig};
pub use rate_limit::{ClientGovernorConfig, RateLimitConfig};
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};
