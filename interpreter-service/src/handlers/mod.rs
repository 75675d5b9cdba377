//! HTTP handlers for interpreter-service.

pub mod health;
pub mod interpret;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use interpret::interpret;
