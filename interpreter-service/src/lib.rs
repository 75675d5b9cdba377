//! interpreter-service: explains constitutional articles in plain language via Gemini.
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;

pub use startup::{AppState, Application};
