pub mod metrics;
pub mod prompt;
pub mod providers;

pub use metrics::{get_metrics, init_metrics};
