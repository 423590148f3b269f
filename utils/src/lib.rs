//! Shared utilities.

pub mod logging;
pub mod stats;

pub use logging::{init_tracing_with, LogFormat};
pub use stats::StatsCounter;
