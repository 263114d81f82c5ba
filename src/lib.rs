// Library crate for the box-score stats service
// This file exposes the public API for integration tests

pub mod config;
pub mod routes;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use routes::router;
pub use shared::{AppError, AppState};
pub use stats::{InMemoryStatRepository, StatRepository, StatsError, StatsService};
