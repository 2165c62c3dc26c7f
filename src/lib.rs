//! hashpulse - Hashtag Trend Analytics
//!
//! Tracks hashtag activity snapshots per platform and derives trend
//! classification, growth rankings, short-horizon forecasts and aggregate
//! reports from them.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`] - Core data structures and types
//! - [`analytics`] - Pure trend, prediction, scoring, ranking and report functions
//! - [`store`] - Observation storage (SQLite, in-memory)
//! - [`service`] - Queries and ingestion binding the store to the analytics
//! - [`api`] / [`server`] - HTTP API
//! - [`config`] - Configuration management and settings
//! - [`metrics`] - Prometheus metrics
//!
//! # Example
//!
//! ```no_run
//! use hashpulse::config::Config;
//! use hashpulse::service::AnalyticsService;
//! use hashpulse::store::create_sqlite_store;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let store = create_sqlite_store(&config.database.sqlite_path)?;
//!     let service = AnalyticsService::new(store, config.analytics);
//!     let report = service.compute_trend("rust", None, Some(7))?;
//!     println!("{}", report.analysis.trend);
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod server;
pub mod service;
pub mod store;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{
        analyze_trend, predict, rank_by_growth, trending_score, ObservationWindow,
        PredictionResult, TrendAnalysis, TrendDirection,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, HashpulseErrorTrait, Result};
    pub use crate::models::{
        Category, HashtagKey, HashtagRecord, HashtagSnapshot, Observation, Platform,
    };
    pub use crate::service::AnalyticsService;
    pub use crate::store::{ObservationStore, SharedObservationStore};
}

// Direct re-exports for convenience
pub use models::{HashtagKey, HashtagRecord, Observation, Platform};
