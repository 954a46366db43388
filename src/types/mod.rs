//! Shared data structures for the solar telemetry pipeline
//!
//! This module defines the core value types:
//! - `RawReading` / `Reading`: one telemetry sample, before/after ingestion
//! - `Anomaly`, `CandidateAlert`: evaluation outputs pending persistence
//! - `DailyStatistics`, `TimeBucket`, `TrendResult`, `PeriodSummaryReport`:
//!   aggregation outputs consumed by dashboards and report rendering
//!
//! Contract types serialize with camelCase field names; downstream layers
//! depend on those names and on the rounding precision applied by
//! [`crate::numfmt`].

mod alert;
mod reading;
mod report;

pub use alert::*;
pub use reading::*;
pub use report::*;
