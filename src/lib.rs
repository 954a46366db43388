//! Solsense: Solar Telemetry Intelligence
//!
//! Library core for ingesting periodic electrical telemetry from remote
//! solar-monitoring devices and turning it into operator-facing signal.
//!
//! ## Architecture
//!
//! - **Evaluation pipeline**: per-reading power derivation, status
//!   classification, anomaly detection, threshold alerting, deduplication
//! - **Analytics**: trend analysis, energy integration, time-bucket
//!   aggregation, period summary reports
//! - **Collaborator seams**: async traits for reading storage, alert
//!   notification, and report delivery
//!
//! Every evaluation and aggregation operation is a pure, synchronous
//! transformation over in-memory collections. I/O lives behind the traits in
//! [`repository`]; callers fetch reading sets, invoke the core, and persist
//! the outputs.

pub mod analytics;
pub mod config;
pub mod evaluation;
pub mod numfmt;
pub mod power;
pub mod repository;
pub mod simulator;
pub mod types;

// Re-export configuration
pub use config::{MonitorConfig, SystemRating, ThresholdConfig};

// Re-export commonly used types
pub use types::{
    AlertSeverity, AlertType, Anomaly, AnomalyKind, AnomalySeverity, CandidateAlert,
    DailyStatistics, DeviceStatus, PeakDay, PeriodSummaryReport, RawReading, Reading,
    Recommendation, RecommendationPriority, TimeBucket, TrendDirection, TrendInsight,
    TrendResult,
};

// Re-export the evaluation pipeline
pub use evaluation::{Evaluation, ReadingProcessor};

// Re-export analytics entry points
pub use analytics::{
    aggregate_buckets, build_period_summary, daily_statistics, integrate_energy_kwh,
    linear_trend, BucketInterval,
};

// Re-export collaborator seams
pub use repository::{
    InMemoryReadingRepository, NotificationSink, ReadingId, ReadingRepository, ReportSink,
    RepositoryError, SinkError,
};
