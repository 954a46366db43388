//! Aggregation and statistical analysis over reading collections
//!
//! Pure, synchronous transformations: collections of readings flow through
//! the time-bucket aggregator and energy integrator into the period summary
//! builder, which also invokes the trend analyzer for predictive insights.
//! None of these functions perform I/O or read a clock.
//!
//! Callers feeding long histories should chunk fetches at
//! [`crate::config::defaults::MAX_BATCH_SIZE`]; each function allocates
//! O(input) only.

pub mod buckets;
pub mod energy;
pub mod summary;
pub mod trend;

pub use buckets::{aggregate_buckets, bucket_key, BucketInterval};
pub use energy::integrate_energy_kwh;
pub use summary::{build_period_summary, daily_statistics};
pub use trend::{linear_trend, trend_direction};
