//! Collaborator seams: reading storage, alert notification, report delivery
//!
//! The core never queries storage or delivers anything itself: it is handed
//! reading collections and returns value objects. These traits are the
//! boundary where the surrounding system does its async I/O.
//!
//! Cross-time alert deduplication ("suppress if an unresolved alert of the
//! same type exists within the last N minutes") is a persistence-side
//! concern and belongs behind [`NotificationSink`] / the alert store, not in
//! the same-batch deduplicator.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::types::{CandidateAlert, PeriodSummaryReport, Reading};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Rejected reading: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

// ============================================================================
// Traits
// ============================================================================

/// Identifier assigned to a persisted reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadingId(pub u64);

/// Reading storage as seen by the core's callers.
#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Most recent reading for a device, if any.
    async fn latest(&self, device_id: &str) -> Result<Option<Reading>, RepositoryError>;

    /// Readings in `[start, end]`, ascending by timestamp.
    ///
    /// Implementations should let callers page long histories in chunks of
    /// [`crate::config::defaults::MAX_BATCH_SIZE`].
    async fn range(
        &self,
        device_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reading>, RepositoryError>;

    /// Persist one evaluated reading.
    async fn insert(&self, reading: Reading) -> Result<ReadingId, RepositoryError>;
}

/// Delivery target for notifiable (`High`/`Critical`) alerts.
///
/// The core decides *which* alerts qualify; delivery mechanics live here.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, alert: &CandidateAlert) -> Result<(), SinkError>;
}

/// Rendering target for period summary reports.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn submit(&self, report: &PeriodSummaryReport) -> Result<(), SinkError>;
}

// ============================================================================
// In-Memory Repository
// ============================================================================

/// Map-backed repository for tests and single-process deployments.
///
/// Readings are kept per device in timestamp order; inserts place
/// out-of-order arrivals at their sorted position so `range` stays
/// ascending.
#[derive(Debug, Default)]
pub struct InMemoryReadingRepository {
    readings: RwLock<HashMap<String, Vec<Reading>>>,
    next_id: AtomicU64,
}

impl InMemoryReadingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total readings across all devices.
    pub async fn len(&self) -> usize {
        self.readings.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ReadingRepository for InMemoryReadingRepository {
    async fn latest(&self, device_id: &str) -> Result<Option<Reading>, RepositoryError> {
        let readings = self.readings.read().await;
        Ok(readings
            .get(device_id)
            .and_then(|device| device.last())
            .cloned())
    }

    async fn range(
        &self,
        device_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reading>, RepositoryError> {
        let readings = self.readings.read().await;
        Ok(readings
            .get(device_id)
            .map(|device| {
                device
                    .iter()
                    .filter(|r| r.timestamp >= start && r.timestamp <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, reading: Reading) -> Result<ReadingId, RepositoryError> {
        if reading.device_id.is_empty() {
            return Err(RepositoryError::Rejected("empty device id".into()));
        }

        let id = ReadingId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut readings = self.readings.write().await;
        let device = readings.entry(reading.device_id.clone()).or_default();
        let position = device.partition_point(|r| r.timestamp <= reading.timestamp);
        device.insert(position, reading);

        debug!(id = id.0, "Stored reading");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceStatus;
    use chrono::{Duration, TimeZone};

    fn reading_at(minutes: i64) -> Reading {
        let base = Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap();
        Reading {
            device_id: "panel-01".into(),
            timestamp: base + Duration::minutes(minutes),
            voltage: Some(12.5),
            current: Some(4.0),
            temperature: Some(35.0),
            power: Some(50.0),
            battery_level: None,
            status: DeviceStatus::Normal,
            is_anomaly: false,
        }
    }

    #[tokio::test]
    async fn latest_returns_newest_reading() {
        let repo = InMemoryReadingRepository::new();
        repo.insert(reading_at(0)).await.unwrap();
        repo.insert(reading_at(10)).await.unwrap();

        let latest = repo.latest("panel-01").await.unwrap().unwrap();
        assert_eq!(latest.timestamp, reading_at(10).timestamp);
        assert!(repo.latest("panel-99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn range_is_inclusive_and_ascending_despite_insert_order() {
        let repo = InMemoryReadingRepository::new();
        for minutes in [20, 0, 10, 30] {
            repo.insert(reading_at(minutes)).await.unwrap();
        }

        let start = reading_at(0).timestamp;
        let end = reading_at(20).timestamp;
        let range = repo.range("panel-01", start, end).await.unwrap();
        assert_eq!(range.len(), 3);
        assert!(range.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test]
    async fn empty_device_id_is_rejected() {
        let repo = InMemoryReadingRepository::new();
        let mut reading = reading_at(0);
        reading.device_id = String::new();
        assert!(matches!(
            repo.insert(reading).await,
            Err(RepositoryError::Rejected(_))
        ));
    }
}
