//! Alert Deduplicator
//!
//! Same-batch suppression: within one evaluation call, alerts sharing a type
//! and a value (rounded to one decimal place) are duplicates; the first
//! occurrence wins. Cross-time deduplication against persisted alerts (e.g.
//! "suppress if an unresolved alert of the same type exists within the last
//! hour") belongs to the persistence collaborator and is deliberately not
//! implemented here; see [`crate::repository::ReadingRepository`].

use std::collections::HashSet;

use tracing::debug;

use crate::types::{AlertType, CandidateAlert};

/// Dedup key: alert type plus the value rounded to one decimal place.
fn dedup_key(alert: &CandidateAlert) -> (AlertType, i64) {
    (alert.alert_type, (alert.value * 10.0).round() as i64)
}

/// Drop alerts that duplicate an earlier alert in the same batch.
///
/// Order-preserving; first occurrence of each key is retained.
pub fn dedup_alerts(alerts: Vec<CandidateAlert>) -> Vec<CandidateAlert> {
    let before = alerts.len();
    let mut seen = HashSet::new();
    let deduped: Vec<CandidateAlert> = alerts
        .into_iter()
        .filter(|alert| seen.insert(dedup_key(alert)))
        .collect();

    if deduped.len() < before {
        debug!(
            dropped = before - deduped.len(),
            retained = deduped.len(),
            "Suppressed duplicate alerts"
        );
    }
    deduped
}

/// Split a deduplicated batch into (notifiable, persist-only) alerts.
///
/// `Critical` and `High` alerts go to the notification sink; `Medium` and
/// `Low` are persisted without notification. Relative order is preserved in
/// both halves.
pub fn split_notifiable(
    alerts: Vec<CandidateAlert>,
) -> (Vec<CandidateAlert>, Vec<CandidateAlert>) {
    alerts
        .into_iter()
        .partition(|alert| alert.severity.is_notifiable())
}
