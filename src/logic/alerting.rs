//! Alerting Policy
//!
//! CRITICAL ingestions raise a transient burst signal (1 s) and a
//! sustained tactical alert (5 s). Every new CRITICAL restarts both
//! windows, so the alert can never drop while a window is still open.
//!
//! Timer state is data, not tasks: observers compare deadlines against
//! the clock, and a torn-down session leaves nothing running.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use super::threat::Severity;
use crate::constants;

#[derive(Debug, Default)]
struct AlertState {
    burst_until: Option<Instant>,
    alert_until: Option<Instant>,
    burst_severity: Option<Severity>,
}

#[derive(Debug, Default)]
pub struct AlertCenter {
    state: Mutex<AlertState>,
}

impl AlertCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the alerting policy for one ingested severity.
    pub fn observe(&self, severity: Severity) {
        if severity != Severity::Critical {
            return;
        }

        let now = Instant::now();
        let mut state = self.state.lock();
        state.burst_until = Some(now + Duration::from_millis(constants::BURST_CLEAR_MS));
        state.alert_until = Some(now + Duration::from_millis(constants::TACTICAL_ALERT_CLEAR_MS));
        state.burst_severity = Some(severity);

        log::warn!("Tactical alert raised: CRITICAL ingestion");
    }

    /// Severity of the burst signal while its window is open.
    pub fn burst_trigger(&self) -> Option<Severity> {
        let state = self.state.lock();
        match state.burst_until {
            Some(deadline) if Instant::now() < deadline => state.burst_severity,
            _ => None,
        }
    }

    /// True while any tactical-alert window is open.
    pub fn is_tactical_alert(&self) -> bool {
        self.state
            .lock()
            .alert_until
            .map_or(false, |deadline| Instant::now() < deadline)
    }
}

// ============================================================================
// TESTS
// ============================================================================
