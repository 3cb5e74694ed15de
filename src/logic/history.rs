//! Threat History Buffer & Session Counters
//!
//! Bounded, newest-first rolling window over ingested entities, plus the
//! derived session counters shown in the terminal header.

use std::collections::VecDeque;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::threat::Threat;
use crate::constants;

/// Source tags counted as high-confidence feed hits (case-sensitive)
static HIGH_CONFIDENCE_FEED: Lazy<Regex> =
    Lazy::new(|| Regex::new("THREATFOX|URLHAUS").expect("static pattern"));

// ============================================================================
// HISTORY BUFFER
// ============================================================================

/// Bounded, insertion-ordered collection of canonical entities, most
/// recent first. Owned by the session context; consumers only ever get
/// cloned snapshots.
#[derive(Debug, Default)]
pub struct ThreatHistoryBuffer {
    entries: VecDeque<Threat>,
}

impl ThreatHistoryBuffer {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(constants::HISTORY_CAPACITY),
        }
    }

    /// Prepend a threat, evicting the oldest entry past capacity.
    pub fn ingest(&mut self, threat: Threat) {
        self.entries.push_front(threat);
        self.entries.truncate(constants::HISTORY_CAPACITY);
    }

    /// Most recent entry
    pub fn head(&self) -> Option<&Threat> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only snapshot, newest first
    pub fn snapshot(&self) -> Vec<Threat> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Threat> {
        self.entries.iter()
    }
}

// ============================================================================
// SESSION COUNTERS
// ============================================================================

/// Derived counters. Created at session start, mutated on every ingestion
/// and once per second by the stats tick, dropped on teardown.
#[derive(Debug, Clone, Serialize)]
pub struct NeuralStats {
    /// Total ingested this session
    pub threat_count: u64,
    /// Entities sourced from a high-confidence feed
    pub abuse_count: u64,
    /// Display accuracy figure, re-jittered by the tick
    pub accuracy: f64,
    pub entropy: f64,
    /// Session uptime in seconds
    pub uptime: u64,
}

impl Default for NeuralStats {
    fn default() -> Self {
        Self {
            threat_count: 0,
            abuse_count: 0,
            accuracy: 99.998,
            entropy: 0.012,
            uptime: 0,
        }
    }
}

impl NeuralStats {
    /// Account for one ingested threat.
    pub fn record(&mut self, threat: &Threat) {
        self.threat_count += 1;
        if HIGH_CONFIDENCE_FEED.is_match(&threat.source) {
            self.abuse_count += 1;
        }
    }

    /// Once-per-second tick: uptime plus the jittered accuracy figure.
    pub fn tick(&mut self) {
        self.uptime += 1;
        self.accuracy = 99.9982 + rand::random::<f64>() * 0.0001;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::threat::{normalize, FeedKind, PartialThreat};

    fn threat(id: &str, source: &str) -> Threat {
        normalize(
            PartialThreat {
                id: Some(id.to_string()),
                source: Some(source.to_string()),
                ..Default::default()
            },
            FeedKind::ThreatFox,
        )
    }

    #[test]
    fn test_buffer_holds_newest_first() {
        let mut buffer = ThreatHistoryBuffer::new();
        for i in 0..5 {
            buffer.ingest(threat(&format!("t{}", i), "THREATFOX"));
        }

        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.head().unwrap().id, "t4");

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot[0].id, "t4");
        assert_eq!(snapshot[4].id, "t0");
    }

    #[test]
    fn test_buffer_evicts_past_capacity() {
        let mut buffer = ThreatHistoryBuffer::new();
        for i in 0..(constants::HISTORY_CAPACITY + 5) {
            buffer.ingest(threat(&format!("t{}", i), "THREATFOX"));
        }

        assert_eq!(buffer.len(), constants::HISTORY_CAPACITY);

        // newest 50 survive, in reverse chronological order
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.first().unwrap().id, "t54");
        assert_eq!(snapshot.last().unwrap().id, "t5");
    }

    #[test]
    fn test_stats_count_high_confidence_sources() {
        let mut stats = NeuralStats::default();
        stats.record(&threat("a", "THREATFOX"));
        stats.record(&threat("b", "URLHAUS"));
        stats.record(&threat("c", "VAYU_HEURISTICS"));
        stats.record(&threat("d", "ABUSE.CH"));

        assert_eq!(stats.threat_count, 4);
        assert_eq!(stats.abuse_count, 2);
    }

    #[test]
    fn test_pattern_is_case_sensitive() {
        let mut stats = NeuralStats::default();
        stats.record(&threat("a", "threatfox"));
        assert_eq!(stats.abuse_count, 0);
    }

    #[test]
    fn test_tick_advances_uptime_and_jitters_accuracy() {
        let mut stats = NeuralStats::default();
        stats.tick();
        stats.tick();

        assert_eq!(stats.uptime, 2);
        assert!(stats.accuracy >= 99.9982);
        assert!(stats.accuracy <= 99.9983);
    }
}
