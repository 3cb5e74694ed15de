//! Threat Types
//!
//! Data structures only. Normalization logic lives in `normalize.rs`.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY
// ============================================================================

/// Threat severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CANONICAL ENTITY
// ============================================================================

/// Fully-normalized threat record. Immutable once created; every field is
/// populated after normalization, so no partial entity ever escapes the
/// aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Threat {
    /// Unique within the session buffer (collisions tolerated for display)
    pub id: String,
    /// Ingestion instant (epoch millis)
    pub timestamp: i64,
    /// IP or hostname depending on source, not format-validated
    pub src_ip: String,
    /// Free-text classification label
    pub attack_type: String,
    pub severity: Severity,
    /// Origin feed tag (THREATFOX / URLHAUS / VAYU_HEURISTICS)
    pub source: String,
    /// Confidence-like score in [0, 1]
    pub neural_score: f64,
    /// Risk score in [0, 100]
    pub risk_score: u8,
    /// Network authority identifier, "N/A" when absent
    pub asn: String,
    pub asn_owner: String,
    /// 2-letter code, "??" for unknown origins
    pub country_code: String,
    pub country_name: String,
    /// "lat, lon" display string
    pub coordinates: String,
    pub lat: String,
    pub lon: String,
    /// Ingress mechanism label
    pub threat_vector: String,
    /// ISO-8601, stamped at normalization time
    pub first_seen: String,
}

// ============================================================================
// PARTIAL RECORD
// ============================================================================

/// Partial record as returned by a feed adapter, before normalization.
/// Anything left `None` is filled with the documented default for the
/// producing feed kind.
#[derive(Debug, Clone, Default)]
pub struct PartialThreat {
    pub id: Option<String>,
    pub src_ip: Option<String>,
    pub attack_type: Option<String>,
    pub severity: Option<Severity>,
    pub source: Option<String>,
    pub neural_score: Option<f64>,
    pub risk_score: Option<u8>,
    pub asn: Option<String>,
    pub asn_owner: Option<String>,
    pub country_code: Option<String>,
    pub threat_vector: Option<String>,
}

// ============================================================================
// FEED KIND
// ============================================================================

/// Which pipeline produced a partial record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    ThreatFox,
    UrlHaus,
    Heuristics,
}

impl FeedKind {
    /// Canonical source tag for this feed
    pub fn tag(&self) -> &'static str {
        match self {
            FeedKind::ThreatFox => "THREATFOX",
            FeedKind::UrlHaus => "URLHAUS",
            FeedKind::Heuristics => "VAYU_HEURISTICS",
        }
    }
}
