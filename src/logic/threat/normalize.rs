//! Entity Normalizer
//!
//! Maps heterogeneous upstream shapes into the canonical `Threat`.
//! Never fails: every missing field is substituted with the documented
//! default for the producing feed kind, the country code is resolved
//! through the geo table (unknown codes collapse to the sentinel), and
//! `first_seen` is stamped here rather than trusted from upstream.

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use uuid::Uuid;

use super::types::{FeedKind, PartialThreat, Severity, Threat};
use crate::logic::geo;

/// Attack classification labels, used when upstream gives none and by the
/// heuristics generator.
pub const ATTACK_TYPES: &[&str] = &[
    "Ransomware_C2_Beacon",
    "Advanced_Phishing_Link",
    "Botnet_Drone_Poll",
    "SQL_Injection_Probe",
    "Zero_Day_Exploit_Scan",
    "Brute_Force_Attempt",
    "Cryptominer_Payload",
    "Lateral_Movement_Sync",
];

/// Source tag for live records that carry no origin of their own
const DEFAULT_LIVE_SOURCE: &str = "ABUSE.CH";

/// Generate a random dotted-quad address
pub fn random_ip() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(0..256),
        rng.gen_range(0..256),
        rng.gen_range(0..256),
        rng.gen_range(0..256)
    )
}

/// Random entry of the attack label list
pub fn random_attack_type() -> &'static str {
    ATTACK_TYPES[rand::thread_rng().gen_range(0..ATTACK_TYPES.len())]
}

/// Normalize a partial record into a canonical `Threat`.
pub fn normalize(partial: PartialThreat, kind: FeedKind) -> Threat {
    // Unknown or missing codes collapse to the sentinel entry, so the
    // stored code always matches a geo table row.
    let geo = geo::resolve(partial.country_code.as_deref().unwrap_or(geo::UNKNOWN_CODE));

    let neural_default = match kind {
        FeedKind::Heuristics => 0.90,
        _ => 0.92,
    };

    Threat {
        id: partial
            .id
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string()),
        timestamp: Utc::now().timestamp_millis(),
        src_ip: partial.src_ip.unwrap_or_else(random_ip),
        attack_type: partial
            .attack_type
            .unwrap_or_else(|| random_attack_type().to_string()),
        severity: partial.severity.unwrap_or(Severity::High),
        source: partial.source.unwrap_or_else(|| match kind {
            FeedKind::Heuristics => FeedKind::Heuristics.tag().to_string(),
            _ => DEFAULT_LIVE_SOURCE.to_string(),
        }),
        neural_score: partial.neural_score.unwrap_or(neural_default).clamp(0.0, 1.0),
        risk_score: partial.risk_score.unwrap_or(88).min(100),
        asn: partial.asn.unwrap_or_else(|| "N/A".to_string()),
        asn_owner: partial
            .asn_owner
            .unwrap_or_else(|| "Authority Node".to_string()),
        country_code: geo.code.to_string(),
        country_name: geo.name.to_string(),
        coordinates: format!("{}, {}", geo.lat, geo.lon),
        lat: geo.lat.to_string(),
        lon: geo.lon.to_string(),
        threat_vector: partial
            .threat_vector
            .unwrap_or_else(|| "Live Network Probe".to_string()),
        first_seen: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

// ============================================================================
// TESTS
// ============================================================================
