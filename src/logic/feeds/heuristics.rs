//! Heuristics Generator
//!
//! Synthetic fallback source: produces one weighted-random threat record
//! per call when the live feeds are dark, so the pipeline never runs dry.

use rand::Rng;

use crate::logic::geo;
use crate::logic::threat::normalize::{random_attack_type, random_ip};
use crate::logic::threat::{FeedKind, PartialThreat, Severity};

/// Probability of a CRITICAL record
const CRITICAL_RATE: f64 = 0.15;

/// Produce one synthetic record. The id is left to the normalizer; every
/// other field is drawn here so normalization only stamps timestamps and
/// geo data on top.
pub fn generate() -> PartialThreat {
    let mut rng = rand::thread_rng();

    let geo = &geo::GEO_TABLE[rng.gen_range(0..geo::GEO_TABLE.len())];
    let severity = if rng.gen::<f64>() < CRITICAL_RATE {
        Severity::Critical
    } else {
        Severity::High
    };

    PartialThreat {
        id: None,
        src_ip: Some(random_ip()),
        attack_type: Some(random_attack_type().to_string()),
        severity: Some(severity),
        source: Some(FeedKind::Heuristics.tag().to_string()),
        neural_score: Some(0.85 + rng.gen::<f64>() * 0.10),
        risk_score: Some(rng.gen_range(70..100)),
        asn: Some(format!("AS{}", rng.gen_range(1_000..91_000))),
        asn_owner: Some("Heuristic Cloud Compute".to_string()),
        country_code: Some(geo.code.to_string()),
        threat_vector: Some("Heuristic Network Anomaly".to_string()),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_record_shape() {
        for _ in 0..100 {
            let record = generate();

            let severity = record.severity.unwrap();
            assert!(severity == Severity::Critical || severity == Severity::High);

            let neural = record.neural_score.unwrap();
            assert!((0.85..0.95).contains(&neural));

            let risk = record.risk_score.unwrap();
            assert!((70..100).contains(&risk));

            assert_eq!(record.src_ip.unwrap().split('.').count(), 4);
            assert!(record.asn.unwrap().starts_with("AS"));
            assert_eq!(record.source.as_deref(), Some("VAYU_HEURISTICS"));

            let code = record.country_code.unwrap();
            assert!(geo::GEO_TABLE.iter().any(|e| e.code == code));
        }
    }
}
