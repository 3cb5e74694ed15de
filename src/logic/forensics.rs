//! Local Forensic Engine
//!
//! Deterministic correlation analysis over the rolling history. The only
//! nondeterminism in the surrounding system is the artificial display
//! delay, which lives in the session layer, not here: identical inputs
//! yield byte-identical report text.

use super::threat::Threat;

/// Max sibling nodes surfaced in the correlation graph
const MAX_RELATED_NODES: usize = 6;

/// Other buffer entries sharing the focused entity's network authority.
pub fn same_authority_count(focused: &Threat, history: &[Threat]) -> usize {
    history
        .iter()
        .filter(|t| t.asn == focused.asn && t.id != focused.id)
        .count()
}

/// Other buffer entries sharing the focused entity's region.
pub fn same_region_count(focused: &Threat, history: &[Threat]) -> usize {
    history
        .iter()
        .filter(|t| t.country_code == focused.country_code && t.id != focused.id)
        .count()
}

/// Buffer entries related to the focused entity by shared authority or
/// region, for relationship display. Capped at six.
pub fn related_nodes<'a>(focused: &Threat, history: &'a [Threat]) -> Vec<&'a Threat> {
    history
        .iter()
        .filter(|t| t.id != focused.id)
        .filter(|t| t.asn == focused.asn || t.country_code == focused.country_code)
        .take(MAX_RELATED_NODES)
        .collect()
}

/// Render the forensic report for a focused entity against the current
/// history snapshot.
pub fn perform_local_analysis(focused: &Threat, history: &[Threat]) -> String {
    let correlation_count = same_authority_count(focused, history);
    let region_affinity = same_region_count(focused, history);

    let mut report = format!(">>> NEURAL_FORENSICS_REPORT [ID: {}]\n", focused.id);
    report.push_str(&format!(">>> SUBJECT_IP: {}\n", focused.src_ip));
    report.push_str(&format!(
        ">>> AUTHORITY: {} ({})\n\n",
        focused.asn_owner, focused.asn
    ));

    report.push_str("[CO-ORDINATION ANALYSIS]\n");
    if correlation_count > 0 {
        report.push_str(&format!(
            "WARNING: Detected {} sibling nodes from the same infrastructure provider active in this window. High probability of coordinated botnet movement.\n",
            correlation_count
        ));
    } else {
        report.push_str(
            "STATUS: No active sibling nodes detected within the local buffer. Isolated probe profile.\n",
        );
    }

    if region_affinity > 3 {
        report.push_str(&format!(
            "GEO_ALERT: Significant traffic volume from {} ({} nodes). Regional threat cluster observed.\n",
            focused.country_name, region_affinity
        ));
    }

    report.push_str("\n[TACTICAL THREAT PROFILE]\n");
    report.push_str(&format!("Source Classification: {}\n", focused.source));
    report.push_str(&format!("Ingress Vector: {}\n", focused.threat_vector));
    report.push_str(&format!("Attack Class: {}\n", focused.attack_type));
    report.push_str(&format!("Confidence Level: {}%\n", focused.risk_score));

    report.push_str("\n[FORENSIC MARKERS]\n");
    report.push_str("- Pattern suggests automated scanning / C2 beaconing.\n");
    report.push_str("- Entropy anomaly detected in packet headers.\n");
    report.push_str("- Origin aligns with known high-risk hosting facilities.");

    report.push_str("\n\n[REMEDIATION STRATEGY]\n");
    report.push_str(&format!(
        "1. Immediate ACL block for host {}/32.\n",
        focused.src_ip
    ));
    report.push_str(&format!(
        "2. Monitor ASN {} for additional ingress spikes.\n",
        focused.asn
    ));
    report.push_str(&format!(
        "3. Scrub active session state for vector: {}.",
        focused.threat_vector
    ));

    report
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::threat::{normalize, FeedKind, PartialThreat};

    fn threat(id: &str, asn: &str, country: &str) -> Threat {
        normalize(
            PartialThreat {
                id: Some(id.to_string()),
                asn: Some(asn.to_string()),
                country_code: Some(country.to_string()),
                ..Default::default()
            },
            FeedKind::ThreatFox,
        )
    }

    #[test]
    fn test_coordination_scenario() {
        let history = vec![
            threat("a", "AS1", "DE"),
            threat("b", "AS1", "FR"),
            threat("c", "AS2", "DE"),
        ];
        let focused = &history[0];

        assert_eq!(same_authority_count(focused, &history), 1);
        assert_eq!(same_region_count(focused, &history), 1);

        let report = perform_local_analysis(focused, &history);
        assert!(report.contains("WARNING: Detected 1 sibling nodes"));
        assert!(!report.contains("GEO_ALERT"));
    }

    #[test]
    fn test_isolated_profile() {
        let history = vec![threat("a", "AS1", "DE"), threat("b", "AS2", "FR")];
        let report = perform_local_analysis(&history[0], &history);

        assert!(report.contains("Isolated probe profile"));
        assert!(!report.contains("WARNING"));
    }

    #[test]
    fn test_regional_cluster_gate() {
        // four siblings in the same region trip the gate, three do not
        let mut history = vec![threat("f", "AS9", "RU")];
        for i in 0..4 {
            history.push(threat(&format!("r{}", i), &format!("AS{}", i), "RU"));
        }

        let report = perform_local_analysis(&history[0], &history);
        assert!(report.contains("GEO_ALERT"));
        assert!(report.contains("Russia (4 nodes)"));

        let report = perform_local_analysis(&history[0], &history[..4]);
        assert!(!report.contains("GEO_ALERT"));
    }

    #[test]
    fn test_report_is_deterministic() {
        let history = vec![
            threat("a", "AS1", "DE"),
            threat("b", "AS1", "DE"),
            threat("c", "AS3", "JP"),
        ];

        let first = perform_local_analysis(&history[0], &history);
        let second = perform_local_analysis(&history[0], &history);
        assert_eq!(first, second);
    }

    #[test]
    fn test_report_sections_in_order() {
        let history = vec![threat("a", "AS1", "DE")];
        let report = perform_local_analysis(&history[0], &history);

        let header = report.find("NEURAL_FORENSICS_REPORT").unwrap();
        let coord = report.find("[CO-ORDINATION ANALYSIS]").unwrap();
        let profile = report.find("[TACTICAL THREAT PROFILE]").unwrap();
        let markers = report.find("[FORENSIC MARKERS]").unwrap();
        let remediation = report.find("[REMEDIATION STRATEGY]").unwrap();

        assert!(header < coord && coord < profile && profile < markers && markers < remediation);
        assert!(report.contains("1. Immediate ACL block for host"));
    }

    #[test]
    fn test_related_nodes_cap_and_exclusion() {
        let focused = threat("f", "AS1", "DE");
        let mut history = vec![focused.clone()];
        for i in 0..10 {
            history.push(threat(&format!("s{}", i), "AS1", "FR"));
        }
        history.push(threat("region", "AS99", "DE"));
        history.push(threat("stranger", "AS99", "JP"));

        let related = related_nodes(&focused, &history);
        assert_eq!(related.len(), 6);
        assert!(related.iter().all(|t| t.id != "f"));
        assert!(related.iter().all(|t| t.id != "stranger"));
    }
}
