//! ThreatFox Adapter
//!
//! One POST query for recent indicators over the last day, mapped to
//! partial threat records. Severity is derived from the reported
//! confidence level with two thresholds.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use super::{field_string, FeedError};
use crate::constants;
use crate::logic::threat::{FeedKind, PartialThreat, Severity};

// ============================================================================
// API RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct ThreatFoxResponse {
    #[serde(default)]
    query_status: String,
    #[serde(default)]
    data: Vec<ThreatFoxIoc>,
}

#[derive(Debug, Deserialize)]
struct ThreatFoxIoc {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    ioc: String,
    threat_type: Option<String>,
    threat_type_desc: Option<String>,
    confidence_level: Option<u8>,
    #[serde(default)]
    asn: Value,
    as_name: Option<String>,
    country: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

pub struct ThreatFoxClient {
    endpoint: String,
    http: reqwest::Client,
}

impl ThreatFoxClient {
    pub fn new() -> Self {
        Self::with_endpoint(constants::get_threatfox_endpoint())
    }

    pub fn with_endpoint(endpoint: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(constants::FEED_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { endpoint, http }
    }

    /// Fetch one batch of recent IOCs. Best-effort: network errors,
    /// non-success statuses and malformed payloads all collapse to an
    /// empty batch.
    pub async fn fetch_batch(&self) -> Vec<PartialThreat> {
        match self.query().await {
            Ok(batch) => batch,
            Err(e) => {
                log::warn!("ThreatFox fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn query(&self) -> Result<Vec<PartialThreat>, FeedError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": "get_iocs", "days": 1 }))
            .send()
            .await
            .map_err(|e| FeedError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::ServerError(response.status().as_u16()));
        }

        let body: ThreatFoxResponse = response
            .json()
            .await
            .map_err(|e| FeedError::ParseError(e.to_string()))?;

        Ok(map_response(body))
    }
}

impl Default for ThreatFoxClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MAPPING
// ============================================================================

/// Map a feed response to partial records, capped at the batch limit.
fn map_response(body: ThreatFoxResponse) -> Vec<PartialThreat> {
    if body.query_status != "ok" {
        return Vec::new();
    }

    body.data
        .into_iter()
        .take(constants::FEED_BATCH_CAP)
        .map(map_ioc)
        .collect()
}

fn map_ioc(ioc: ThreatFoxIoc) -> PartialThreat {
    // A missing confidence level behaves as zero: lowest severity band,
    // stand-in risk score.
    let confidence = ioc.confidence_level.unwrap_or(0);
    let severity = if confidence > 85 {
        Severity::Critical
    } else if confidence > 60 {
        Severity::High
    } else {
        Severity::Medium
    };

    let vector = ioc
        .threat_type
        .clone()
        .unwrap_or_else(|| "Network IOC".to_string());

    PartialThreat {
        id: field_string(&ioc.id),
        // IOC values look like "203.0.113.9:4444"; keep the host part.
        src_ip: ioc
            .ioc
            .split(':')
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        attack_type: ioc.threat_type_desc.or(ioc.threat_type),
        severity: Some(severity),
        source: Some(FeedKind::ThreatFox.tag().to_string()),
        neural_score: None,
        risk_score: Some(if confidence > 0 { confidence } else { 50 }),
        asn: Some(field_string(&ioc.asn).unwrap_or_else(|| "N/A".to_string())),
        asn_owner: Some(ioc.as_name.unwrap_or_else(|| "Unknown Authority".to_string())),
        country_code: ioc.country,
        threat_vector: Some(vector),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<PartialThreat> {
        map_response(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_confidence_maps_to_severity() {
        let batch = parse(
            r#"{
                "query_status": "ok",
                "data": [
                    {"id": "1", "ioc": "1.2.3.4:443", "confidence_level": 90},
                    {"id": "2", "ioc": "5.6.7.8:80", "confidence_level": 75},
                    {"id": "3", "ioc": "9.9.9.9", "confidence_level": 40}
                ]
            }"#,
        );

        assert_eq!(batch[0].severity, Some(Severity::Critical));
        assert_eq!(batch[1].severity, Some(Severity::High));
        assert_eq!(batch[2].severity, Some(Severity::Medium));
        assert_eq!(batch[0].risk_score, Some(90));
    }

    #[test]
    fn test_missing_confidence_defaults() {
        let batch = parse(
            r#"{"query_status": "ok", "data": [{"id": 42, "ioc": "10.0.0.1:22"}]}"#,
        );

        assert_eq!(batch[0].severity, Some(Severity::Medium));
        assert_eq!(batch[0].risk_score, Some(50));
        // numeric ids are accepted as-is
        assert_eq!(batch[0].id, Some("42".to_string()));
    }

    #[test]
    fn test_ioc_host_extraction() {
        let batch = parse(
            r#"{"query_status": "ok", "data": [
                {"id": "1", "ioc": "198.51.100.7:8080", "confidence_level": 50},
                {"id": "2", "ioc": "", "confidence_level": 50}
            ]}"#,
        );

        assert_eq!(batch[0].src_ip, Some("198.51.100.7".to_string()));
        assert_eq!(batch[1].src_ip, None);
    }

    #[test]
    fn test_authority_defaults() {
        let batch = parse(
            r#"{"query_status": "ok", "data": [
                {"id": "1", "ioc": "1.1.1.1", "asn": 4134, "as_name": "CHINANET"},
                {"id": "2", "ioc": "2.2.2.2"}
            ]}"#,
        );

        assert_eq!(batch[0].asn, Some("4134".to_string()));
        assert_eq!(batch[0].asn_owner, Some("CHINANET".to_string()));
        assert_eq!(batch[1].asn, Some("N/A".to_string()));
        assert_eq!(batch[1].asn_owner, Some("Unknown Authority".to_string()));
    }

    #[test]
    fn test_vector_and_type_fallbacks() {
        let batch = parse(
            r#"{"query_status": "ok", "data": [
                {"id": "1", "ioc": "1.1.1.1", "threat_type": "botnet_cc", "threat_type_desc": "Botnet C2"},
                {"id": "2", "ioc": "2.2.2.2", "threat_type": "payload_delivery"},
                {"id": "3", "ioc": "3.3.3.3"}
            ]}"#,
        );

        assert_eq!(batch[0].attack_type, Some("Botnet C2".to_string()));
        assert_eq!(batch[0].threat_vector, Some("botnet_cc".to_string()));
        assert_eq!(batch[1].attack_type, Some("payload_delivery".to_string()));
        assert_eq!(batch[2].attack_type, None);
        assert_eq!(batch[2].threat_vector, Some("Network IOC".to_string()));
    }

    #[test]
    fn test_batch_is_capped() {
        let items: Vec<String> = (0..40)
            .map(|i| format!(r#"{{"id": "{}", "ioc": "10.0.0.{}:80"}}"#, i, i))
            .collect();
        let json = format!(r#"{{"query_status": "ok", "data": [{}]}}"#, items.join(","));

        assert_eq!(parse(&json).len(), constants::FEED_BATCH_CAP);
    }

    #[test]
    fn test_bad_status_yields_empty_batch() {
        assert!(parse(r#"{"query_status": "no_result", "data": [{"id": "1", "ioc": "x"}]}"#).is_empty());
        assert!(parse(r#"{"query_status": "ok"}"#).is_empty());
    }
}
