//! URLhaus Adapter
//!
//! One GET for recently-flagged malicious URLs. URLhaus publishes no
//! per-entry confidence, so every record is treated as severity HIGH
//! with a fixed risk score; the subject host is extracted from the URL.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use super::{extract_host, field_string, FeedError};
use crate::constants;
use crate::logic::threat::{FeedKind, PartialThreat, Severity};

/// Fixed risk score for URLhaus records
const URLHAUS_RISK_SCORE: u8 = 92;

// ============================================================================
// API RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct UrlHausResponse {
    #[serde(default)]
    query_status: String,
    #[serde(default)]
    urls: Vec<UrlHausEntry>,
}

#[derive(Debug, Deserialize)]
struct UrlHausEntry {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    url: String,
    threat: Option<String>,
    #[serde(default)]
    asn: Value,
    as_name: Option<String>,
    countrycode: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

pub struct UrlHausClient {
    endpoint: String,
    http: reqwest::Client,
}

impl UrlHausClient {
    pub fn new() -> Self {
        Self::with_endpoint(constants::get_urlhaus_endpoint())
    }

    pub fn with_endpoint(endpoint: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(constants::FEED_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { endpoint, http }
    }

    /// Fetch one batch of recent malicious URLs. Same failure policy as
    /// the ThreatFox adapter: everything collapses to an empty batch.
    pub async fn fetch_batch(&self) -> Vec<PartialThreat> {
        match self.query().await {
            Ok(batch) => batch,
            Err(e) => {
                log::warn!("URLhaus fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn query(&self) -> Result<Vec<PartialThreat>, FeedError> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FeedError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::ServerError(response.status().as_u16()));
        }

        let body: UrlHausResponse = response
            .json()
            .await
            .map_err(|e| FeedError::ParseError(e.to_string()))?;

        Ok(map_response(body))
    }
}

impl Default for UrlHausClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MAPPING
// ============================================================================

fn map_response(body: UrlHausResponse) -> Vec<PartialThreat> {
    if body.query_status != "ok" {
        return Vec::new();
    }

    body.urls
        .into_iter()
        .take(constants::FEED_BATCH_CAP)
        .map(map_entry)
        .collect()
}

fn map_entry(entry: UrlHausEntry) -> PartialThreat {
    PartialThreat {
        id: field_string(&entry.id),
        src_ip: extract_host(&entry.url),
        attack_type: Some(format!(
            "Malware: {}",
            entry.threat.as_deref().unwrap_or("Payload")
        )),
        severity: Some(Severity::High),
        source: Some(FeedKind::UrlHaus.tag().to_string()),
        neural_score: None,
        risk_score: Some(URLHAUS_RISK_SCORE),
        asn: Some(field_string(&entry.asn).unwrap_or_else(|| "N/A".to_string())),
        asn_owner: Some(entry.as_name.unwrap_or_else(|| "Unknown Authority".to_string())),
        country_code: entry.countrycode,
        threat_vector: Some("HTTP_PAYLOAD".to_string()),
    }
}

// ============================================================================
// TESTS
// ============================================================================
