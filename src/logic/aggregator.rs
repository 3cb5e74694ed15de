//! Intelligence Aggregator
//!
//! Fallback chain over the feed sources: ThreatFox first, URLhaus second,
//! heuristics last. `fetch_one` never fails and never returns a partial
//! entity; a dark feed just moves the chain along.

use rand::seq::SliceRandom;

use super::feeds::{heuristics, ThreatFoxClient, UrlHausClient};
use super::threat::{normalize, FeedKind, Threat};

pub struct IntelligenceAggregator {
    threatfox: ThreatFoxClient,
    urlhaus: UrlHausClient,
}

impl IntelligenceAggregator {
    pub fn new() -> Self {
        Self {
            threatfox: ThreatFoxClient::new(),
            urlhaus: UrlHausClient::new(),
        }
    }

    pub fn with_clients(threatfox: ThreatFoxClient, urlhaus: UrlHausClient) -> Self {
        Self { threatfox, urlhaus }
    }

    /// Produce exactly one canonical entity: pick a random record out of
    /// the first live batch that comes back non-empty, otherwise fall
    /// back to the heuristics generator.
    pub async fn fetch_one(&self) -> Threat {
        let batch = self.threatfox.fetch_batch().await;
        if let Some(partial) = batch.choose(&mut rand::thread_rng()) {
            return normalize(partial.clone(), FeedKind::ThreatFox);
        }

        let batch = self.urlhaus.fetch_batch().await;
        if let Some(partial) = batch.choose(&mut rand::thread_rng()) {
            return normalize(partial.clone(), FeedKind::UrlHaus);
        }

        log::debug!("Live feeds dark, falling back to heuristics");
        normalize(heuristics::generate(), FeedKind::Heuristics)
    }
}

impl Default for IntelligenceAggregator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dark_feeds_fall_back_to_heuristics() {
        // Nothing listens on the discard port; both adapters fail fast
        // and the chain must bottom out in the generator.
        let aggregator = IntelligenceAggregator::with_clients(
            ThreatFoxClient::with_endpoint("http://127.0.0.1:9/".to_string()),
            UrlHausClient::with_endpoint("http://127.0.0.1:9/".to_string()),
        );

        let threat = aggregator.fetch_one().await;
        assert_eq!(threat.source, "VAYU_HEURISTICS");
        assert!(!threat.id.is_empty());
        assert!(!threat.country_name.is_empty());
    }
}
