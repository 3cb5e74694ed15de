//! Central Configuration Constants
//!
//! Single source of truth for feed endpoints and engine cadence.
//! To point the core at a different uplink, only edit this file or set
//! the matching environment variable.

/// ThreatFox IOC query endpoint (primary live feed)
pub const DEFAULT_THREATFOX_API: &str = "https://threatfox-api.abuse.ch/api/v1/";

/// URLhaus recent-malicious-URL endpoint (secondary live feed)
pub const DEFAULT_URLHAUS_RECENT: &str = "https://urlhaus-api.abuse.ch/v1/urls/recent/";

/// Steady poll cadence for live intelligence (seconds)
pub const FETCH_INTERVAL_SECS: u64 = 5;

/// Aggregator calls fired at session start to pre-populate the buffer
pub const STARTUP_BURST: usize = 12;

/// Rolling history capacity
pub const HISTORY_CAPACITY: usize = 50;

/// Max records taken from one remote batch
pub const FEED_BATCH_CAP: usize = 15;

/// Feed request timeout (seconds)
pub const FEED_TIMEOUT_SECS: u64 = 10;

/// Simulated forensic processing delay (milliseconds)
pub const REPORT_DELAY_MS: u64 = 500;

/// Burst signal lifetime after a CRITICAL ingestion (milliseconds)
pub const BURST_CLEAR_MS: u64 = 1_000;

/// Tactical alert window after a CRITICAL ingestion (milliseconds)
pub const TACTICAL_ALERT_CLEAR_MS: u64 = 5_000;

/// Stats tick cadence (seconds)
pub const STATS_TICK_SECS: u64 = 1;

/// Name of the local broadcast channel carrying canonical threats
pub const THREAT_STREAM_CHANNEL: &str = "vayu_ids_threat_stream";

/// App name
pub const APP_NAME: &str = "Vayu IDS";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the ThreatFox endpoint from environment or use default
pub fn get_threatfox_endpoint() -> String {
    std::env::var("VAYU_THREATFOX_URL").unwrap_or_else(|_| DEFAULT_THREATFOX_API.to_string())
}

/// Get the URLhaus endpoint from environment or use default
pub fn get_urlhaus_endpoint() -> String {
    std::env::var("VAYU_URLHAUS_URL").unwrap_or_else(|_| DEFAULT_URLHAUS_RECENT.to_string())
}

/// API key placeholder for the remote analysis engine. Read but never
/// sent anywhere while the engine stays offline.
pub fn get_ai_api_key() -> Option<String> {
    std::env::var("VAYU_AI_API_KEY").ok()
}
