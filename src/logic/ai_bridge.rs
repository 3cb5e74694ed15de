//! AI Analysis Bridge (disabled)
//!
//! Remote forensic analysis is permanently offline to avoid upstream
//! quota exhaustion; the local engine in `forensics` is authoritative.
//! The API key placeholder is read but never sent anywhere.

use super::threat::Threat;
use crate::constants;

/// Static response for the disabled engine
pub const OFFLINE_NOTICE: &str = "ANALYSIS_ENGINE_OFFLINE: Use Local Forensic Engine.";

/// Whether the remote engine can run. Always false; a configured key
/// placeholder alone does not enable it.
pub fn is_engine_available() -> bool {
    let _api_key = constants::get_ai_api_key();
    false
}

/// Remote analysis entry point, kept for interface compatibility with the
/// local engine.
pub async fn analyze_threat(_focused: &Threat, _history: &[Threat]) -> String {
    OFFLINE_NOTICE.to_string()
}
