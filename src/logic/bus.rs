//! Neural Bus - Local Threat Broadcast
//!
//! Process-local pub/sub over the ingestion stream. Fire-and-forget,
//! at-most-once: a subscriber registered after a publish never sees it,
//! and a slow subscriber that lags past the backlog drops the oldest
//! messages rather than blocking the producer.

use tokio::sync::broadcast;

use super::threat::Threat;
use crate::constants;

/// Broadcast backlog per subscriber before lagging kicks in
const CHANNEL_CAPACITY: usize = 256;

pub struct NeuralBus {
    tx: broadcast::Sender<Threat>,
}

impl NeuralBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        log::debug!("Neural bus online: {}", constants::THREAT_STREAM_CHANNEL);
        Self { tx }
    }

    /// Publish to all current subscribers. Having no subscribers is not
    /// an error.
    pub fn publish(&self, threat: Threat) {
        let _ = self.tx.send(threat);
    }

    /// Subscribe to the stream from this point on. No replay.
    pub fn subscribe(&self) -> broadcast::Receiver<Threat> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NeuralBus {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
