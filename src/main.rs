//! Vayu IDS - Intelligence Core Entry Point
//!
//! Runs the aggregation session headless: live feed polling, the local
//! history buffer and the broadcast stream, with a log ticker standing in
//! for the terminal frontend.

use vayu_core::constants;
use vayu_core::logic::session::SessionContext;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} v{} (Live Intelligence Terminal)...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let session = SessionContext::new();

    // Subscribe before starting so the ticker sees the startup burst.
    let mut stream = session.subscribe();
    session.start();

    let ticker = tokio::spawn(async move {
        while let Ok(threat) = stream.recv().await {
            log::info!(
                "[{}] {} {} {} ({})",
                threat.source,
                threat.severity,
                threat.src_ip,
                threat.attack_type,
                threat.country_name
            );
        }
    });

    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }

    log::info!("Shutdown signal received, tearing down session...");
    session.stop();
    ticker.abort();

    let stats = session.stats();
    log::info!(
        "Session closed: {} threats ingested, {} high-confidence feed hits, uptime {}s",
        stats.threat_count,
        stats.abuse_count,
        stats.uptime
    );
}
