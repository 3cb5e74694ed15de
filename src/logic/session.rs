//! Session Context
//!
//! Owns the mutable session state (buffer, counters, pointers, alert
//! windows, timers) behind an explicit start/stop lifecycle; there are no
//! ambient singletons. All ingestion funnels through `ingest`, so no two
//! updates interleave mid-buffer even though two timers drive the
//! aggregator.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::aggregator::IntelligenceAggregator;
use super::ai_bridge;
use super::alerting::AlertCenter;
use super::bus::NeuralBus;
use super::forensics;
use super::history::{NeuralStats, ThreatHistoryBuffer};
use super::selection;
use super::threat::{Severity, Threat};
use crate::constants;

pub struct SessionContext {
    aggregator: IntelligenceAggregator,
    bus: NeuralBus,
    history: RwLock<ThreatHistoryBuffer>,
    stats: RwLock<NeuralStats>,
    alerts: AlertCenter,
    focused: RwLock<Option<Threat>>,
    hovered: RwLock<Option<Threat>>,
    report: RwLock<Option<String>>,
    processing: AtomicBool,
    report_generation: AtomicU64,
    running: AtomicBool,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    // handle to ourselves for the background tasks we spawn
    me: Weak<SessionContext>,
}

impl SessionContext {
    pub fn new() -> Arc<Self> {
        Self::with_aggregator(IntelligenceAggregator::new())
    }

    pub fn with_aggregator(aggregator: IntelligenceAggregator) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            aggregator,
            bus: NeuralBus::new(),
            history: RwLock::new(ThreatHistoryBuffer::new()),
            stats: RwLock::new(NeuralStats::default()),
            alerts: AlertCenter::new(),
            focused: RwLock::new(None),
            hovered: RwLock::new(None),
            report: RwLock::new(None),
            processing: AtomicBool::new(false),
            report_generation: AtomicU64::new(0),
            running: AtomicBool::new(false),
            tasks: Mutex::new(Vec::new()),
            me: me.clone(),
        })
    }

    fn handle(&self) -> Option<Arc<Self>> {
        self.me.upgrade()
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Start the session timers: the startup burst, the steady poll and
    /// the per-second stats tick.
    pub fn start(&self) {
        let session = match self.handle() {
            Some(session) => session,
            None => return,
        };

        if self.running.swap(true, Ordering::SeqCst) {
            log::warn!("Session already running");
            return;
        }

        log::info!(
            "Session starting: burst of {} then poll every {}s",
            constants::STARTUP_BURST,
            constants::FETCH_INTERVAL_SECS
        );

        let ctx = Arc::clone(&session);
        let burst = tokio::spawn(async move {
            for _ in 0..constants::STARTUP_BURST {
                if !ctx.is_running() {
                    return;
                }
                let threat = ctx.aggregator.fetch_one().await;
                if !ctx.is_running() {
                    return;
                }
                ctx.ingest(threat);
            }
            log::info!("Startup burst complete");
        });

        let ctx = Arc::clone(&session);
        let poll = tokio::spawn(async move {
            loop {
                sleep(Duration::from_secs(constants::FETCH_INTERVAL_SECS)).await;
                if !ctx.is_running() {
                    return;
                }
                let threat = ctx.aggregator.fetch_one().await;
                // a fetch that straddles teardown is discarded here
                if !ctx.is_running() {
                    return;
                }
                ctx.ingest(threat);
            }
        });

        let ctx = Arc::clone(&session);
        let stats_tick = tokio::spawn(async move {
            loop {
                sleep(Duration::from_secs(constants::STATS_TICK_SECS)).await;
                if !ctx.is_running() {
                    return;
                }
                ctx.stats.write().tick();
            }
        });

        let mut tasks = self.tasks.lock();
        tasks.push(burst);
        tasks.push(poll);
        tasks.push(stats_tick);
    }

    /// Tear the session down and cancel all timers. Late results from
    /// in-flight fetches never reach the buffer: the running flag is
    /// re-checked after every await point that precedes an ingest.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
        log::info!("Session stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    // ========================================================================
    // INGESTION
    // ========================================================================

    /// Single ingestion path: broadcast to subscribers, record into the
    /// buffer, update counters and evaluate alerting, all in one step.
    pub fn ingest(&self, threat: Threat) {
        self.bus.publish(threat.clone());
        self.history.write().ingest(threat.clone());
        self.stats.write().record(&threat);
        self.alerts.observe(threat.severity);
    }

    // ========================================================================
    // SELECTION & FORENSICS
    // ========================================================================

    /// Focus a threat, or release focus when it is already the focused
    /// entity (toggle). Focusing schedules the forensic report after the
    /// fixed processing delay; a selection change before the delay
    /// elapses supersedes the pending computation.
    pub fn select_threat(&self, threat: &Threat) {
        {
            let mut focused = self.focused.write();
            if focused.as_ref().map(|f| f.id == threat.id).unwrap_or(false) {
                *focused = None;
                *self.report.write() = None;
                self.processing.store(false, Ordering::SeqCst);
                // invalidate any pending report task
                self.report_generation.fetch_add(1, Ordering::SeqCst);
                return;
            }
            *focused = Some(threat.clone());
        }

        let session = match self.handle() {
            Some(session) => session,
            None => return,
        };

        self.processing.store(true, Ordering::SeqCst);
        let generation = self.report_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let subject = threat.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(constants::REPORT_DELAY_MS)).await;

            if session.report_generation.load(Ordering::SeqCst) != generation {
                // superseded by a newer selection
                return;
            }

            let history = session.history.read().snapshot();
            let text = if ai_bridge::is_engine_available() {
                ai_bridge::analyze_threat(&subject, &history).await
            } else {
                forensics::perform_local_analysis(&subject, &history)
            };

            *session.report.write() = Some(text);
            session.processing.store(false, Ordering::SeqCst);
        });
    }

    /// Transient hover pointer; pass `None` on pointer-leave.
    pub fn set_hovered(&self, threat: Option<Threat>) {
        *self.hovered.write() = threat;
    }

    /// Clear the explicit focus pointer and any pending report.
    pub fn clear_focus(&self) {
        *self.focused.write() = None;
        *self.report.write() = None;
        self.processing.store(false, Ordering::SeqCst);
        self.report_generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Active subject under the fixed priority: focused, then hovered,
    /// then the buffer head.
    pub fn active_subject(&self) -> Option<Threat> {
        let focused = self.focused.read();
        let hovered = self.hovered.read();
        let history = self.history.read();
        selection::active_subject(focused.as_ref(), hovered.as_ref(), &history).cloned()
    }

    // ========================================================================
    // OBSERVERS
    // ========================================================================

    /// Subscribe to the broadcast stream of newly-ingested entities.
    pub fn subscribe(&self) -> broadcast::Receiver<Threat> {
        self.bus.subscribe()
    }

    /// Read-only history snapshot, newest first.
    pub fn history_snapshot(&self) -> Vec<Threat> {
        self.history.read().snapshot()
    }

    pub fn stats(&self) -> NeuralStats {
        self.stats.read().clone()
    }

    pub fn focused(&self) -> Option<Threat> {
        self.focused.read().clone()
    }

    pub fn report(&self) -> Option<String> {
        self.report.read().clone()
    }

    /// True while a scheduled report has not materialized yet.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    pub fn is_tactical_alert(&self) -> bool {
        self.alerts.is_tactical_alert()
    }

    pub fn burst_trigger(&self) -> Option<Severity> {
        self.alerts.burst_trigger()
    }
}
