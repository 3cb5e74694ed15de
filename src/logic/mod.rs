//! Logic Module - Aggregation & Selection Engines
//!
//! - `feeds/` - remote IOC adapters + heuristics generator
//! - `threat/` - canonical entity + normalization
//! - `session` - lifecycle wiring (buffer, timers, selection, alerts)

// Core modules
pub mod geo;
pub mod threat;
pub mod feeds;
pub mod aggregator;
pub mod history;
pub mod selection;
pub mod alerting;
pub mod forensics;
pub mod bus;
pub mod ai_bridge;
pub mod session;
