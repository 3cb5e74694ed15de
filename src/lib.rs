//! # Vayu IDS - Threat Intelligence Core
//!
//! Feed aggregation and selection engine behind the Vayu live terminal.
//! Pulls open IOC feeds (ThreatFox, URLhaus), falls back to a local
//! heuristics generator when the uplinks are dark, keeps a bounded rolling
//! history of canonical threat entities, and derives the active subject
//! plus on-demand forensic reports from the buffer.
//!
//! Presentation is not this crate's job: consumers subscribe to the threat
//! stream and read snapshots out of the session context.

pub mod constants;
pub mod logic;
