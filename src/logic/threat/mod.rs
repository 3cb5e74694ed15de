//! Threat Entity Layer
//!
//! Canonical entity shape shared by every feed source, plus the
//! normalization that maps heterogeneous upstream records onto it.

pub mod types;
pub mod normalize;

pub use normalize::normalize;
pub use types::{FeedKind, PartialThreat, Severity, Threat};
