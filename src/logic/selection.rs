//! Selection Model
//!
//! Resolves the active subject from the three candidate pointers under a
//! fixed priority: explicit focus, then hover, then the buffer head. Pure
//! derivation, recomputed on every change of any input.

use super::history::ThreatHistoryBuffer;
use super::threat::Threat;

pub fn active_subject<'a>(
    focused: Option<&'a Threat>,
    hovered: Option<&'a Threat>,
    buffer: &'a ThreatHistoryBuffer,
) -> Option<&'a Threat> {
    focused.or(hovered).or_else(|| buffer.head())
}
