//! Save/restore of the logical deck position
//!
//! The position is stored in raw fetch-counter units rather than wrapped to
//! the source count, so a restore lands on the exact same window even after
//! the deck has cycled through the source several times.

use serde::{Deserialize, Serialize};

/// Serializable deck position for a host-driven save/restore cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SavedState {
    /// Raw position of the topmost card, in fetch-counter units
    pub position: u64,
}

impl SavedState {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(state) => Some(state),
            Err(err) => {
                log::warn!("discarding unreadable saved state: {err}");
                None
            }
        }
    }
}
