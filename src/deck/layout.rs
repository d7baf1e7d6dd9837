//! Stack layout math
//!
//! Deterministic mapping from a card's depth in the window to its resting
//! transform. Used both for instantaneous layout on structural changes and
//! as the target of the settle animation after a commit.

use glam::Vec2;

use crate::config::DeckConfig;
use crate::consts::STACKED_CARD_OPACITY;
use crate::host::CardTransform;

/// Resting slot values for a card at `depth` (0 = top) in a window of `n`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotTransform {
    /// Width weight the host measures the card at
    pub width_weight: f32,
    /// Vertical offset from the top of the stack
    pub offset_y: f32,
    /// Compound uniform scale
    pub scale: f32,
    /// Resting opacity
    pub opacity: f32,
    /// Stacking order, higher is nearer the user
    pub z: i32,
}

/// Compute the resting slot for `depth` in a window of `n` cards.
///
/// Width weights shrink by 0.1 per layer with no floor; keeping the stack
/// size small enough for positive weights is the caller's precondition.
pub fn slot(config: &DeckConfig, depth: usize, n: usize) -> SlotTransform {
    debug_assert!(depth < n, "slot depth {depth} out of window {n}");

    let width_weight = if depth == 0 {
        1.0
    } else {
        1.0 - 0.1 * depth as f32
    };
    let opacity = if depth == 0 { 1.0 } else { STACKED_CARD_OPACITY };

    SlotTransform {
        width_weight,
        offset_y: depth as f32 * config.spacing,
        scale: config.scale_factor.powi(depth as i32 + 1),
        opacity,
        z: (n - 1 - depth) as i32,
    }
}

/// Assemble the full resting transform once the host has measured the card.
///
/// Rotation is passed through untouched: relayout never animates rotation,
/// so a card keeps its jitter until a drag or settle overwrites it.
pub fn resting_transform(
    slot: SlotTransform,
    container: Vec2,
    measured: Vec2,
    rotation: f32,
) -> CardTransform {
    CardTransform {
        pos: Vec2::new((container.x - measured.x) / 2.0, slot.offset_y),
        width_weight: slot.width_weight,
        scale: slot.scale,
        rotation,
        opacity: slot.opacity,
        z: slot.z,
    }
}
