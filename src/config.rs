//! Deck geometry and animation tunables
//!
//! Captured once when the deck is built; a handful of values the host may
//! flip at runtime (allowed directions, duration, drag rotation, drag
//! opacity) are re-exported as setters on the deck itself.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which commit outcomes a release may produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DirectionPolicy {
    #[default]
    Both,
    OnlyLeft,
    OnlyRight,
}

impl DirectionPolicy {
    /// Whether a release in the left third may commit
    pub fn allows_left(&self) -> bool {
        *self != Self::OnlyRight
    }

    /// Whether a release in the right third may commit
    pub fn allows_right(&self) -> bool {
        *self != Self::OnlyLeft
    }
}

/// Deck tunables
///
/// Out-of-range values (a scale factor or width-weight step that produces
/// non-positive dimensions for the configured stack size) are a caller
/// precondition; the engine does not validate them at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    // === Commit policy ===
    /// Allowed swipe directions
    pub allowed_directions: DirectionPolicy,

    // === Animation ===
    /// Settle / swipe-out duration (ms); drag-released commits run at half
    pub animation_duration_ms: u32,

    // === Stack geometry ===
    /// Cards kept materialized (effective size is min with the source count)
    pub stack_size: usize,
    /// Vertical spacing between stacked cards (pixels)
    pub spacing: f32,
    /// Random per-card rotation range in whole degrees (0 disables)
    pub stack_rotation: u32,
    /// Per-layer uniform scale factor
    pub scale_factor: f32,

    // === Drag feel ===
    /// Maximum rotation at full drag progress (degrees, 0 disables)
    pub swipe_rotation: f32,
    /// Opacity at full swipe progress; 1.0 disables the drag fade
    pub swipe_opacity: f32,
    /// Drag distance below which a gesture counts as a tap (pixels)
    pub click_threshold: f32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            allowed_directions: DirectionPolicy::Both,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            stack_size: DEFAULT_STACK_SIZE,
            spacing: DEFAULT_STACK_SPACING,
            stack_rotation: DEFAULT_STACK_ROTATION,
            scale_factor: DEFAULT_SCALE_FACTOR,
            swipe_rotation: DEFAULT_SWIPE_ROTATION,
            swipe_opacity: DEFAULT_SWIPE_OPACITY,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
        }
    }
}

impl DeckConfig {
    /// Whether dragging rotates the top card
    pub fn drag_rotation_enabled(&self) -> bool {
        self.swipe_rotation > 0.0
    }

    /// Whether dragging fades the top card
    pub fn drag_fade_enabled(&self) -> bool {
        self.swipe_opacity < 1.0
    }

    /// Duration used when a drag release commits a swipe
    pub fn commit_duration_ms(&self) -> u32 {
        self.animation_duration_ms / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_policy() {
        assert!(DirectionPolicy::Both.allows_left());
        assert!(DirectionPolicy::Both.allows_right());
        assert!(DirectionPolicy::OnlyLeft.allows_left());
        assert!(!DirectionPolicy::OnlyLeft.allows_right());
        assert!(!DirectionPolicy::OnlyRight.allows_left());
        assert!(DirectionPolicy::OnlyRight.allows_right());
    }

    #[test]
    fn test_drag_feedback_gates() {
        let mut config = DeckConfig::default();
        assert!(config.drag_rotation_enabled());
        assert!(!config.drag_fade_enabled());

        config.swipe_rotation = 0.0;
        config.swipe_opacity = 0.5;
        assert!(!config.drag_rotation_enabled());
        assert!(config.drag_fade_enabled());
    }

    #[test]
    fn test_commit_duration_is_half() {
        let config = DeckConfig::default();
        assert_eq!(config.commit_duration_ms(), config.animation_duration_ms / 2);
    }
}
