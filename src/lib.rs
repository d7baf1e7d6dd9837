//! Swipedeck - a swipeable card deck engine
//!
//! Core modules:
//! - `deck`: Gesture state machine, stack layout, circular index bookkeeping
//! - `config`: Geometry and animation tunables
//! - `host`: Interfaces the embedding host implements (data source, card host, observer)
//! - `persist`: Save/restore of the logical deck position

pub mod config;
pub mod deck;
pub mod host;
pub mod persist;

pub use config::{DeckConfig, DirectionPolicy};
pub use deck::Deck;
pub use host::{
    AnimationRequest, CardHost, CardId, CardTransform, DataSource, Easing, StackObserver,
    SwipeDirection, SwipeToken,
};
pub use persist::SavedState;

/// Engine defaults
pub mod consts {
    /// Settle / swipe-out animation duration (milliseconds)
    pub const DEFAULT_ANIMATION_DURATION_MS: u32 = 300;
    /// Number of cards kept materialized at once
    pub const DEFAULT_STACK_SIZE: usize = 3;
    /// Per-card random rotation range in whole degrees (0 disables)
    pub const DEFAULT_STACK_ROTATION: u32 = 0;
    /// Maximum rotation while dragging (degrees)
    pub const DEFAULT_SWIPE_ROTATION: f32 = 30.0;
    /// Opacity at full swipe progress (1.0 disables the drag fade)
    pub const DEFAULT_SWIPE_OPACITY: f32 = 1.0;
    /// Per-layer uniform scale factor
    pub const DEFAULT_SCALE_FACTOR: f32 = 1.0;
    /// Drag distance below which a gesture counts as a tap (pixels)
    pub const DEFAULT_CLICK_THRESHOLD: f32 = 0.4;
    /// Vertical spacing between stacked cards (pixels)
    pub const DEFAULT_STACK_SPACING: f32 = 12.0;

    /// Resting opacity of cards beneath the top one
    pub const STACKED_CARD_OPACITY: f32 = 0.7;
    /// Tension of the overshoot ease used when a rejected card snaps back
    pub const SETTLE_OVERSHOOT_TENSION: f32 = 1.4;
}

/// Clamp a signed horizontal swipe progress to [-1, 1]
#[inline]
pub fn clamp_progress(progress: f32) -> f32 {
    progress.clamp(-1.0, 1.0)
}
