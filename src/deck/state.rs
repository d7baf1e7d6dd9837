//! Deck state and core types
//!
//! Everything that must survive across pointer events and animation
//! completion callbacks lives here as explicit fields. The engine mirrors
//! the presentation values it last commanded for each card; positions are
//! always driven to a defined end state, never left mid-flight.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::host::{CardId, CardTransform};

/// Phase of the tracked gesture on the top card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No pointer down; the top card is waiting for input
    Idle,
    /// A pointer is down on the top card
    Dragging,
    /// A swipe-out animation is in flight; further swipe requests are no-ops
    /// until the completion token comes back
    Settling,
}

/// A materialized card and the engine-side mirror of its presentation state
#[derive(Debug, Clone)]
pub struct Card {
    pub id: CardId,
    /// Last commanded top-left position, container space
    pub pos: Vec2,
    /// Bounding box from the host's most recent measure pass
    pub size: Vec2,
    /// Last commanded rotation (degrees)
    pub rotation: f32,
    /// Last commanded opacity
    pub opacity: f32,
    /// Last commanded uniform scale
    pub scale: f32,
    /// Width weight of the host's most recent measure pass
    pub width_weight: f32,
    /// Last commanded stacking order
    pub z: i32,
    /// One-time random rotation assigned at materialization
    pub jitter: f32,
    /// Set until the card has been laid out once; drives the fade-in
    pub fresh: bool,
}

impl Card {
    pub fn new(id: CardId, jitter: f32) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            size: Vec2::ZERO,
            rotation: jitter,
            opacity: 0.0,
            scale: 1.0,
            width_weight: 1.0,
            z: 0,
            jitter,
            fresh: true,
        }
    }

    /// Snapshot of the last commanded presentation values
    pub fn transform(&self) -> CardTransform {
        CardTransform {
            pos: self.pos,
            width_weight: self.width_weight,
            scale: self.scale,
            rotation: self.rotation,
            opacity: self.opacity,
            z: self.z,
        }
    }

    /// Record `transform` as the card's commanded end state
    pub fn set_transform(&mut self, transform: &CardTransform) {
        self.pos = transform.pos;
        self.width_weight = transform.width_weight;
        self.scale = transform.scale;
        self.rotation = transform.rotation;
        self.opacity = transform.opacity;
        self.z = transform.z;
    }
}

/// Window of materialized cards plus the circular fetch counter
#[derive(Debug, Clone, Default)]
pub struct StackState {
    /// Strictly-increasing fetch counter, never wrapped. The modulo is
    /// applied at fetch time and whenever a logical position is exposed.
    pub current_index: u64,
    /// Visible cards, index 0 = top (next to swipe), back = bottom
    pub visible: Vec<Card>,
    /// Effective window size: min(configured stack size, source count)
    pub stack_size: usize,
    /// Source count cached at attach / data change
    pub count: usize,
    /// Guards the one-time position-0 notification
    pub zero_notified: bool,
}

impl StackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> Option<&Card> {
        self.visible.first()
    }

    pub fn top_mut(&mut self) -> Option<&mut Card> {
        self.visible.first_mut()
    }

    /// Logical position of the (soon-to-be) topmost card, in [0, count)
    pub fn position(&self) -> usize {
        if self.count == 0 {
            return 0;
        }
        let raw = self.current_index as i64 - self.visible.len() as i64;
        raw.rem_euclid(self.count as i64) as usize
    }

    /// Raw (unwrapped) position of the topmost card, in fetch-counter units
    pub fn raw_position(&self) -> u64 {
        self.current_index.saturating_sub(self.visible.len() as u64)
    }
}

/// Seedable generator for per-card rotation jitter
///
/// Injected rather than ambient so layouts are reproducible in tests.
#[derive(Debug, Clone)]
pub struct JitterRng {
    rng: Pcg32,
}

impl JitterRng {
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Whole-degree rotation in [-range/2, +range/2); 0 when the range is 0
    pub fn rotation(&mut self, range: u32) -> f32 {
        if range == 0 {
            return 0.0;
        }
        (self.rng.random_range(0..range) as i64 - (range / 2) as i64) as f32
    }
}

impl Default for JitterRng {
    fn default() -> Self {
        Self::new()
    }
}
