//! Host abstraction layer
//!
//! The engine never owns views, animation interpolation, or touch delivery.
//! It reads a [`DataSource`], issues transform and animation commands to a
//! [`CardHost`], and reports lifecycle events to a [`StackObserver`].
//!
//! Pointer coordinates arriving at the deck are in the tracked card's local
//! space (the host hit-tests and forwards events for the top card); drag
//! deltas are applied additively so the math stays correct as the card moves
//! under the pointer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a host-rendered card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u64);

/// Direction a committed swipe leaves the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Full visual transform of a card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Top-left position in container space
    pub pos: Vec2,
    /// Width weight the host should measure the card at (1.0 = full width)
    pub width_weight: f32,
    /// Uniform scale
    pub scale: f32,
    /// Rotation in degrees
    pub rotation: f32,
    /// Opacity in [0, 1]
    pub opacity: f32,
    /// Stacking order, higher is nearer the user
    pub z: i32,
}

/// Easing curves the engine may request
///
/// Interpolation itself is the host's job; the engine only names the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// The host's default curve
    Standard,
    /// Overshoot ease used when a rejected card snaps back to rest
    Overshoot { tension: f32 },
}

/// One-shot completion token carried by a swipe-out animation
///
/// The host must hand the token back through [`crate::Deck::swipe_finished`]
/// exactly once, when the animation ends. Stale tokens are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeToken {
    pub(crate) card: CardId,
    pub(crate) direction: SwipeDirection,
}

impl SwipeToken {
    /// Card being swiped out
    pub fn card(&self) -> CardId {
        self.card
    }

    /// Direction the card is leaving in
    pub fn direction(&self) -> SwipeDirection {
        self.direction
    }
}

/// An animation command issued to the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub card: CardId,
    /// Target values to interpolate toward
    pub target: CardTransform,
    pub duration_ms: u32,
    pub easing: Easing,
    /// Present only on swipe-out animations
    pub completion: Option<SwipeToken>,
}

/// Backing data the deck pages through
///
/// Owned externally; the engine only reads it. `card_at` materializes the
/// item at a logical index and returns the host's handle for it.
pub trait DataSource {
    fn count(&self) -> usize;
    fn card_at(&mut self, index: usize) -> CardId;
}

/// Presentation-side collaborator the engine drives
pub trait CardHost {
    /// Measure `card` at the given width weight, returning its bounding box
    fn measure(&mut self, card: CardId, width_weight: f32) -> Vec2;

    /// Apply a transform instantly (live drag updates, first layout)
    fn apply(&mut self, card: CardId, transform: &CardTransform);

    /// Start an animation toward the request's target values
    fn animate(&mut self, request: AnimationRequest);

    /// Treat a card as clicked (a gesture that never left the tap threshold)
    fn activate(&mut self, card: CardId);

    /// Claim or release the pointer stream for the duration of a drag
    /// (the host's disallow-intercept equivalent)
    fn set_drag_capture(&mut self, captured: bool);

    /// Drop a card evicted from the stack
    fn remove(&mut self, card: CardId);

    /// Drop every materialized card (reset, source replaced)
    fn remove_all(&mut self);
}

/// Lifecycle callbacks; every method defaults to a no-op
///
/// Positions are logical data-source indices, normalized to `[0, count)`.
pub trait StackObserver {
    /// A pointer went down on the top card
    fn on_swipe_start(&mut self, _position: usize) {}
    /// The drag moved past the click threshold; progress is signed, in [-1, 1]
    fn on_swipe_progress(&mut self, _position: usize, _progress: f32) {}
    /// The drag released without committing
    fn on_swipe_end(&mut self, _position: usize) {}
    /// The top card was dismissed to the left
    fn on_swiped_left(&mut self, _position: usize) {}
    /// The top card was dismissed to the right
    fn on_swiped_right(&mut self, _position: usize) {}
    /// The last card was dismissed
    fn on_stack_empty(&mut self) {}
    /// The logical position advanced
    fn on_index_changed(&mut self, _position: usize) {}
}
