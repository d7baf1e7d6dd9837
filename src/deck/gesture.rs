//! Gesture state machine for the top card
//!
//! Turns raw pointer events into a live drag, a tap-or-commit decision on
//! release, and the settle / swipe-out animation requests the host runs.
//! Pointer coordinates are card-local; the move delta is applied additively
//! to the card's current position, so the math stays correct while the card
//! moves under the pointer.

use glam::Vec2;

use crate::clamp_progress;
use crate::config::DeckConfig;
use crate::consts::SETTLE_OVERSHOOT_TENSION;
use crate::deck::state::{Card, GesturePhase};
use crate::host::{AnimationRequest, CardId, CardTransform, Easing, SwipeDirection, SwipeToken};

/// Feedback from a pointer move that changed the drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFeedback {
    /// Signed horizontal progress in [-1, 1], relative to the rest position
    pub progress: f32,
    /// Both axes moved past the click threshold this event; progress should
    /// be reported to the observer
    pub report: bool,
}

/// What a completed release resolved to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseDecision {
    /// The gesture never left the tap threshold; the card counts as clicked
    pub tap: bool,
    pub outcome: ReleaseOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// Snap back to rest; `notify` is false when the deck was disabled
    /// mid-gesture and the swipe-end callback is suppressed
    Settle { notify: bool },
    Commit(SwipeDirection),
}

/// Single-pointer drag tracker for the topmost card
///
/// Exactly one of {settle, swipe-left, swipe-right} is started per completed
/// gesture. While a swipe-out is in flight ([`GesturePhase::Settling`]) new
/// drags and swipe requests are ignored until the completion token comes
/// back through the deck.
#[derive(Debug, Clone)]
pub struct GestureController {
    phase: GesturePhase,
    /// Card currently registered for gestures (the top of the stack)
    observed: Option<CardId>,
    pointer_id: u32,
    /// Pointer-down location, card-local
    down: Vec2,
    /// Rest position the card settles back to
    initial: Vec2,
    /// Largest absolute per-event delta seen this gesture
    max_abs: Vec2,
    moved: bool,
}

impl GestureController {
    pub fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
            observed: None,
            pointer_id: 0,
            down: Vec2::ZERO,
            initial: Vec2::ZERO,
            max_abs: Vec2::ZERO,
            moved: false,
        }
    }

    #[inline]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    #[inline]
    pub fn observed(&self) -> Option<CardId> {
        self.observed
    }

    /// Rest position of the observed card
    #[inline]
    pub fn initial(&self) -> Vec2 {
        self.initial
    }

    /// Register the current top card and its rest position.
    ///
    /// A relayout during an active drag on the same card only refreshes the
    /// rest position; anything else restarts the tracker.
    pub fn observe(&mut self, card: CardId, initial: Vec2) {
        if self.phase == GesturePhase::Dragging && self.observed == Some(card) {
            self.initial = initial;
            return;
        }
        self.observed = Some(card);
        self.initial = initial;
        self.phase = GesturePhase::Idle;
    }

    /// Drop the observed card (stack emptied or deck torn down)
    pub fn release(&mut self) {
        self.observed = None;
        self.phase = GesturePhase::Idle;
    }

    /// Begin tracking a drag. Returns true when a gesture actually started.
    pub fn pointer_down(&mut self, pos: Vec2, pointer_id: u32, enabled: bool) -> bool {
        if !enabled || self.observed.is_none() || self.phase != GesturePhase::Idle {
            return false;
        }
        self.moved = false;
        self.max_abs = Vec2::ZERO;
        self.pointer_id = pointer_id;
        self.down = pos;
        self.phase = GesturePhase::Dragging;
        true
    }

    /// Advance the drag, moving `card` with the pointer.
    ///
    /// Returns None when the event does not belong to the tracked gesture or
    /// the deck is disabled; the card is untouched in that case.
    pub fn pointer_move(
        &mut self,
        config: &DeckConfig,
        card: &mut Card,
        container_w: f32,
        pos: Vec2,
        pointer_id: u32,
        enabled: bool,
    ) -> Option<DragFeedback> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        self.moved = true;
        if !enabled || pointer_id != self.pointer_id {
            return None;
        }

        let delta = pos - self.down;
        card.pos += delta;

        let progress = clamp_progress((card.pos.x - self.initial.x) / container_w);
        self.max_abs = self.max_abs.max(delta.abs());
        let report =
            delta.x.abs() > config.click_threshold && delta.y.abs() > config.click_threshold;

        if config.drag_rotation_enabled() {
            card.rotation = config.swipe_rotation * progress;
        }
        if config.drag_fade_enabled() {
            card.opacity = 1.0 - (progress * 2.0).abs().min(1.0);
        }

        Some(DragFeedback { progress, report })
    }

    /// End the drag with a tap check and a commit decision.
    ///
    /// The decision uses the card's horizontal center against the container
    /// thirds: left third commits left, right third commits right (each
    /// subject to the direction policy), anything else settles. A disabled
    /// deck always settles. A commit leaves the tracker in
    /// [`GesturePhase::Settling`] via [`Self::begin_swipe_out`]; the caller
    /// issues the animation.
    pub fn pointer_up(
        &mut self,
        config: &DeckConfig,
        card: &Card,
        container_w: f32,
        pointer_id: u32,
        enabled: bool,
    ) -> Option<ReleaseDecision> {
        if self.phase != GesturePhase::Dragging || pointer_id != self.pointer_id {
            return None;
        }
        self.phase = GesturePhase::Idle;

        let tap = !self.moved
            || (self.max_abs.x < config.click_threshold && self.max_abs.y < config.click_threshold);

        let outcome = if !enabled {
            ReleaseOutcome::Settle { notify: false }
        } else {
            let center = card.pos.x + card.size.x / 2.0;
            let first_third = container_w / 3.0;
            let last_third = first_third * 2.0;
            if center < first_third && config.allowed_directions.allows_left() {
                ReleaseOutcome::Commit(SwipeDirection::Left)
            } else if center > last_third && config.allowed_directions.allows_right() {
                ReleaseOutcome::Commit(SwipeDirection::Right)
            } else {
                ReleaseOutcome::Settle { notify: true }
            }
        };

        Some(ReleaseDecision { tap, outcome })
    }

    /// Arm a swipe-out for the observed card.
    ///
    /// No-op while one is already in flight; the returned token must come
    /// back through the deck's completion entry point exactly once.
    pub fn begin_swipe_out(&mut self, direction: SwipeDirection) -> Option<SwipeToken> {
        if self.phase == GesturePhase::Settling {
            return None;
        }
        let card = self.observed?;
        self.phase = GesturePhase::Settling;
        Some(SwipeToken { card, direction })
    }

    /// Overshoot ease back to the rest position, full opacity, no rotation
    pub fn settle_request(&self, config: &DeckConfig, card: &Card) -> AnimationRequest {
        AnimationRequest {
            card: card.id,
            target: CardTransform {
                pos: self.initial,
                rotation: 0.0,
                opacity: 1.0,
                ..card.transform()
            },
            duration_ms: config.animation_duration_ms,
            easing: Easing::Overshoot {
                tension: SETTLE_OVERSHOOT_TENSION,
            },
            completion: None,
        }
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

/// Off-screen exit one container width away, fading out while rotating into
/// the swipe direction
pub fn swipe_out_request(
    config: &DeckConfig,
    card: &Card,
    container_w: f32,
    token: SwipeToken,
    duration_ms: u32,
) -> AnimationRequest {
    let (dx, rotation) = match token.direction {
        SwipeDirection::Left => (-container_w, -config.swipe_rotation),
        SwipeDirection::Right => (container_w, config.swipe_rotation),
    };
    AnimationRequest {
        card: card.id,
        target: CardTransform {
            pos: Vec2::new(card.pos.x + dx, card.pos.y),
            rotation,
            opacity: 0.0,
            ..card.transform()
        },
        duration_ms,
        easing: Easing::Standard,
        completion: Some(token),
    }
}
