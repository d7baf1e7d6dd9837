//! Card deck engine
//!
//! All deck logic lives here, split the same way the work splits:
//! - `gesture`: pointer events in, commit decision and animation requests out
//! - `layout`: depth-to-transform math for the resting stack
//! - `index`: circular index bookkeeping over the data source
//! - `state`: the explicit state the engines share
//!
//! [`Deck`] wires the engines to the host collaborators. It is
//! single-threaded and event-driven: pointer events, commands, and
//! animation completions all arrive on one logical thread, so the state is
//! never mutated concurrently.

pub mod gesture;
pub mod index;
pub mod layout;
pub mod state;
#[cfg(test)]
pub(crate) mod testutil;

pub use gesture::{DragFeedback, GestureController, ReleaseDecision, ReleaseOutcome};
pub use index::CommitOutcome;
pub use layout::{SlotTransform, slot};
pub use state::{Card, GesturePhase, JitterRng, StackState};

use glam::Vec2;

use crate::config::{DeckConfig, DirectionPolicy};
use crate::consts::STACKED_CARD_OPACITY;
use crate::host::{
    AnimationRequest, CardHost, CardId, CardTransform, DataSource, Easing, StackObserver,
    SwipeDirection, SwipeToken,
};
use crate::persist::SavedState;

/// A swipeable card deck over a circular data source.
///
/// The deck owns no views and runs no animations itself; the host delivers
/// pointer events in the top card's local coordinates, runs the
/// [`AnimationRequest`]s it is handed, and reports swipe-out completions
/// back through [`Deck::swipe_finished`].
pub struct Deck {
    config: DeckConfig,
    state: StackState,
    gesture: GestureController,
    jitter: JitterRng,
    observer: Option<Box<dyn StackObserver>>,
    /// Container bounds, set by the host before attaching
    container: Vec2,
    enabled: bool,
    /// Until the first layout pass transforms are applied without animation
    first_layout: bool,
}

impl Deck {
    pub fn new(config: DeckConfig) -> Self {
        Self::with_seed(config, 0)
    }

    /// Deck with a seeded jitter generator, for reproducible stacks
    pub fn with_seed(config: DeckConfig, seed: u64) -> Self {
        Self {
            config,
            state: StackState::new(),
            gesture: GestureController::new(),
            jitter: JitterRng::with_seed(seed),
            observer: None,
            container: Vec2::ZERO,
            enabled: true,
            first_layout: true,
        }
    }

    // === Lifecycle ===

    /// Attach a data source, replacing any previous one.
    ///
    /// Resets the fetch counter, fixes the window size at
    /// `min(config.stack_size, count)`, materializes the initial window and
    /// lays it out without animation.
    pub fn attach(&mut self, source: &mut dyn DataSource, host: &mut dyn CardHost) {
        host.remove_all();
        self.gesture.release();
        index::attach(&mut self.state, self.config.stack_size, source.count());
        self.first_layout = true;
        log::info!(
            "deck attached: {} items, window of {}",
            self.state.count,
            self.state.stack_size
        );
        if self.observer.is_some() && self.state.count > 0 {
            self.state.zero_notified = true;
            self.notify(|o| o.on_index_changed(0));
        }
        index::fill(
            &mut self.state,
            source,
            &mut self.jitter,
            self.config.stack_rotation,
        );
        self.relayout(host);
    }

    /// The source's contents changed in place: refresh the cached count and
    /// top up the window. An emptied source collapses the stack.
    pub fn data_changed(&mut self, source: &mut dyn DataSource, host: &mut dyn CardHost) {
        self.state.count = source.count();
        if self.state.count == 0 {
            self.state.current_index = 0;
            self.state.visible.clear();
            host.remove_all();
            self.gesture.release();
            return;
        }
        let added = index::fill(
            &mut self.state,
            source,
            &mut self.jitter,
            self.config.stack_rotation,
        );
        if added > 0 {
            self.relayout(host);
        }
    }

    /// Rewind to position zero and rebuild the window without animation.
    pub fn reset(&mut self, source: &mut dyn DataSource, host: &mut dyn CardHost) {
        log::info!("deck reset");
        index::reset(&mut self.state);
        host.remove_all();
        self.gesture.release();
        self.state.count = source.count();
        self.first_layout = true;
        index::fill(
            &mut self.state,
            source,
            &mut self.jitter,
            self.config.stack_rotation,
        );
        self.relayout(host);
    }

    // === Pointer entry points ===

    /// Pointer went down on the top card (card-local coordinates).
    pub fn pointer_down(&mut self, host: &mut dyn CardHost, pos: Vec2, pointer_id: u32) {
        if !self.gesture.pointer_down(pos, pointer_id, self.enabled) {
            return;
        }
        host.set_drag_capture(true);
        let position = self.state.position();
        self.notify(|o| o.on_swipe_start(position));
    }

    /// Pointer moved; drags the top card and reports progress once the
    /// travel exceeds the click threshold on both axes.
    pub fn pointer_move(&mut self, host: &mut dyn CardHost, pos: Vec2, pointer_id: u32) {
        let container_w = self.container.x;
        let enabled = self.enabled;
        let feedback = match self.state.top_mut() {
            Some(card) => {
                self.gesture
                    .pointer_move(&self.config, card, container_w, pos, pointer_id, enabled)
            }
            None => return,
        };
        let Some(feedback) = feedback else { return };

        if feedback.report {
            let position = self.state.position();
            self.notify(|o| o.on_swipe_progress(position, feedback.progress));
            // Background cards brighten while a drag is reporting progress
            for card in self.state.visible.iter_mut().skip(1) {
                card.opacity = 1.0;
                host.apply(card.id, &card.transform());
            }
        }
        if let Some(card) = self.state.top() {
            host.apply(card.id, &card.transform());
        }
    }

    /// Pointer lifted: run the tap check and the commit decision.
    pub fn pointer_up(&mut self, host: &mut dyn CardHost, pointer_id: u32) {
        let container_w = self.container.x;
        let enabled = self.enabled;
        let Some(card) = self.state.top() else { return };
        let Some(decision) =
            self.gesture
                .pointer_up(&self.config, card, container_w, pointer_id, enabled)
        else {
            return;
        };
        let top_id = card.id;

        if decision.tap {
            host.activate(top_id);
        }
        host.set_drag_capture(false);

        match decision.outcome {
            ReleaseOutcome::Commit(direction) => {
                self.start_swipe_out(host, direction, self.config.commit_duration_ms());
            }
            ReleaseOutcome::Settle { notify } => {
                if notify {
                    let position = self.state.position();
                    self.notify(|o| o.on_swipe_end(position));
                    self.restore_resting_opacity(host);
                }
                if let Some(card) = self.state.top_mut() {
                    let request = self.gesture.settle_request(&self.config, card);
                    card.set_transform(&request.target);
                    host.animate(request);
                }
            }
        }
    }

    // === Commands ===

    /// Programmatically dismiss the top card to the left.
    pub fn swipe_top_left(&mut self, host: &mut dyn CardHost) {
        if self.state.visible.is_empty() {
            return;
        }
        self.start_swipe_out(host, SwipeDirection::Left, self.config.animation_duration_ms);
    }

    /// Programmatically dismiss the top card to the right.
    pub fn swipe_top_right(&mut self, host: &mut dyn CardHost) {
        if self.state.visible.is_empty() {
            return;
        }
        self.start_swipe_out(host, SwipeDirection::Right, self.config.animation_duration_ms);
    }

    /// A swipe-out animation finished; consume the card and advance.
    ///
    /// Tokens that no longer match the in-flight swipe (the host replayed
    /// one, or the deck was reset underneath it) are ignored.
    pub fn swipe_finished(
        &mut self,
        source: &mut dyn DataSource,
        host: &mut dyn CardHost,
        token: SwipeToken,
    ) {
        if self.gesture.phase() != GesturePhase::Settling
            || self.state.top().map(|card| card.id) != Some(token.card)
        {
            log::debug!("stale swipe completion for {:?} ignored", token.card);
            return;
        }
        let Some(outcome) = index::commit(&mut self.state) else {
            return;
        };
        host.remove(outcome.card);
        match token.direction {
            SwipeDirection::Left => self.notify(|o| o.on_swiped_left(outcome.position)),
            SwipeDirection::Right => self.notify(|o| o.on_swiped_right(outcome.position)),
        }
        if outcome.emptied {
            self.notify(|o| o.on_stack_empty());
        }
        self.notify(|o| o.on_index_changed(outcome.advanced));
        log::debug!(
            "swiped {:?}: position {} -> {}",
            token.direction,
            outcome.position,
            outcome.advanced
        );
        index::fill(
            &mut self.state,
            source,
            &mut self.jitter,
            self.config.stack_rotation,
        );
        self.relayout(host);
    }

    // === Persistence ===

    /// Snapshot of the logical position, in raw fetch-counter units so a
    /// restore is exact even after several full cycles through the source.
    pub fn save_state(&self) -> SavedState {
        SavedState {
            position: self.state.raw_position(),
        }
    }

    /// Re-open the deck at a previously saved position. Call after
    /// [`Deck::attach`] with an equivalent data source.
    pub fn restore_state(
        &mut self,
        source: &mut dyn DataSource,
        host: &mut dyn CardHost,
        saved: &SavedState,
    ) {
        index::reset(&mut self.state);
        host.remove_all();
        self.gesture.release();
        self.state.count = source.count();
        self.state.current_index = saved.position;
        self.first_layout = true;
        index::fill(
            &mut self.state,
            source,
            &mut self.jitter,
            self.config.stack_rotation,
        );
        self.relayout(host);
        log::info!("deck restored at position {}", saved.position);
    }

    // === Configuration and accessors ===

    /// Install the lifecycle observer. If the deck already holds data the
    /// initial position-zero notification fires now (once).
    pub fn set_observer(&mut self, observer: Box<dyn StackObserver>) {
        self.observer = Some(observer);
        if !self.state.zero_notified && self.state.count > 0 {
            self.state.zero_notified = true;
            self.notify(|o| o.on_index_changed(0));
        }
    }

    /// Container bounds in which cards are centered and the commit thirds
    /// are measured. Set before attaching.
    pub fn set_container_size(&mut self, size: Vec2) {
        self.container = size;
    }

    pub fn container_size(&self) -> Vec2 {
        self.container
    }

    /// A disabled deck ignores new pointer input; an in-flight drag resolves
    /// as a settle on release.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_allowed_directions(&mut self, directions: DirectionPolicy) {
        self.config.allowed_directions = directions;
    }

    pub fn set_animation_duration(&mut self, duration_ms: u32) {
        self.config.animation_duration_ms = duration_ms;
    }

    pub fn set_swipe_rotation(&mut self, degrees: f32) {
        self.config.swipe_rotation = degrees;
    }

    pub fn set_swipe_opacity(&mut self, opacity: f32) {
        self.config.swipe_opacity = opacity;
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Handle of the topmost card, if any
    pub fn top_card(&self) -> Option<CardId> {
        self.state.top().map(|card| card.id)
    }

    /// Logical position of the topmost card, in [0, count)
    pub fn current_position(&self) -> usize {
        self.state.position()
    }

    pub fn visible_len(&self) -> usize {
        self.state.visible.len()
    }

    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    // === Internals ===

    fn notify(&mut self, f: impl FnOnce(&mut dyn StackObserver)) {
        if let Some(observer) = self.observer.as_deref_mut() {
            f(observer);
        }
    }

    fn start_swipe_out(
        &mut self,
        host: &mut dyn CardHost,
        direction: SwipeDirection,
        duration_ms: u32,
    ) {
        let Some(token) = self.gesture.begin_swipe_out(direction) else {
            return;
        };
        let container_w = self.container.x;
        let Some(card) = self.state.top_mut() else {
            return;
        };
        let request = gesture::swipe_out_request(&self.config, card, container_w, token, duration_ms);
        card.set_transform(&request.target);
        host.animate(request);
        log::debug!("swipe-out {:?} started for {:?}", direction, token.card());
    }

    /// Instant restore of the stacked opacities after a drag ends without
    /// committing (background cards were brightened during progress).
    fn restore_resting_opacity(&mut self, host: &mut dyn CardHost) {
        for (depth, card) in self.state.visible.iter_mut().enumerate() {
            card.opacity = if depth == 0 { 1.0 } else { STACKED_CARD_OPACITY };
            host.apply(card.id, &card.transform());
        }
    }

    /// Measure and place every card at its depth slot.
    ///
    /// The first pass after attach/reset/restore applies transforms
    /// instantly; later passes animate toward the slot, with freshly
    /// materialized cards placed at the slot first at opacity zero so they
    /// fade in instead of popping.
    fn relayout(&mut self, host: &mut dyn CardHost) {
        let n = self.state.visible.len();
        let animated = !self.first_layout;
        let container = self.container;
        let duration_ms = self.config.animation_duration_ms;

        for depth in 0..n {
            let slot = layout::slot(&self.config, depth, n);
            let card = &mut self.state.visible[depth];
            card.size = host.measure(card.id, slot.width_weight);
            let target = layout::resting_transform(slot, container, card.size, card.rotation);

            if !animated {
                card.fresh = false;
                card.set_transform(&target);
                host.apply(card.id, &target);
                continue;
            }
            if card.fresh {
                card.fresh = false;
                let placed = CardTransform {
                    opacity: 0.0,
                    ..target
                };
                card.set_transform(&placed);
                host.apply(card.id, &placed);
            } else {
                // x and stacking order snap; y, scale, and opacity animate
                let snapped = CardTransform {
                    pos: Vec2::new(target.pos.x, card.pos.y),
                    scale: card.scale,
                    opacity: card.opacity,
                    rotation: card.rotation,
                    ..target
                };
                card.set_transform(&snapped);
                host.apply(card.id, &snapped);
            }
            card.set_transform(&target);
            host.animate(AnimationRequest {
                card: card.id,
                target,
                duration_ms,
                easing: Easing::Standard,
                completion: None,
            });
        }

        match self.state.top() {
            Some(top) => self.gesture.observe(top.id, top.pos),
            None => self.gesture.release(),
        }
        self.first_layout = false;
    }
}
