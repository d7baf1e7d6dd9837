//! Shared fakes for deck tests
//!
//! The host and source record every command the engine issues; animations
//! complete only when a test drains their tokens, so completion-callback
//! ordering is observable.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::host::{
    AnimationRequest, CardHost, CardId, CardTransform, DataSource, StackObserver, SwipeToken,
};

/// Container size every test deck uses
pub const CONTAINER: Vec2 = Vec2::new(300.0, 400.0);

/// Circular source of `count` items; card ids encode fetch generation and
/// logical index so repeat materializations stay distinguishable
pub struct TestSource {
    pub count: usize,
    /// Logical index of every fetch, in order
    pub fetched: Vec<usize>,
}

impl TestSource {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            fetched: Vec::new(),
        }
    }
}

impl DataSource for TestSource {
    fn count(&self) -> usize {
        self.count
    }

    fn card_at(&mut self, index: usize) -> CardId {
        self.fetched.push(index);
        CardId(((self.fetched.len() as u64) << 32) | index as u64)
    }
}

/// Logical index a [`TestSource`] card was materialized from
pub fn logical(id: CardId) -> usize {
    (id.0 & 0xffff_ffff) as usize
}

/// Records every command; cards measure 300x200 at full width
#[derive(Default)]
pub struct TestHost {
    pub applied: Vec<(CardId, CardTransform)>,
    pub animations: Vec<AnimationRequest>,
    pub activated: Vec<CardId>,
    pub removed: Vec<CardId>,
    pub remove_all_calls: usize,
    pub capture: Vec<bool>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the completion tokens of every pending swipe-out animation
    pub fn finish_swipes(&mut self) -> Vec<SwipeToken> {
        self.animations
            .iter_mut()
            .filter_map(|request| request.completion.take())
            .collect()
    }

    pub fn last_animation(&self) -> Option<&AnimationRequest> {
        self.animations.last()
    }

    pub fn last_applied(&self, card: CardId) -> Option<&CardTransform> {
        self.applied
            .iter()
            .rev()
            .find(|(id, _)| *id == card)
            .map(|(_, transform)| transform)
    }
}

impl CardHost for TestHost {
    fn measure(&mut self, _card: CardId, width_weight: f32) -> Vec2 {
        Vec2::new(CONTAINER.x * width_weight, 200.0)
    }

    fn apply(&mut self, card: CardId, transform: &CardTransform) {
        self.applied.push((card, *transform));
    }

    fn animate(&mut self, request: AnimationRequest) {
        self.animations.push(request);
    }

    fn activate(&mut self, card: CardId) {
        self.activated.push(card);
    }

    fn set_drag_capture(&mut self, captured: bool) {
        self.capture.push(captured);
    }

    fn remove(&mut self, card: CardId) {
        self.removed.push(card);
    }

    fn remove_all(&mut self) {
        self.remove_all_calls += 1;
    }
}

/// Observer events in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Start(usize),
    Progress(usize, f32),
    End(usize),
    Left(usize),
    Right(usize),
    Empty,
    Index(usize),
}

/// Observer recording into a shared buffer; clone the recorder to keep a
/// handle after boxing it into the deck
#[derive(Default, Clone)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<Event> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl StackObserver for Recorder {
    fn on_swipe_start(&mut self, position: usize) {
        self.events.borrow_mut().push(Event::Start(position));
    }

    fn on_swipe_progress(&mut self, position: usize, progress: f32) {
        self.events
            .borrow_mut()
            .push(Event::Progress(position, progress));
    }

    fn on_swipe_end(&mut self, position: usize) {
        self.events.borrow_mut().push(Event::End(position));
    }

    fn on_swiped_left(&mut self, position: usize) {
        self.events.borrow_mut().push(Event::Left(position));
    }

    fn on_swiped_right(&mut self, position: usize) {
        self.events.borrow_mut().push(Event::Right(position));
    }

    fn on_stack_empty(&mut self) {
        self.events.borrow_mut().push(Event::Empty);
    }

    fn on_index_changed(&mut self, position: usize) {
        self.events.borrow_mut().push(Event::Index(position));
    }
}
