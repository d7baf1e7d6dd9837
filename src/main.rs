//! Swipedeck demo driver
//!
//! Runs a scripted gesture session against a console host: a few drags that
//! commit, one that snaps back, a tap, a programmatic swipe, and a
//! save/restore cycle. Animation completions are drained between steps the
//! way a host event loop would deliver them.

use glam::Vec2;

use swipedeck::{
    AnimationRequest, CardHost, CardId, CardTransform, DataSource, Deck, DeckConfig,
    StackObserver, SwipeToken,
};

const CONTAINER: Vec2 = Vec2::new(360.0, 640.0);

/// Card deck backed by a list of destination names
struct Destinations {
    names: Vec<&'static str>,
    next_handle: u64,
}

impl Destinations {
    fn new() -> Self {
        Self {
            names: vec!["Lisbon", "Reykjavik", "Osaka", "Valparaiso", "Tbilisi"],
            next_handle: 0,
        }
    }
}

impl DataSource for Destinations {
    fn count(&self) -> usize {
        self.names.len()
    }

    fn card_at(&mut self, index: usize) -> CardId {
        self.next_handle += 1;
        log::info!("  materialize \"{}\" (handle {})", self.names[index], self.next_handle);
        CardId(self.next_handle)
    }
}

/// Host that logs every command and queues swipe completions for the driver
#[derive(Default)]
struct ConsoleHost {
    pending: Vec<SwipeToken>,
}

impl ConsoleHost {
    fn drain(&mut self) -> Vec<SwipeToken> {
        std::mem::take(&mut self.pending)
    }
}

impl CardHost for ConsoleHost {
    fn measure(&mut self, _card: CardId, width_weight: f32) -> Vec2 {
        Vec2::new(CONTAINER.x * width_weight, 480.0)
    }

    fn apply(&mut self, card: CardId, transform: &CardTransform) {
        log::debug!(
            "  apply   {card:?} pos=({:.0},{:.0}) rot={:.1} alpha={:.2}",
            transform.pos.x,
            transform.pos.y,
            transform.rotation,
            transform.opacity
        );
    }

    fn animate(&mut self, request: AnimationRequest) {
        log::info!(
            "  animate {:?} -> pos=({:.0},{:.0}) alpha={:.2} over {}ms ({:?})",
            request.card,
            request.target.pos.x,
            request.target.pos.y,
            request.target.opacity,
            request.duration_ms,
            request.easing
        );
        if let Some(token) = request.completion {
            self.pending.push(token);
        }
    }

    fn activate(&mut self, card: CardId) {
        log::info!("  tap activated {card:?}");
    }

    fn set_drag_capture(&mut self, captured: bool) {
        log::debug!("  drag capture: {captured}");
    }

    fn remove(&mut self, card: CardId) {
        log::info!("  removed {card:?}");
    }

    fn remove_all(&mut self) {
        log::debug!("  removed all cards");
    }
}

struct ConsoleObserver;

impl StackObserver for ConsoleObserver {
    fn on_swipe_start(&mut self, position: usize) {
        log::info!("* swipe start at position {position}");
    }

    fn on_swipe_progress(&mut self, position: usize, progress: f32) {
        log::info!("* swipe progress at {position}: {progress:+.2}");
    }

    fn on_swipe_end(&mut self, position: usize) {
        log::info!("* swipe rejected at position {position}");
    }

    fn on_swiped_left(&mut self, position: usize) {
        log::info!("* swiped left: position {position}");
    }

    fn on_swiped_right(&mut self, position: usize) {
        log::info!("* swiped right: position {position}");
    }

    fn on_stack_empty(&mut self) {
        log::info!("* stack empty");
    }

    fn on_index_changed(&mut self, position: usize) {
        log::info!("* now showing position {position}");
    }
}

/// Deliver queued swipe completions, as a host animation loop would
fn settle(deck: &mut Deck, source: &mut Destinations, host: &mut ConsoleHost) {
    for token in host.drain() {
        deck.swipe_finished(source, host, token);
    }
}

fn drag(deck: &mut Deck, host: &mut ConsoleHost, from: Vec2, to: Vec2) {
    deck.pointer_down(host, from, 0);
    // A couple of intermediate points so progress notifications fire
    let mid = from + (to - from) / 2.0;
    deck.pointer_move(host, mid, 0);
    deck.pointer_move(host, to, 0);
    deck.pointer_up(host, 0);
}

fn main() {
    env_logger::init();
    log::info!("swipedeck demo starting");

    let mut source = Destinations::new();
    let mut host = ConsoleHost::default();
    let mut deck = Deck::with_seed(
        DeckConfig {
            stack_rotation: 8,
            spacing: 14.0,
            scale_factor: 0.96,
            ..DeckConfig::default()
        },
        42,
    );
    deck.set_container_size(CONTAINER);
    deck.set_observer(Box::new(ConsoleObserver));
    deck.attach(&mut source, &mut host);

    log::info!("--- drag right past the last third: commits");
    drag(
        &mut deck,
        &mut host,
        Vec2::new(180.0, 300.0),
        Vec2::new(330.0, 310.0),
    );
    settle(&mut deck, &mut source, &mut host);

    log::info!("--- drag released in the middle: snaps back");
    drag(
        &mut deck,
        &mut host,
        Vec2::new(180.0, 300.0),
        Vec2::new(210.0, 305.0),
    );

    log::info!("--- tap");
    deck.pointer_down(&mut host, Vec2::new(180.0, 300.0), 0);
    deck.pointer_up(&mut host, 0);

    log::info!("--- programmatic swipe left");
    deck.swipe_top_left(&mut host);
    settle(&mut deck, &mut source, &mut host);

    let saved = deck.save_state();
    match saved.to_json() {
        Ok(json) => log::info!("--- saved state: {json}"),
        Err(err) => log::warn!("--- saving failed: {err}"),
    }

    log::info!("--- reset, then restore the saved position");
    deck.reset(&mut source, &mut host);
    deck.restore_state(&mut source, &mut host, &saved);

    log::info!(
        "demo done: position {} of {}, {} cards visible",
        deck.current_position(),
        source.count(),
        deck.visible_len()
    );
}
