//! Circular index bookkeeping
//!
//! Owns the arithmetic that pages a fixed window of cards through a
//! logically circular data source. The fetch counter only ever grows;
//! the modulo is applied at fetch time and when a logical position is
//! exposed, so "how many cards have been dispensed" stays well defined
//! across any number of full cycles.

use crate::deck::state::{Card, JitterRng, StackState};
use crate::host::{CardId, DataSource};

/// Result of consuming the top card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    /// The card that left the stack
    pub card: CardId,
    /// Logical position of the consumed card, in [0, count)
    pub position: usize,
    /// Logical position of the next top card, in [0, count)
    pub advanced: usize,
    /// The window is empty after removal
    pub emptied: bool,
}

/// Rebuild the state for a freshly attached data source.
///
/// The effective window size is fixed here; a later change in the source
/// count grows or starves the window but never resizes it.
pub fn attach(state: &mut StackState, configured_size: usize, count: usize) {
    *state = StackState {
        current_index: 0,
        visible: Vec::new(),
        stack_size: configured_size.min(count),
        count,
        zero_notified: false,
    };
}

/// Top up the window, materializing cards from the source in fetch order.
///
/// Returns the number of cards added. A drained source (`count == 0`) is a
/// no-op; a source smaller than the window is paged circularly, so the same
/// logical index may be materialized more than once.
pub fn fill(
    state: &mut StackState,
    source: &mut dyn DataSource,
    jitter: &mut JitterRng,
    rotation_range: u32,
) -> usize {
    let mut added = 0;
    while state.visible.len() < state.stack_size && state.count > 0 {
        let fetch = (state.current_index % state.count as u64) as usize;
        let id = source.card_at(fetch);
        let rotation = jitter.rotation(rotation_range);
        state.visible.push(Card::new(id, rotation));
        state.current_index += 1;
        added += 1;
    }
    added
}

/// Consume the top card and advance the logical position by one.
///
/// Positions are computed with the departing card still counted, matching
/// what observers saw while it was on top.
pub fn commit(state: &mut StackState) -> Option<CommitOutcome> {
    if state.visible.is_empty() {
        return None;
    }
    let position = state.position();
    let card = state.visible.remove(0).id;
    let advanced = if state.count == 0 {
        0
    } else {
        (position + 1) % state.count
    };
    Some(CommitOutcome {
        card,
        position,
        advanced,
        emptied: state.visible.is_empty(),
    })
}

/// Rewind the fetch counter and drop the window; the caller refills.
pub fn reset(state: &mut StackState) {
    state.current_index = 0;
    state.visible.clear();
}
