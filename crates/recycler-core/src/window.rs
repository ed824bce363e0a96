//! Window calculator: pure transitions over [`WindowState`].
//!
//! Two entry points mirror the two phases of a recycling session:
//! [`initial_fill`] emits the per-row states that fill an empty viewport
//! top-down, and [`step`] (built from [`plan_step`] + [`advance_window`])
//! walks the committed window towards a new scroll offset one item at a
//! time. Everything here is pure; callers own the clone-compute-commit
//! cycle.

use smallvec::SmallVec;

use crate::slot_ring::SlotRing;
use crate::state::{ScrollDirection, WindowState};

/// Default number of pre-staged reserve slots kept outside the visible
/// window. Two slots absorb single-item scroll steps on either side before
/// a physical relocation becomes necessary.
pub const RESERVE_COUNT: usize = 2;

/// Relative tolerance for treating a scroll extent as an exact row
/// multiple. A remainder below `PARTIAL_EPSILON * item_height` does not
/// count as an extra partially visible row.
pub const PARTIAL_EPSILON: f32 = 0.001;

/// Inline capacity for the initial-fill sequence.
/// Typical viewports fit a dozen-odd fixed-height rows, so 16 keeps the
/// common case off the heap.
pub type InitialStates = SmallVec<[WindowState; 16]>;

/// Geometry inputs for the window calculator.
#[derive(Clone, Copy, Debug)]
pub struct WindowConfig {
    /// Fixed height of every row. Must be positive.
    pub item_height: f32,
    /// Height of the scrollable viewport.
    pub viewport_height: f32,
    /// Number of reserve slots kept outside the visible window.
    pub reserve_count: usize,
}

impl WindowConfig {
    /// Creates a config with the default reserve size.
    pub fn new(item_height: f32, viewport_height: f32) -> Self {
        debug_assert!(item_height > 0.0, "item height must be positive");
        Self {
            item_height,
            viewport_height,
            reserve_count: RESERVE_COUNT,
        }
    }
}

/// Splits `extent` into fully covered rows plus one partial row when the
/// remainder exceeds the epsilon tolerance.
fn covered_rows(extent: f32, item_height: f32) -> (usize, usize) {
    let whole = (extent / item_height) as usize;
    let partial = usize::from(extent % item_height > PARTIAL_EPSILON * item_height);
    (whole, partial)
}

/// Emits one window state per row needed to fill the viewport top-down.
///
/// Each state extends the tail indices by one while the head stays pinned
/// at zero and no reserve is consumed. The sequence is capped at
/// `data_count`: a viewport taller than the whole data set fills only the
/// rows that exist.
pub fn initial_fill(config: &WindowConfig, data_count: usize) -> InitialStates {
    let (whole, partial) = covered_rows(config.viewport_height, config.item_height);
    let rows = (whole + partial).min(data_count);

    let mut states = InitialStates::new();
    for index in 0..rows {
        states.push(WindowState {
            last_visible_data_index: index,
            last_visible_view_item: index,
            last_view_item_index: index,
            ..WindowState::default()
        });
    }
    states
}

/// Number of items a scroll to `scroll_offset` newly exposes in
/// `direction`.
///
/// Returns zero when the boundary row is outside the data range, when the
/// window has already caught up, or when the offset moved against
/// `direction`; all of those are ordinary no-ops rather than errors.
pub fn plan_step(
    current: &WindowState,
    scroll_offset: f32,
    direction: ScrollDirection,
    config: &WindowConfig,
    data_count: usize,
) -> usize {
    // Forward scrolling anticipates the row entering at the trailing edge
    // of the viewport; backward scrolling anchors to the leading edge.
    let base = match direction {
        ScrollDirection::Forward => config.viewport_height,
        ScrollDirection::Backward => 0.0,
    };
    let (whole, partial) = covered_rows(scroll_offset + base, config.item_height);

    // The boundary row is 1-based here; zero means the offset sits before
    // the first row entirely.
    let boundary = whole + partial;
    if boundary == 0 {
        return 0;
    }
    let next_visible = boundary - 1;
    if next_visible >= data_count {
        return 0;
    }

    let load = match direction {
        ScrollDirection::Forward if current.last_visible_data_index < next_visible => {
            next_visible - current.last_visible_data_index
        }
        ScrollDirection::Backward if current.first_visible_data_index > next_visible => {
            current.first_visible_data_index - next_visible
        }
        _ => 0,
    };
    if load > 0 {
        log::trace!(
            "plan_step: offset={scroll_offset} {direction:?} boundary={next_visible} load={load}"
        );
    }
    load
}

/// Advances the window by exactly one data item in `direction`.
///
/// A reserve slot on the entered side is consumed first and converted to
/// the opposite side; only when that side is exhausted does the step
/// relocate a slot (`move_one_view`), rotating both ends of the circular
/// window by one. Relocation therefore happens exactly when the incoming
/// item has no pre-positioned slot waiting for it, so a step at the data
/// boundary never rotates pointlessly.
///
/// The caller guarantees the newly exposed data index exists; exposing
/// past either end of the data is a planning defect.
pub fn advance_window(
    current: &WindowState,
    direction: ScrollDirection,
    config: &WindowConfig,
    view_items_count: usize,
    data_count: usize,
) -> WindowState {
    let ring = SlotRing::new(view_items_count);
    let mut next = current.clone();
    next.move_one_view = false;

    match direction {
        ScrollDirection::Forward => {
            debug_assert!(
                current.last_visible_data_index + 1 < data_count,
                "advancing past the last data item"
            );
            next.first_visible_data_index += 1;
            next.last_visible_data_index += 1;
            next.first_visible_view_item = ring.slot_for(next.first_visible_data_index);
            next.last_visible_view_item = ring.slot_for(next.last_visible_data_index);

            if next.forward_reserve > 0 {
                // The incoming item lands on an already-positioned slot;
                // the slot leaving the top becomes backward reserve.
                next.forward_reserve -= 1;
                next.backward_reserve += 1;
            } else {
                next.move_one_view = true;
                next.first_view_item_index = ring.next(next.first_view_item_index);
                next.last_view_item_index = ring.next(next.last_view_item_index);
            }
        }
        ScrollDirection::Backward => {
            debug_assert!(
                current.first_visible_data_index > 0,
                "advancing before the first data item"
            );
            next.first_visible_data_index -= 1;
            next.last_visible_data_index -= 1;
            next.first_visible_view_item = ring.slot_for(next.first_visible_data_index);
            next.last_visible_view_item = ring.slot_for(next.last_visible_data_index);

            if next.backward_reserve > 0 {
                next.backward_reserve -= 1;
                next.forward_reserve += 1;
            } else {
                next.move_one_view = true;
                next.first_view_item_index = ring.prev(next.first_view_item_index);
                next.last_view_item_index = ring.prev(next.last_view_item_index);
            }
        }
    }

    next.debug_check(config.reserve_count, view_items_count);
    next
}

/// Computes how many items a scroll to `scroll_offset` exposes and the
/// window state after loading all of them.
///
/// The batch is folded as `load` successive single-item transitions, each
/// with its own reserve bookkeeping and relocation decision. A zero load
/// returns the current state untouched.
pub fn step(
    current: &WindowState,
    scroll_offset: f32,
    direction: ScrollDirection,
    config: &WindowConfig,
    view_items_count: usize,
    data_count: usize,
) -> (usize, WindowState) {
    let load = plan_step(current, scroll_offset, direction, config, data_count);
    let mut next = current.clone();
    for _ in 0..load {
        next = advance_window(&next, direction, config, view_items_count, data_count);
    }
    (load, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Shared geometry: 50px rows in a 120px viewport over 10 items, i.e.
    // 3 visible rows and a pool of 5.
    const DATA_COUNT: usize = 10;
    const VIEW_ITEMS: usize = 5;

    fn config() -> WindowConfig {
        WindowConfig::new(50.0, 120.0)
    }

    /// The committed state right after mounting: rows 0..=2 visible, both
    /// reserve slots staged ahead.
    fn mounted_state() -> WindowState {
        WindowState {
            first_visible_data_index: 0,
            last_visible_data_index: 2,
            first_view_item_index: 0,
            last_view_item_index: 4,
            first_visible_view_item: 0,
            last_visible_view_item: 2,
            forward_reserve: 2,
            backward_reserve: 0,
            move_one_view: false,
        }
    }

    #[test]
    fn initial_fill_counts_the_partial_row() {
        // 120 / 50 = 2.4 rows, so a third partial row is needed.
        let states = initial_fill(&config(), DATA_COUNT);
        assert_eq!(states.len(), 3);
        assert_eq!(states[0].last_visible_data_index, 0);
        assert_eq!(states[2].last_visible_data_index, 2);
        assert_eq!(states[2].last_view_item_index, 2);
        for state in &states {
            assert_eq!(state.first_visible_data_index, 0);
            assert_eq!(state.first_view_item_index, 0);
            assert_eq!(state.forward_reserve, 0);
            assert_eq!(state.backward_reserve, 0);
        }
    }

    #[test]
    fn initial_fill_skips_the_partial_row_on_exact_multiples() {
        let states = initial_fill(&WindowConfig::new(50.0, 100.0), DATA_COUNT);
        assert_eq!(states.len(), 2);

        // A remainder below the epsilon tolerance does not count either.
        let states = initial_fill(&WindowConfig::new(50.0, 150.04), DATA_COUNT);
        assert_eq!(states.len(), 3);

        // Above the tolerance it does.
        let states = initial_fill(&WindowConfig::new(50.0, 150.2), DATA_COUNT);
        assert_eq!(states.len(), 4);
    }

    #[test]
    fn initial_fill_is_capped_by_the_data_count() {
        let states = initial_fill(&config(), 2);
        assert_eq!(states.len(), 2);
        assert!(initial_fill(&config(), 0).is_empty());
    }

    #[test]
    fn forward_scroll_exposes_three_items() {
        // Offset 170: floor((170 + 120) / 50) = 5 whole rows plus a 40px
        // remainder, so the boundary row is data index 5 and three items
        // past the committed tail of 2 must load.
        let (load, next) = step(
            &mounted_state(),
            170.0,
            ScrollDirection::Forward,
            &config(),
            VIEW_ITEMS,
            DATA_COUNT,
        );
        assert_eq!(load, 3);
        assert_eq!(next.first_visible_data_index, 3);
        assert_eq!(next.last_visible_data_index, 5);
        assert_eq!(next.first_visible_view_item, 3);
        assert_eq!(next.last_visible_view_item, 0);
        assert_eq!(next.forward_reserve, 0);
        assert_eq!(next.backward_reserve, 2);
        // The reserve absorbed the first two items; only the third step
        // rotated the window.
        assert!(next.move_one_view);
        assert_eq!(next.first_view_item_index, 1);
        assert_eq!(next.last_view_item_index, 0);
    }

    #[test]
    fn reserve_drains_before_any_relocation() {
        let cfg = config();
        let one = advance_window(
            &mounted_state(),
            ScrollDirection::Forward,
            &cfg,
            VIEW_ITEMS,
            DATA_COUNT,
        );
        assert!(!one.move_one_view);
        assert_eq!((one.forward_reserve, one.backward_reserve), (1, 1));

        let two = advance_window(&one, ScrollDirection::Forward, &cfg, VIEW_ITEMS, DATA_COUNT);
        assert!(!two.move_one_view);
        assert_eq!((two.forward_reserve, two.backward_reserve), (0, 2));

        let three = advance_window(&two, ScrollDirection::Forward, &cfg, VIEW_ITEMS, DATA_COUNT);
        assert!(three.move_one_view);
        assert_eq!((three.forward_reserve, three.backward_reserve), (0, 2));
    }

    #[test]
    fn forward_then_mirrored_backward_round_trips() {
        let start = mounted_state();
        let cfg = config();
        let (load, forwarded) = step(
            &start,
            170.0,
            ScrollDirection::Forward,
            &cfg,
            VIEW_ITEMS,
            DATA_COUNT,
        );
        assert_eq!(load, 3);

        // Offset 40 puts the boundary back on data index 0.
        let (load, returned) = step(
            &forwarded,
            40.0,
            ScrollDirection::Backward,
            &cfg,
            VIEW_ITEMS,
            DATA_COUNT,
        );
        assert_eq!(load, 3);
        assert_eq!(
            returned.first_visible_data_index,
            start.first_visible_data_index
        );
        assert_eq!(
            returned.last_visible_data_index,
            start.last_visible_data_index
        );
        assert_eq!(returned.first_visible_view_item, start.first_visible_view_item);
        assert_eq!(returned.last_visible_view_item, start.last_visible_view_item);
        assert_eq!(returned.first_view_item_index, start.first_view_item_index);
        assert_eq!(returned.last_view_item_index, start.last_view_item_index);
        assert_eq!(returned.forward_reserve, start.forward_reserve);
        assert_eq!(returned.backward_reserve, start.backward_reserve);
    }

    #[test]
    fn caught_up_step_is_idempotent() {
        let state = mounted_state();
        // The boundary row for offset 30 forward is index 2, which is
        // already the visible tail.
        let (load, next) = step(
            &state,
            30.0,
            ScrollDirection::Forward,
            &config(),
            VIEW_ITEMS,
            DATA_COUNT,
        );
        assert_eq!(load, 0);
        assert_eq!(next, state);
    }

    #[test]
    fn forward_step_at_the_last_item_is_a_no_op() {
        let state = WindowState {
            first_visible_data_index: 7,
            last_visible_data_index: 9,
            first_view_item_index: 0,
            last_view_item_index: 4,
            first_visible_view_item: 2,
            last_visible_view_item: 4,
            forward_reserve: 0,
            backward_reserve: 2,
            move_one_view: false,
        };
        let (load, next) = step(
            &state,
            10_000.0,
            ScrollDirection::Forward,
            &config(),
            VIEW_ITEMS,
            DATA_COUNT,
        );
        assert_eq!(load, 0);
        assert_eq!(next, state);
        assert!(!next.move_one_view);
    }

    #[test]
    fn backward_step_at_the_first_item_is_a_no_op() {
        let (load, next) = step(
            &mounted_state(),
            10.0,
            ScrollDirection::Backward,
            &config(),
            VIEW_ITEMS,
            DATA_COUNT,
        );
        assert_eq!(load, 0);
        assert_eq!(next, mounted_state());
    }

    #[test]
    fn backward_to_exactly_zero_is_a_no_op() {
        // At offset 0 the backward boundary computes to row -1, which is
        // outside the data range and therefore a zero-length result.
        let mut state = mounted_state();
        state.first_visible_data_index = 1;
        state.last_visible_data_index = 3;
        let (load, _) = step(
            &state,
            0.0,
            ScrollDirection::Backward,
            &config(),
            VIEW_ITEMS,
            DATA_COUNT,
        );
        assert_eq!(load, 0);
    }

    #[test]
    fn invariants_hold_across_a_full_sweep() {
        let cfg = config();
        let mut state = mounted_state();
        let mut previous = 0.0;
        let max_offset = (DATA_COUNT + 2) as f32 * cfg.item_height;

        let mut offsets: Vec<f32> = Vec::new();
        let mut offset = 0.0;
        while offset < max_offset {
            offsets.push(offset);
            offset += 37.0;
        }
        let back: Vec<f32> = offsets.iter().rev().copied().collect();

        for &offset in offsets.iter().chain(back.iter()) {
            let direction = ScrollDirection::from_offsets(offset, previous);
            let (_, next) = step(&state, offset, direction, &cfg, VIEW_ITEMS, DATA_COUNT);
            assert!(next.forward_reserve + next.backward_reserve <= cfg.reserve_count);
            assert!(next.first_view_item_index < VIEW_ITEMS);
            assert!(next.last_view_item_index < VIEW_ITEMS);
            assert!(next.first_visible_view_item < VIEW_ITEMS);
            assert!(next.last_visible_view_item < VIEW_ITEMS);
            assert!(next.last_visible_data_index < DATA_COUNT);
            assert!(next.first_visible_data_index <= next.last_visible_data_index);
            state = next;
            previous = offset;
        }

        // The sweep returned to the top.
        assert_eq!(state.first_visible_data_index, 0);
    }
}
