//! Window snapshots and scroll direction.

/// Direction of a viewport offset change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Content moving up; larger offsets, larger data indices.
    Forward,
    /// Content moving down; smaller offsets, smaller data indices.
    Backward,
}

impl ScrollDirection {
    /// Derives the direction from the new offset and the previously
    /// recorded one. Equal offsets count as forward.
    pub fn from_offsets(offset: f32, previous_offset: f32) -> Self {
        if offset >= previous_offset {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

/// Snapshot of the recycling window between scroll steps.
///
/// A state is immutable once committed: transitions clone it, mutate the
/// clone, and promote the clone after the whole load batch succeeded, so a
/// concurrent reader of the committed state never observes a half-applied
/// scroll.
///
/// Invariants (checked in debug builds by the window calculator):
/// - all slot indices are in `[0, view_items_count)`,
/// - all data indices are in `[0, data_count)`,
/// - `forward_reserve + backward_reserve <= reserve_count`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowState {
    /// First data index currently on screen (inclusive).
    pub first_visible_data_index: usize,
    /// Last data index currently on screen (inclusive).
    pub last_visible_data_index: usize,
    /// Pool slot standing at the backmost physical position of the
    /// occupied circular window; the next slot to relocate when scrolling
    /// forward.
    pub first_view_item_index: usize,
    /// Pool slot standing at the forwardmost physical position of the
    /// occupied circular window; the next slot to relocate when scrolling
    /// backward.
    pub last_view_item_index: usize,
    /// Pool slot bound to `first_visible_data_index`
    /// (`data index mod view_items_count`).
    pub first_visible_view_item: usize,
    /// Pool slot bound to `last_visible_data_index`
    /// (`data index mod view_items_count`).
    pub last_visible_view_item: usize,
    /// Slots already positioned past the visible window, ready to take the
    /// next forward item without a relocation.
    pub forward_reserve: usize,
    /// Slots already positioned before the visible window, ready to take
    /// the next backward item without a relocation.
    pub backward_reserve: usize,
    /// Whether this step physically relocates a slot (the circular window
    /// rotates by one) instead of reusing a reserve slot in place.
    pub move_one_view: bool,
}

impl WindowState {
    /// Number of data items currently visible.
    pub fn visible_len(&self) -> usize {
        self.last_visible_data_index - self.first_visible_data_index + 1
    }

    pub(crate) fn debug_check(&self, reserve_count: usize, view_items_count: usize) {
        debug_assert!(
            self.forward_reserve + self.backward_reserve <= reserve_count,
            "reserve counters exceed the reserve budget: {} + {} > {}",
            self.forward_reserve,
            self.backward_reserve,
            reserve_count
        );
        debug_assert!(
            self.first_view_item_index < view_items_count
                && self.last_view_item_index < view_items_count
                && self.first_visible_view_item < view_items_count
                && self.last_visible_view_item < view_items_count,
            "slot index outside the pool: {self:?}"
        );
        debug_assert!(
            self.first_visible_data_index <= self.last_visible_data_index,
            "inverted visible range: {self:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_offsets() {
        assert_eq!(
            ScrollDirection::from_offsets(10.0, 5.0),
            ScrollDirection::Forward
        );
        assert_eq!(
            ScrollDirection::from_offsets(5.0, 10.0),
            ScrollDirection::Backward
        );
        // Equal offsets count as forward.
        assert_eq!(
            ScrollDirection::from_offsets(7.0, 7.0),
            ScrollDirection::Forward
        );
    }

    #[test]
    fn default_state_is_all_zeros() {
        let state = WindowState::default();
        assert_eq!(state.first_visible_data_index, 0);
        assert_eq!(state.last_visible_data_index, 0);
        assert_eq!(state.forward_reserve, 0);
        assert_eq!(state.backward_reserve, 0);
        assert!(!state.move_one_view);
        assert_eq!(state.visible_len(), 1);
    }
}
