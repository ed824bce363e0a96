//! Wraparound index arithmetic over the slot pool.
//!
//! The pool is addressed as a ring: when the occupied window rotates past
//! the last slot it continues at slot zero, and vice versa. Keeping the
//! modular arithmetic in one small type lets the window calculator stay
//! free of ad hoc increment/decrement helpers.

/// Modular index arithmetic over a pool of `len` slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotRing {
    len: usize,
}

impl SlotRing {
    /// Creates a ring over `len` slots. `len` must be non-zero.
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "slot ring requires at least one slot");
        Self { len }
    }

    /// Number of slots in the ring.
    pub fn len(&self) -> usize {
        self.len
    }

    /// A ring always has at least one slot.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The index one step forward, wrapping at the pool boundary.
    pub fn next(&self, index: usize) -> usize {
        debug_assert!(index < self.len, "slot index {index} outside ring of {}", self.len);
        (index + 1) % self.len
    }

    /// The index one step backward, wrapping below zero.
    pub fn prev(&self, index: usize) -> usize {
        debug_assert!(index < self.len, "slot index {index} outside ring of {}", self.len);
        (index + self.len - 1) % self.len
    }

    /// The slot a data index maps onto (`data_index mod len`).
    pub fn slot_for(&self, data_index: usize) -> usize {
        data_index % self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_at_end() {
        let ring = SlotRing::new(5);
        assert_eq!(ring.next(0), 1);
        assert_eq!(ring.next(3), 4);
        assert_eq!(ring.next(4), 0);
    }

    #[test]
    fn prev_wraps_below_zero() {
        let ring = SlotRing::new(5);
        assert_eq!(ring.prev(4), 3);
        assert_eq!(ring.prev(1), 0);
        assert_eq!(ring.prev(0), 4);
    }

    #[test]
    fn single_slot_ring_is_a_fixed_point() {
        let ring = SlotRing::new(1);
        assert_eq!(ring.next(0), 0);
        assert_eq!(ring.prev(0), 0);
    }

    #[test]
    fn slot_for_maps_data_indices_onto_the_ring() {
        let ring = SlotRing::new(5);
        assert_eq!(ring.slot_for(0), 0);
        assert_eq!(ring.slot_for(4), 4);
        assert_eq!(ring.slot_for(5), 0);
        assert_eq!(ring.slot_for(12), 2);
    }

    #[test]
    fn full_rotation_returns_to_start() {
        let ring = SlotRing::new(7);
        let mut index = 3;
        for _ in 0..7 {
            index = ring.next(index);
        }
        assert_eq!(index, 3);
        for _ in 0..7 {
            index = ring.prev(index);
        }
        assert_eq!(index, 3);
    }
}
