//! Row adapter trait and the recyclable slot pool.
//!
//! The adapter is the data/view collaborator: it knows the size of the data
//! source, how to build a fresh row slot, and how to populate a slot with
//! the content of a data index. The pool owns the slots themselves as a
//! fixed-capacity arena addressed by stable integer indices.

/// Supplies row slots and their content for a recycling session.
///
/// Implementations own the data source. The data is treated as fixed-size
/// for the lifetime of the session: `count` must not change while a
/// [`RecyclerView`](crate::RecyclerView) is driving the adapter.
pub trait RowAdapter {
    /// The recyclable row object this adapter produces.
    type Slot;

    /// Size of the data source.
    fn count(&self) -> usize;

    /// Builds one fresh row slot.
    fn on_create_slot(&mut self) -> Self::Slot;

    /// Populates `slot` with the content of `data_index`.
    ///
    /// Must fully replace any previous binding; a rebound slot carries no
    /// stale state from the item it displayed before.
    fn on_bind_slot(&mut self, slot: &mut Self::Slot, data_index: usize);
}

/// Fixed-capacity arena of recyclable row slots.
///
/// The pool grows only until it holds `capacity` slots (visible rows plus
/// reserve) and never beyond; each slot keeps the index it was created at
/// for the rest of the session.
#[derive(Debug)]
pub struct RowPool<S> {
    slots: Vec<S>,
    capacity: usize,
}

impl<S> RowPool<S> {
    /// Creates an empty pool that will hold at most `capacity` slots.
    ///
    /// The backing storage is allocated once here; filling the pool does
    /// not reallocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of slots created so far.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot has been created yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of slots this pool will ever hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates a new slot through the adapter's factory and registers it at
    /// the next free pool index, which is returned.
    ///
    /// Creating past `capacity` is a defect in the caller's windowing
    /// logic.
    pub fn create<A>(&mut self, adapter: &mut A) -> usize
    where
        A: RowAdapter<Slot = S>,
    {
        debug_assert!(
            self.slots.len() < self.capacity,
            "slot pool already at capacity {}",
            self.capacity
        );
        self.slots.push(adapter.on_create_slot());
        self.slots.len() - 1
    }

    /// Binds the slot at `slot_index` to `data_index`, creating a new slot
    /// first when `create_if_missing` is set. Returns the bound slot.
    ///
    /// The windowing calculator guarantees `data_index` is in range; an
    /// out-of-range index is a defect, not a runtime condition.
    pub fn bind<A>(
        &mut self,
        adapter: &mut A,
        data_index: usize,
        slot_index: usize,
        create_if_missing: bool,
    ) -> &mut S
    where
        A: RowAdapter<Slot = S>,
    {
        debug_assert!(
            data_index < adapter.count(),
            "binding data index {data_index} outside the data source"
        );
        if create_if_missing {
            self.create(adapter);
        }
        let slot = &mut self.slots[slot_index];
        adapter.on_bind_slot(slot, data_index);
        slot
    }

    /// The slot at `index`, if created.
    pub fn get(&self, index: usize) -> Option<&S> {
        self.slots.get(index)
    }

    /// Mutable access to the slot at `index`, if created.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut S> {
        self.slots.get_mut(index)
    }

    /// All created slots in pool-index order.
    pub fn slots(&self) -> &[S] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Letters {
        data: Vec<char>,
        created: usize,
    }

    impl RowAdapter for Letters {
        type Slot = String;

        fn count(&self) -> usize {
            self.data.len()
        }

        fn on_create_slot(&mut self) -> String {
            self.created += 1;
            String::new()
        }

        fn on_bind_slot(&mut self, slot: &mut String, data_index: usize) {
            slot.clear();
            slot.push(self.data[data_index]);
        }
    }

    fn adapter() -> Letters {
        Letters {
            data: vec!['a', 'b', 'c', 'd', 'e', 'f'],
            created: 0,
        }
    }

    #[test]
    fn create_registers_slots_at_sequential_indices() {
        let mut adapter = adapter();
        let mut pool = RowPool::with_capacity(3);
        assert!(pool.is_empty());
        assert_eq!(pool.create(&mut adapter), 0);
        assert_eq!(pool.create(&mut adapter), 1);
        assert_eq!(pool.create(&mut adapter), 2);
        assert_eq!(pool.len(), 3);
        assert_eq!(adapter.created, 3);
    }

    #[test]
    fn bind_with_create_grows_the_pool() {
        let mut adapter = adapter();
        let mut pool = RowPool::with_capacity(2);
        let slot = pool.bind(&mut adapter, 0, 0, true);
        assert_eq!(slot, "a");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn rebinding_fully_overwrites_previous_content() {
        let mut adapter = adapter();
        let mut pool = RowPool::with_capacity(2);
        pool.bind(&mut adapter, 0, 0, true);
        let slot = pool.bind(&mut adapter, 5, 0, false);
        assert_eq!(slot, "f");
        assert_eq!(pool.len(), 1, "rebinding must not create slots");
    }

    #[test]
    fn bind_is_idempotent() {
        let mut adapter = adapter();
        let mut pool = RowPool::with_capacity(2);
        pool.bind(&mut adapter, 2, 0, true);
        pool.bind(&mut adapter, 2, 0, false);
        assert_eq!(pool.get(0).map(String::as_str), Some("c"));
    }
}
