//! Scroll orchestration over the windowing state machine.
//!
//! [`RecyclerView`] ties the pure calculator from `recycler-core` to the
//! two collaborators: it runs the initial fill, stages the reserve slots,
//! and serializes every scroll notification behind one gate so at most one
//! step-and-apply sequence executes at a time.

use std::sync::{Mutex, MutexGuard};

use recycler_core::{
    advance_window, initial_fill, plan_step, ScrollDirection, WindowConfig, WindowState,
    RESERVE_COUNT,
};

use crate::adapter::{RowAdapter, RowPool};
use crate::host::ListHost;

/// Configuration for a recycling session.
#[derive(Clone, Copy, Debug)]
pub struct RecyclerConfig {
    /// Fixed height of every row. Must be positive.
    pub item_height: f32,
    /// Number of reserve slots staged outside the visible window.
    pub reserve_count: usize,
    /// Scroll offset the session starts at.
    pub initial_offset: f32,
}

impl RecyclerConfig {
    /// Creates a config with the default reserve size and a zero initial
    /// offset.
    pub fn new(item_height: f32) -> Self {
        Self {
            item_height,
            reserve_count: RESERVE_COUNT,
            initial_offset: 0.0,
        }
    }
}

/// Drives a bounded pool of row slots over an unbounded data range.
///
/// Scroll notifications may arrive concurrently from the host environment;
/// [`on_scroll`](Self::on_scroll) serializes them behind an internal gate,
/// so contending notifications queue in arrival order rather than being
/// dropped or coalesced. State transitions are clone-compute-commit: the
/// committed [`WindowState`] is only replaced after a whole load batch has
/// been applied, so readers never observe a torn window.
///
/// # Example
///
/// ```rust,ignore
/// let recycler = RecyclerView::mount(adapter, host, RecyclerConfig::new(48.0));
/// scroll_events.for_each(|offset| recycler.on_scroll(offset));
/// ```
pub struct RecyclerView<A, H>
where
    A: RowAdapter,
    H: ListHost<Slot = A::Slot>,
{
    inner: Mutex<Inner<A, H>>,
}

struct Inner<A, H>
where
    A: RowAdapter,
    H: ListHost<Slot = A::Slot>,
{
    adapter: A,
    host: H,
    pool: RowPool<A::Slot>,
    config: RecyclerConfig,
    /// Rows needed to cover the viewport; fixed at mount.
    visible_items_count: usize,
    /// Pool size: `visible_items_count + reserve_count`; fixed at mount.
    view_items_count: usize,
    current: WindowState,
    previous_offset: f32,
}

impl<A, H> RecyclerView<A, H>
where
    A: RowAdapter,
    H: ListHost<Slot = A::Slot>,
{
    /// Fills the viewport top-down, stages the reserve slots after the
    /// last visible row, and sizes the scrollable content area.
    ///
    /// One slot is created and bound per visible row; each emitted fill
    /// state is committed in turn. The reserve slots are created and
    /// positioned but left unbound - their content is populated when
    /// scrolling exposes them.
    pub fn mount(mut adapter: A, mut host: H, config: RecyclerConfig) -> Self {
        let item_height = config.item_height;
        let window = WindowConfig {
            item_height,
            viewport_height: host.viewport_height(),
            reserve_count: config.reserve_count,
        };

        let steps = initial_fill(&window, adapter.count());
        let visible_items_count = steps.len();
        let view_items_count = visible_items_count + config.reserve_count;
        let mut pool = RowPool::with_capacity(view_items_count);
        let mut current = WindowState::default();

        if visible_items_count == 0 {
            log::warn!(
                "mounting over an empty window (viewport {}, {} data items); \
                 scrolling will be a no-op",
                window.viewport_height,
                adapter.count()
            );
            host.set_content_height(0.0);
        } else {
            for state in steps {
                let data_index = state.last_visible_data_index;
                let slot = pool.bind(&mut adapter, data_index, state.last_visible_view_item, true);
                host.set_slot_height(slot, item_height);
                host.set_slot_offset(slot, data_index as f32 * item_height);
                host.attach_slot(slot);
                current = state;
            }

            for stage in 0..config.reserve_count {
                let slot_index = pool.create(&mut adapter);
                if let Some(slot) = pool.get_mut(slot_index) {
                    host.set_slot_height(slot, item_height);
                    host.set_slot_offset(slot, (visible_items_count + stage) as f32 * item_height);
                    host.attach_slot(slot);
                }
            }
            current.forward_reserve += config.reserve_count;
            current.last_view_item_index += config.reserve_count;
            host.set_content_height(view_items_count as f32 * item_height);
        }

        log::debug!(
            "mounted recycler: {} visible + {} reserve slots over {} data items",
            visible_items_count,
            config.reserve_count,
            adapter.count()
        );

        Self {
            inner: Mutex::new(Inner {
                adapter,
                host,
                pool,
                previous_offset: config.initial_offset,
                config,
                visible_items_count,
                view_items_count,
                current,
            }),
        }
    }

    /// Handles one scroll-position notification.
    ///
    /// Blocks until the gate is free; notifications queue in arrival order
    /// and every observed position is eventually processed. Once a batch
    /// begins applying it runs to completion before the gate releases.
    pub fn on_scroll(&self, offset: f32) {
        self.lock().handle_scroll(offset);
    }

    /// The committed window snapshot.
    pub fn window(&self) -> WindowState {
        self.lock().current.clone()
    }

    /// Rows needed to cover the viewport.
    pub fn visible_items_count(&self) -> usize {
        self.lock().visible_items_count
    }

    /// Total pool size (visible rows plus reserve).
    pub fn view_items_count(&self) -> usize {
        self.lock().view_items_count
    }

    /// Number of slots created so far; never exceeds
    /// [`view_items_count`](Self::view_items_count).
    pub fn pool_len(&self) -> usize {
        self.lock().pool.len()
    }

    /// The scroll offset recorded by the last processed notification.
    pub fn last_offset(&self) -> f32 {
        self.lock().previous_offset
    }

    /// Runs `reader` against the slot at `pool_index`, serialized behind
    /// the same gate as scroll handling.
    pub fn with_slot<R>(&self, pool_index: usize, reader: impl FnOnce(&A::Slot) -> R) -> Option<R> {
        self.lock().pool.get(pool_index).map(reader)
    }

    /// Runs `reader` against the host, serialized behind the same gate as
    /// scroll handling.
    pub fn with_host<R>(&self, reader: impl FnOnce(&H) -> R) -> R {
        reader(&self.lock().host)
    }

    fn lock(&self) -> MutexGuard<'_, Inner<A, H>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            // The committed state is only replaced after a batch fully
            // applies, so the snapshot behind a poisoned gate is still the
            // last consistent one.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<A, H> Inner<A, H>
where
    A: RowAdapter,
    H: ListHost<Slot = A::Slot>,
{
    fn window_config(&self) -> WindowConfig {
        WindowConfig {
            item_height: self.config.item_height,
            viewport_height: self.host.viewport_height(),
            reserve_count: self.config.reserve_count,
        }
    }

    fn handle_scroll(&mut self, offset: f32) {
        if self.visible_items_count == 0 {
            return;
        }

        let direction = ScrollDirection::from_offsets(offset, self.previous_offset);
        let window = self.window_config();
        let data_count = self.adapter.count();
        let load = plan_step(&self.current, offset, direction, &window, data_count);

        if load > 0 {
            let mut next = self.current.clone();
            for _ in 0..load {
                // End-of-data sentinel: halt the batch and keep the
                // successful prefix.
                let exhausted = match direction {
                    ScrollDirection::Forward => next.last_visible_data_index + 1 >= data_count,
                    ScrollDirection::Backward => next.first_visible_data_index == 0,
                };
                if exhausted {
                    break;
                }

                let stepped =
                    advance_window(&next, direction, &window, self.view_items_count, data_count);
                if stepped.move_one_view {
                    self.relocate(&next, &stepped, direction);
                }

                let (data_index, slot_index) = match direction {
                    ScrollDirection::Forward => (
                        stepped.last_visible_data_index,
                        stepped.last_visible_view_item,
                    ),
                    ScrollDirection::Backward => (
                        stepped.first_visible_data_index,
                        stepped.first_visible_view_item,
                    ),
                };
                self.pool.bind(&mut self.adapter, data_index, slot_index, false);

                next = stepped;
            }
            // Promote the whole batch at once.
            self.current = next;
        }

        self.previous_offset = offset;
    }

    /// Moves the outgoing slot to the opposite end of the content area and
    /// tracks the content extent.
    fn relocate(&mut self, pre: &WindowState, stepped: &WindowState, direction: ScrollDirection) {
        let item_height = self.config.item_height;
        let span = self.view_items_count as f32 * item_height;
        let outgoing = match direction {
            ScrollDirection::Forward => pre.first_view_item_index,
            ScrollDirection::Backward => pre.last_view_item_index,
        };

        if let Some(slot) = self.pool.get_mut(outgoing) {
            let offset = self.host.slot_offset(slot);
            let relocated = match direction {
                ScrollDirection::Forward => offset + span,
                ScrollDirection::Backward => offset - span,
            };
            log::trace!("relocating slot {outgoing}: {offset} -> {relocated}");
            self.host.set_slot_offset(slot, relocated);
        }

        // The content area tracks the new tail with one extra row of
        // runway so the next forward step can still be triggered.
        self.host
            .set_content_height((stepped.last_visible_data_index + 2) as f32 * item_height);
    }
}
