//! Headless scroll simulation.
//!
//! Mounts the recycler over a 1000-row data source, sweeps the scroll
//! offset to the bottom and back in uneven steps, and verifies after every
//! notification that the slot pool stayed fixed and the window kept
//! tracking the offset. Run with:
//!
//! ```bash
//! RUST_LOG=debug cargo run --package scroll-sim
//! ```

use recycler_view::{ListHost, RecyclerConfig, RecyclerView, RowAdapter};

const ROW_HEIGHT: f32 = 48.0;
const VIEWPORT_HEIGHT: f32 = 600.0;
const ROW_COUNT: usize = 1000;

#[derive(Debug, Default)]
struct SimRow {
    label: String,
    offset: f32,
    height: f32,
    attached: bool,
}

struct SimAdapter {
    labels: Vec<String>,
}

impl SimAdapter {
    fn new(count: usize) -> Self {
        Self {
            labels: (0..count).map(|i| format!("contact #{i}")).collect(),
        }
    }
}

impl RowAdapter for SimAdapter {
    type Slot = SimRow;

    fn count(&self) -> usize {
        self.labels.len()
    }

    fn on_create_slot(&mut self) -> SimRow {
        SimRow::default()
    }

    fn on_bind_slot(&mut self, slot: &mut SimRow, data_index: usize) {
        slot.label.clear();
        slot.label.push_str(&self.labels[data_index]);
    }
}

struct SimHost {
    viewport: f32,
    content_height: f32,
}

impl ListHost for SimHost {
    type Slot = SimRow;

    fn viewport_height(&self) -> f32 {
        self.viewport
    }

    fn set_slot_height(&mut self, slot: &mut SimRow, height: f32) {
        slot.height = height;
    }

    fn set_slot_offset(&mut self, slot: &mut SimRow, offset: f32) {
        slot.offset = offset;
    }

    fn slot_offset(&self, slot: &SimRow) -> f32 {
        slot.offset
    }

    fn attach_slot(&mut self, slot: &mut SimRow) {
        slot.attached = true;
    }

    fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
    }
}

fn check(view: &RecyclerView<SimAdapter, SimHost>) {
    let window = view.window();
    let pool = view.view_items_count();
    assert_eq!(view.pool_len(), pool, "pool must stay at its mounted size");
    assert!(window.first_visible_data_index <= window.last_visible_data_index);
    assert!(window.last_visible_data_index < ROW_COUNT);
    assert!(window.first_view_item_index < pool);
    assert!(window.last_view_item_index < pool);

    // Every visible row sits at its data position in the content area.
    for data_index in window.first_visible_data_index..=window.last_visible_data_index {
        let slot_index = data_index % pool;
        let ok = view
            .with_slot(slot_index, |slot| {
                slot.attached
                    && slot.height == ROW_HEIGHT
                    && slot.offset == data_index as f32 * ROW_HEIGHT
                    && slot.label == format!("contact #{data_index}")
            })
            .unwrap_or(false);
        assert!(ok, "slot {slot_index} out of sync with row {data_index}");
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Recycler scroll simulation ===");
    println!(
        "{ROW_COUNT} rows of {ROW_HEIGHT}px in a {VIEWPORT_HEIGHT}px viewport"
    );

    let view = RecyclerView::mount(
        SimAdapter::new(ROW_COUNT),
        SimHost {
            viewport: VIEWPORT_HEIGHT,
            content_height: 0.0,
        },
        RecyclerConfig::new(ROW_HEIGHT),
    );

    println!(
        "mounted: {} visible rows, pool of {} slots",
        view.visible_items_count(),
        view.view_items_count()
    );
    check(&view);

    let max_offset = (ROW_COUNT as f32 * ROW_HEIGHT - VIEWPORT_HEIGHT).floor();
    let mut notifications = 0usize;

    // Uneven forward sweep to the bottom.
    let mut offset = 0.0;
    while offset < max_offset {
        view.on_scroll(offset);
        check(&view);
        notifications += 1;
        offset += 157.0;
    }
    view.on_scroll(max_offset);
    check(&view);
    let bottom = view.window();
    log::info!(
        "reached the bottom: rows {}..={} visible",
        bottom.first_visible_data_index,
        bottom.last_visible_data_index
    );
    assert_eq!(bottom.last_visible_data_index, ROW_COUNT - 1);

    // And back up to the top.
    while offset > 0.0 {
        view.on_scroll(offset);
        check(&view);
        notifications += 1;
        offset -= 157.0;
    }
    view.on_scroll(1.0);
    check(&view);
    assert_eq!(view.window().first_visible_data_index, 0);

    println!(
        "round trip complete: {notifications} scroll notifications, pool still {} slots",
        view.pool_len()
    );
    println!("all layout and binding checks passed");
}
