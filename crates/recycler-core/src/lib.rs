//! Core windowing state machine for fixed-height row recycling.
//!
//! This crate decides, for every scroll delta over a long list of
//! fixed-height rows, how many data items enter the visible range, which
//! pool slot each newly exposed item binds to, and whether a slot has to be
//! physically relocated or merely rebound in place. It knows nothing about
//! views, containers, or how scroll events are produced; hosts drive it
//! through `recycler-view` or their own orchestration.
//!
//! The pieces:
//!
//! - [`SlotRing`] - wraparound index arithmetic over the slot pool.
//! - [`WindowState`] - an immutable-per-step snapshot of the visible window
//!   and its reserve bookkeeping.
//! - [`initial_fill`], [`plan_step`], [`advance_window`], [`step`] - pure
//!   transitions that fill the viewport top-down and walk the window one
//!   item at a time in either direction.
//!
//! All transitions are value-to-value: callers clone the committed state,
//! fold transitions over the clone, and promote the result once the whole
//! batch has been applied.

mod slot_ring;
mod state;
mod window;

pub use slot_ring::SlotRing;
pub use state::{ScrollDirection, WindowState};
pub use window::{
    advance_window, initial_fill, plan_step, step, WindowConfig, InitialStates, PARTIAL_EPSILON,
    RESERVE_COUNT,
};
