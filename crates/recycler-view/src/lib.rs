//! Row pool, collaborator traits, and scroll orchestration for fixed-height
//! row recycling.
//!
//! [`RecyclerView`] drives the windowing state machine from `recycler-core`
//! against two caller-supplied collaborators: a [`RowAdapter`] that owns the
//! data and knows how to create and populate row slots, and a [`ListHost`]
//! that owns the scrollable container and applies slot geometry. The pool
//! of slots never grows past `visible + reserve`, so steady-state scrolling
//! performs no allocation at all - only rebinding and repositioning.

mod adapter;
mod host;
mod recycler;


pub use adapter::{RowAdapter, RowPool};
pub use host::ListHost;
pub use recycler::{RecyclerConfig, RecyclerView};
