//! A headless windowed list engine for uniform-height rows.
//!
//! Long scrollable collections (chat histories, consultant grids, story feeds) only need the
//! rows near the viewport materialized. This crate computes which rows those are and where
//! they sit inside a full-height spacer, so a UI layer can keep native scrollbar proportions
//! while rendering a bounded number of rows:
//!
//! - [`compute_range`]: `(scroll offset, container height, item height, count, overscan)` →
//!   contiguous, clamped index window
//! - [`render_window`]: slice + absolute-index render callback + spacer geometry
//! - [`VirtualList`]: stateful wrapper that memoizes the window and notifies on change
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - container height
//! - scroll offset
//! - the item height shared by every row
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

#[doc(hidden)]
#[cfg(feature = "tracing")]
pub use tracing as __tracing;

mod error;
mod list;
mod options;
mod range;
mod render;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::OptionsError;
pub use list::VirtualList;
pub use options::{DEFAULT_OVERSCAN, OnChangeCallback, WindowOptions};
pub use range::{
    RangeMemo, compute_range, compute_visible_range, index_at_offset, item_top, total_height,
};
pub use render::{RenderedWindow, for_each_window_item, render_window};
pub use state::{FrameState, ScrollState};
pub use types::{Align, RangeInputs, ScrollDirection, WindowItem, WindowRange};
