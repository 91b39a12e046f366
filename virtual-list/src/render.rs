use alloc::vec::Vec;

use crate::range::{item_top, total_height};
use crate::{WindowItem, WindowRange};

/// The positioned output of one render pass.
///
/// A UI layer draws a spacer of `total_height`, offsets a container by `offset_top` inside it,
/// and places `items` in that container in order. The native scrollbar then reflects the full
/// collection even though only the window is materialized.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedWindow<R> {
    pub range: WindowRange,
    pub offset_top: u64,
    pub total_height: u64,
    pub items: Vec<R>,
}

impl<R> RenderedWindow<R> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Renders `items[range]`, calling `render_item(item, absolute_index)` for each entry.
///
/// The index passed to `render_item` is the position in `items`, not in the slice, so callers
/// can derive stable per-row identity from it. A range that runs past `items` is truncated.
pub fn render_window<T, R>(
    items: &[T],
    range: WindowRange,
    item_height: u32,
    mut render_item: impl FnMut(&T, usize) -> R,
) -> RenderedWindow<R> {
    let range = clamp_to(range, items.len());
    let mut out = Vec::with_capacity(range.len());
    for (offset, item) in items[range.as_range()].iter().enumerate() {
        out.push(render_item(item, range.start + offset));
    }
    RenderedWindow {
        range,
        offset_top: item_top(range.start, item_height),
        total_height: total_height(items.len(), item_height),
        items: out,
    }
}

/// Iterates the positioned rows of `range` without allocating.
pub fn for_each_window_item(
    range: WindowRange,
    count: usize,
    item_height: u32,
    mut f: impl FnMut(WindowItem),
) {
    let range = clamp_to(range, count);
    let mut top = item_top(range.start, item_height);
    for index in range.as_range() {
        f(WindowItem {
            index,
            top,
            height: item_height,
        });
        top = top.saturating_add(item_height as u64);
    }
}

fn clamp_to(range: WindowRange, count: usize) -> WindowRange {
    if range.end > count {
        lwarn!(
            end = range.end,
            count,
            "window range runs past the collection; truncating"
        );
    }
    let end = range.end.min(count);
    WindowRange {
        start: range.start.min(end),
        end,
    }
}
