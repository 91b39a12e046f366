use core::cell::Cell;

use crate::{RangeInputs, WindowRange};

/// Computes the window of indexes to materialize for a uniform-height list.
///
/// `start = floor(offset / h) - overscan` and `last = ceil((offset + container) / h) + overscan`,
/// both clamped to `[0, count - 1]`. The result always satisfies `start <= last`, including
/// when `scroll_offset` runs past the end of the list.
///
/// An empty collection yields [`WindowRange::EMPTY`]. So do a zero `item_height` or a zero
/// `container_height`, which are caller contract violations (see
/// [`crate::WindowOptions::validate`]).
pub fn compute_range(inputs: RangeInputs) -> WindowRange {
    let RangeInputs {
        scroll_offset,
        container_height,
        item_height,
        count,
        overscan,
    } = inputs;

    if count == 0 || item_height == 0 || container_height == 0 {
        return WindowRange::EMPTY;
    }

    let h = item_height as u64;
    let last_index = count - 1;

    let first_visible = to_index(scroll_offset / h);
    let past_visible = to_index(
        scroll_offset
            .saturating_add(container_height as u64)
            .div_ceil(h),
    );

    let start = first_visible.saturating_sub(overscan).min(last_index);
    let last = past_visible.saturating_add(overscan).min(last_index);
    debug_assert!(start <= last, "window start past its end (start={start}, last={last})");

    WindowRange {
        start,
        end: last + 1,
    }
}

/// The rows intersecting `[scroll_offset, scroll_offset + container_height)`, without overscan.
///
/// Unlike [`compute_range`] with zero overscan, a row that starts exactly at the bottom edge is
/// not included.
pub fn compute_visible_range(inputs: RangeInputs) -> WindowRange {
    let RangeInputs {
        scroll_offset,
        container_height,
        item_height,
        count,
        ..
    } = inputs;

    if count == 0 || item_height == 0 || container_height == 0 {
        return WindowRange::EMPTY;
    }

    let h = item_height as u64;
    let last_index = count - 1;
    let bottom = scroll_offset.saturating_add(container_height as u64 - 1);
    let start = to_index(scroll_offset / h).min(last_index);
    let last = to_index(bottom / h).min(last_index);
    WindowRange {
        start,
        end: last + 1,
    }
}

/// Height of the full spacer: `count * item_height`, independent of the window.
pub fn total_height(count: usize, item_height: u32) -> u64 {
    (count as u64).saturating_mul(item_height as u64)
}

/// Top offset of `index` inside the full-height spacer.
pub fn item_top(index: usize, item_height: u32) -> u64 {
    (index as u64).saturating_mul(item_height as u64)
}

/// The index of the item covering `offset`, clamped to the last item.
pub fn index_at_offset(offset: u64, count: usize, item_height: u32) -> Option<usize> {
    if count == 0 || item_height == 0 {
        return None;
    }
    Some(to_index(offset / item_height as u64).min(count - 1))
}

fn to_index(v: u64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}

/// Caches the last computed range keyed on its five inputs.
///
/// Lets repeated renders with unchanged inputs skip recomputation. Results are identical to
/// calling [`compute_range`] directly.
#[derive(Clone, Debug, Default)]
pub struct RangeMemo {
    last: Cell<Option<(RangeInputs, WindowRange)>>,
}

impl RangeMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, inputs: RangeInputs) -> WindowRange {
        if let Some((cached_inputs, range)) = self.last.get() {
            if cached_inputs == inputs {
                return range;
            }
        }
        let range = compute_range(inputs);
        ltrace!(
            scroll_offset = inputs.scroll_offset,
            start = range.start,
            end = range.end,
            "RangeMemo: recomputed"
        );
        self.last.set(Some((inputs, range)));
        range
    }

    /// Returns `true` when `inputs` would be served from the cache.
    pub fn is_cached(&self, inputs: RangeInputs) -> bool {
        matches!(self.last.get(), Some((cached, _)) if cached == inputs)
    }

    pub fn invalidate(&self) {
        self.last.set(None);
    }
}
