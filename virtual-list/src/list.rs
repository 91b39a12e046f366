use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;

use crate::range::{self, RangeMemo};
use crate::render::{self, RenderedWindow};
use crate::{
    Align, FrameState, RangeInputs, ScrollDirection, ScrollState, WindowItem, WindowOptions,
    WindowRange,
};

/// A headless windowed list over uniform-height items.
///
/// This type holds no UI objects and no items. Your adapter drives it by reporting the
/// container height and scroll offset; the window is recomputed synchronously from those
/// inputs whenever it is queried, with the last result memoized.
///
/// For event-source wiring (scroll listeners, scoped teardown), see the
/// `virtual-list-adapter` crate.
#[derive(Clone, Debug)]
pub struct VirtualList {
    options: WindowOptions,
    scroll_offset: u64,
    scroll_direction: Option<ScrollDirection>,
    memo: RangeMemo,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl VirtualList {
    pub fn new(options: WindowOptions) -> Self {
        ldebug!(
            count = options.count,
            item_height = options.item_height,
            container_height = options.container_height,
            overscan = options.overscan,
            "VirtualList::new"
        );
        Self {
            options,
            scroll_offset: 0,
            scroll_direction: None,
            memo: RangeMemo::new(),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// Replaces the options. The scroll offset is kept.
    pub fn set_options(&mut self, options: WindowOptions) {
        self.options = options;
        ltrace!(
            count = self.options.count,
            item_height = self.options.item_height,
            container_height = self.options.container_height,
            overscan = self.options.overscan,
            "VirtualList::set_options"
        );
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut WindowOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&VirtualList) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// A scroll event that also resizes the container should go through here so the callback
    /// (which usually re-renders) runs once.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn item_height(&self) -> u32 {
        self.options.item_height
    }

    pub fn container_height(&self) -> u32 {
        self.options.container_height
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.notify();
    }

    pub fn set_item_height(&mut self, item_height: u32) {
        if self.options.item_height == item_height {
            return;
        }
        debug_assert!(item_height > 0, "item height must be positive");
        self.options.item_height = item_height;
        self.notify();
    }

    pub fn set_container_height(&mut self, container_height: u32) {
        if self.options.container_height == container_height {
            return;
        }
        self.options.container_height = container_height;
        self.notify();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        self.scroll_direction = match offset.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.notify();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies container height and scroll offset in a single coalesced update.
    pub fn set_container_and_scroll(&mut self, container_height: u32, scroll_offset: u64) {
        self.batch_update(|l| {
            l.set_container_height(container_height);
            l.set_scroll_offset(scroll_offset);
        });
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            container_height: self.options.container_height,
            scroll: self.scroll_state(),
        }
    }

    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.set_container_and_scroll(frame.container_height, frame.scroll.offset);
    }

    pub fn inputs(&self) -> RangeInputs {
        self.inputs_for(self.scroll_offset)
    }

    fn inputs_for(&self, scroll_offset: u64) -> RangeInputs {
        RangeInputs {
            scroll_offset,
            container_height: self.options.container_height,
            item_height: self.options.item_height,
            count: self.options.count,
            overscan: self.options.overscan,
        }
    }

    /// The current window, overscan included.
    pub fn range(&self) -> WindowRange {
        self.memo.get(self.inputs())
    }

    /// The window a given scroll offset would produce. Does not touch the memo.
    pub fn range_for(&self, scroll_offset: u64) -> WindowRange {
        range::compute_range(self.inputs_for(scroll_offset))
    }

    /// The items actually intersecting the viewport, without overscan.
    pub fn visible_range(&self) -> WindowRange {
        range::compute_visible_range(self.inputs())
    }

    pub fn total_height(&self) -> u64 {
        range::total_height(self.options.count, self.options.item_height)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.options.container_height as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        range::index_at_offset(offset, self.options.count, self.options.item_height)
    }

    pub fn item_top(&self, index: usize) -> Option<u64> {
        (index < self.options.count).then(|| range::item_top(index, self.options.item_height))
    }

    pub fn item(&self, index: usize) -> Option<WindowItem> {
        let top = self.item_top(index)?;
        Some(WindowItem {
            index,
            top,
            height: self.options.item_height,
        })
    }

    /// Computes the clamped offset that brings `index` into view with the given alignment.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        if self.options.count == 0 {
            return 0;
        }
        let index = index.min(self.options.count - 1);
        let top = range::item_top(index, self.options.item_height);
        let bottom = top.saturating_add(self.options.item_height as u64);
        let view = self.options.container_height as u64;

        let target = match align {
            Align::Start => top,
            Align::End => bottom.saturating_sub(view),
            Align::Center => {
                let center = top.saturating_add(self.options.item_height as u64 / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.scroll_offset;
                let cur_end = cur.saturating_add(view);
                if top >= cur && bottom <= cur_end {
                    cur
                } else if top < cur {
                    top
                } else {
                    bottom.saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target)
    }

    /// Scrolls to an index (no animation). Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    pub fn for_each_window_item(&self, f: impl FnMut(WindowItem)) {
        render::for_each_window_item(
            self.range(),
            self.options.count,
            self.options.item_height,
            f,
        );
    }

    /// Collects the window rows into `out` (clears `out` first).
    ///
    /// Prefer [`Self::for_each_window_item`] with a reused buffer on hot paths.
    pub fn collect_window_items(&self, out: &mut Vec<WindowItem>) {
        out.clear();
        self.for_each_window_item(|it| out.push(it));
    }

    /// Renders the current window over `items`.
    ///
    /// The window is computed against `items.len()`, which may run ahead of the configured
    /// `count` (a message appended before `set_count`).
    pub fn render<T, R>(
        &self,
        items: &[T],
        render_item: impl FnMut(&T, usize) -> R,
    ) -> RenderedWindow<R> {
        if items.len() != self.options.count {
            ltrace!(
                items = items.len(),
                count = self.options.count,
                "VirtualList::render: collection length differs from count"
            );
        }
        let inputs = RangeInputs {
            count: items.len(),
            ..self.inputs()
        };
        let range = self.memo.get(inputs);
        render::render_window(items, range, self.options.item_height, render_item)
    }
}
