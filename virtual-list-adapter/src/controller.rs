use alloc::rc::Rc;
use core::cell::{Ref, RefCell, RefMut};

use virtual_list::{Align, FrameState, RenderedWindow, VirtualList, WindowOptions};

use crate::{
    Edge, EdgeTrigger, EventSource, ScrollAnchor, ScrollEvent, ViewportTracker, apply_anchor,
    capture_first_visible_anchor,
};

/// A framework-neutral controller that wires a scroll container to a [`VirtualList`].
///
/// This type does not hold any UI objects. Adapters drive it by:
/// - letting the container emit [`ScrollEvent`]s
/// - calling `on_resize` when the container height changes
/// - calling `render` each frame
///
/// A scroll event updates the list's offset as it arrives, so the window and the `on_change`
/// callback see it immediately. An event emitted while the list is borrowed (from inside a
/// render callback, say) stays pending until the next `sync`.
///
/// Dropping the controller detaches its scroll listener.
#[derive(Debug)]
pub struct Controller<'a, S: EventSource<ScrollEvent> + ?Sized> {
    list: Rc<RefCell<VirtualList>>,
    tracker: ViewportTracker<'a, S>,
    loader: Option<EdgeTrigger>,
}

impl<'a, S: EventSource<ScrollEvent> + ?Sized> Controller<'a, S> {
    pub fn mount(options: WindowOptions, container: Option<&'a S>) -> Self {
        let list = Rc::new(RefCell::new(VirtualList::new(options)));
        let tracker = ViewportTracker::mount_with(container, {
            let list = Rc::clone(&list);
            move |offset| match list.try_borrow_mut() {
                Ok(mut l) => {
                    l.set_scroll_offset(offset);
                    true
                }
                Err(_) => {
                    atrace!(offset, "Controller: list busy, scroll event deferred");
                    false
                }
            }
        });
        Self {
            list,
            tracker,
            loader: None,
        }
    }

    pub fn with_edge_trigger(mut self, trigger: EdgeTrigger) -> Self {
        self.loader = Some(trigger);
        self
    }

    pub fn list(&self) -> Ref<'_, VirtualList> {
        self.list.borrow()
    }

    pub fn list_mut(&mut self) -> RefMut<'_, VirtualList> {
        self.list.borrow_mut()
    }

    pub fn tracker(&self) -> &ViewportTracker<'a, S> {
        &self.tracker
    }

    /// Applies a scroll offset that could not be delivered when its event arrived.
    ///
    /// Returns `true` if one was pending.
    pub fn sync(&mut self) -> bool {
        match self.tracker.take_changed() {
            Some(offset) => {
                atrace!(offset, "Controller::sync");
                self.list.borrow_mut().set_scroll_offset(offset);
                true
            }
            None => false,
        }
    }

    /// Applies a scroll offset reported outside the tracked event source (e.g. a programmatic
    /// scroll the adapter performed itself).
    pub fn on_scroll(&mut self, offset: u64) {
        self.sync();
        self.list.borrow_mut().set_scroll_offset(offset);
    }

    pub fn on_resize(&mut self, container_height: u32) {
        self.list.borrow_mut().set_container_height(container_height);
    }

    /// Updates the item count after a page load or a new message.
    pub fn on_count_changed(&mut self, count: usize) {
        self.list.borrow_mut().set_count(count);
    }

    /// Computes and applies a scroll-to-index. Returns the offset the real container should be
    /// scrolled to.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        self.list.borrow_mut().scroll_to_index(index, align)
    }

    /// Syncs, then reports whether the window reached an edge that needs loading.
    pub fn poll_edge(&mut self) -> Option<Edge> {
        self.sync();
        let list = self.list.borrow();
        self.loader.as_mut()?.check(list.range(), list.count())
    }

    /// Renders the current window over `items`.
    ///
    /// The list's count follows `items.len()`, so a slice that grew before
    /// `on_count_changed` was called is rendered in full.
    pub fn render<T, R>(
        &mut self,
        items: &[T],
        render_item: impl FnMut(&T, usize) -> R,
    ) -> RenderedWindow<R> {
        self.sync();
        let mut list = self.list.borrow_mut();
        list.set_count(items.len());
        list.render(items, render_item)
    }

    pub fn capture_anchor<K>(
        &mut self,
        key_for: impl FnOnce(usize) -> K,
    ) -> Option<ScrollAnchor<K>> {
        self.sync();
        capture_first_visible_anchor(&self.list.borrow(), key_for)
    }

    /// Applies the new count and restores the anchor in one coalesced update.
    ///
    /// Returns the offset the real container should be scrolled to, or `None` if the anchor item
    /// is gone.
    pub fn prepend_with_anchor<K>(
        &mut self,
        anchor: &ScrollAnchor<K>,
        new_count: usize,
        key_to_index: impl FnOnce(&K) -> Option<usize>,
    ) -> Option<u64> {
        let mut list = self.list.borrow_mut();
        let mut applied = false;
        list.batch_update(|l| {
            l.set_count(new_count);
            applied = apply_anchor(l, anchor, key_to_index);
        });
        applied.then(|| list.scroll_offset())
    }

    /// Tears down the scroll listener and returns the last frame for an optional restore.
    pub fn unmount(mut self) -> FrameState {
        self.sync();
        self.list.borrow().frame_state()
    }
}
