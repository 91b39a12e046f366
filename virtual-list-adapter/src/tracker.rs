use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use crate::{EventSource, ListenerGuard, listen};

/// A scroll notification from a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEvent {
    pub offset: u64,
}

/// Mirrors the scroll offset of one container.
///
/// Mounting attaches exactly one listener to the container; the listener is detached when the
/// tracker is dropped. Every event updates the offset (no throttling). Without a container the
/// tracker attaches nothing and reports offset 0.
pub struct ViewportTracker<'a, S: EventSource<ScrollEvent> + ?Sized> {
    offset: Rc<Cell<u64>>,
    changed: Rc<Cell<bool>>,
    guard: Option<ListenerGuard<'a, ScrollEvent, S>>,
}

impl<'a, S: EventSource<ScrollEvent> + ?Sized> ViewportTracker<'a, S> {
    pub fn mount(container: Option<&'a S>) -> Self {
        Self::mount_with(container, |_| false)
    }

    /// Mounts with a hook that runs synchronously for every scroll event.
    ///
    /// `on_scroll` returns `true` once it has applied the offset. Returning `false` leaves the
    /// offset pending for [`Self::take_changed`].
    pub fn mount_with(
        container: Option<&'a S>,
        mut on_scroll: impl FnMut(u64) -> bool + 'static,
    ) -> Self {
        let offset = Rc::new(Cell::new(0));
        let changed = Rc::new(Cell::new(false));
        let guard = container.map(|source| {
            let offset = Rc::clone(&offset);
            let changed = Rc::clone(&changed);
            listen(source, move |ev: &ScrollEvent| {
                offset.set(ev.offset);
                changed.set(!on_scroll(ev.offset));
            })
        });
        if guard.is_none() {
            adebug!("ViewportTracker::mount without a container");
        }
        Self {
            offset,
            changed,
            guard,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.guard.is_some()
    }

    pub fn offset(&self) -> u64 {
        self.offset.get()
    }

    /// Returns the offset if a scroll event arrived since the last call.
    pub fn take_changed(&self) -> Option<u64> {
        self.changed.replace(false).then(|| self.offset.get())
    }

    /// Tears the tracker down now. Equivalent to dropping it.
    pub fn unmount(self) {}
}

impl<S: EventSource<ScrollEvent> + ?Sized> fmt::Debug for ViewportTracker<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportTracker")
            .field("offset", &self.offset.get())
            .field("attached", &self.is_attached())
            .finish()
    }
}
