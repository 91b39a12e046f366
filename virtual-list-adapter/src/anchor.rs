use core::fmt;

use virtual_list::VirtualList;

/// A scroll anchor that preserves visual position across data changes.
///
/// Typical use: a chat history loads older messages above the current view. Capture an anchor
/// before the prepend, update the list's count, then apply the anchor so the same message
/// stays at the same place on screen.
#[derive(Clone, PartialEq, Eq)]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// The distance from the anchor item's top to the scroll offset.
    pub offset_in_item: u64,
}

impl<K: fmt::Debug> fmt::Debug for ScrollAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("key", &self.key)
            .field("offset_in_item", &self.offset_in_item)
            .finish()
    }
}

/// Captures an anchor for the first visible item.
///
/// `key_for` maps an index of the *current* dataset to a stable identity (e.g. a message id).
/// Returns `None` if nothing is visible.
pub fn capture_first_visible_anchor<K>(
    list: &VirtualList,
    key_for: impl FnOnce(usize) -> K,
) -> Option<ScrollAnchor<K>> {
    let visible = list.visible_range();
    if visible.is_empty() {
        return None;
    }
    let index = visible.start;
    let top = list.item_top(index)?;
    Some(ScrollAnchor {
        key: key_for(index),
        offset_in_item: list.scroll_offset().saturating_sub(top),
    })
}

/// Applies a previously captured anchor by adjusting the scroll offset.
///
/// `key_to_index` must reflect the dataset *after* the change. Returns `true` when the anchor
/// item still exists and the offset was applied.
pub fn apply_anchor<K>(
    list: &mut VirtualList,
    anchor: &ScrollAnchor<K>,
    key_to_index: impl FnOnce(&K) -> Option<usize>,
) -> bool {
    let Some(index) = key_to_index(&anchor.key) else {
        adebug!("apply_anchor: anchor item no longer present");
        return false;
    };
    let Some(top) = list.item_top(index) else {
        return false;
    };
    list.set_scroll_offset_clamped(top.saturating_add(anchor.offset_in_item));
    true
}
