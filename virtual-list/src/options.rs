use alloc::sync::Arc;

use crate::OptionsError;
use crate::list::VirtualList;

/// Overscan applied when none is configured.
pub const DEFAULT_OVERSCAN: usize = 5;

/// A callback fired after the list's window inputs change.
pub type OnChangeCallback = Arc<dyn Fn(&VirtualList) + Send + Sync>;

/// Configuration for [`crate::VirtualList`].
///
/// All heights are in pixels (or terminal rows; the engine does not care which unit, as long
/// as it is uniform). Every item shares `item_height`.
pub struct WindowOptions {
    pub count: usize,
    pub item_height: u32,
    pub container_height: u32,

    /// Extra items rendered past each visible edge.
    pub overscan: usize,

    /// Optional callback fired after an effective state change.
    ///
    /// Inside [`crate::VirtualList::batch_update`] notifications are coalesced into one.
    pub on_change: Option<OnChangeCallback>,
}

impl Clone for WindowOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            item_height: self.item_height,
            container_height: self.container_height,
            overscan: self.overscan,
            on_change: self.on_change.clone(),
        }
    }
}

impl WindowOptions {
    pub fn new(count: usize, item_height: u32, container_height: u32) -> Self {
        Self {
            count,
            item_height,
            container_height,
            overscan: DEFAULT_OVERSCAN,
            on_change: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_container_height(mut self, container_height: u32) -> Self {
        self.container_height = container_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&VirtualList) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    /// Checks the caller contract. The engine itself never calls this.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.item_height == 0 {
            return Err(OptionsError::ZeroItemHeight);
        }
        if self.container_height == 0 {
            return Err(OptionsError::ZeroContainerHeight);
        }
        Ok(())
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::new(0, 1, 0)
    }
}

impl core::fmt::Debug for WindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("count", &self.count)
            .field("item_height", &self.item_height)
            .field("container_height", &self.container_height)
            .field("overscan", &self.overscan)
            .finish_non_exhaustive()
    }
}
