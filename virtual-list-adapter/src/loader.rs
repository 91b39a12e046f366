use virtual_list::WindowRange;

/// Which end of the collection the window approached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// Near index 0 (e.g. older chat messages).
    Start,
    /// Near the last index (e.g. the next page of a feed).
    End,
}

/// Signals when the rendered window comes within `threshold` items of a collection edge, so
/// the adapter can fetch the next page.
///
/// Each edge fires once per approach. It re-arms when the window moves back out of the
/// threshold or when the item count changes (a page arrived).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeTrigger {
    threshold: usize,
    watch_start: bool,
    watch_end: bool,
    armed_start: bool,
    armed_end: bool,
    last_count: Option<usize>,
}

impl EdgeTrigger {
    fn with_edges(threshold: usize, watch_start: bool, watch_end: bool) -> Self {
        Self {
            threshold,
            watch_start,
            watch_end,
            armed_start: true,
            armed_end: true,
            last_count: None,
        }
    }

    /// Watches the end of the collection only (infinite feeds).
    pub fn end(threshold: usize) -> Self {
        Self::with_edges(threshold, false, true)
    }

    /// Watches the start of the collection only (chat history).
    pub fn start(threshold: usize) -> Self {
        Self::with_edges(threshold, true, false)
    }

    pub fn both(threshold: usize) -> Self {
        Self::with_edges(threshold, true, true)
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Re-arms both edges.
    pub fn reset(&mut self) {
        self.armed_start = true;
        self.armed_end = true;
    }

    /// Feeds the current window. Returns the edge to load from, if any.
    ///
    /// When both edges are reached at once (a short list), `End` is reported first and `Start`
    /// on the next call.
    pub fn check(&mut self, range: WindowRange, count: usize) -> Option<Edge> {
        if self.last_count != Some(count) {
            self.last_count = Some(count);
            self.reset();
        }
        if count == 0 || range.is_empty() {
            return None;
        }

        let near_start = range.start <= self.threshold;
        let near_end = range.end.saturating_add(self.threshold) >= count;

        if !near_start {
            self.armed_start = true;
        }
        if !near_end {
            self.armed_end = true;
        }

        if self.watch_end && near_end && self.armed_end {
            self.armed_end = false;
            atrace!(end = range.end, count, "EdgeTrigger: end reached");
            return Some(Edge::End);
        }
        if self.watch_start && near_start && self.armed_start {
            self.armed_start = false;
            atrace!(start = range.start, count, "EdgeTrigger: start reached");
            return Some(Edge::Start);
        }
        None
    }
}
