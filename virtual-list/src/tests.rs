use crate::*;

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

fn inputs(
    count: usize,
    item_height: u32,
    container_height: u32,
    scroll_offset: u64,
    overscan: usize,
) -> RangeInputs {
    RangeInputs {
        scroll_offset,
        container_height,
        item_height,
        count,
        overscan,
    }
}

#[test]
fn window_at_top_includes_trailing_overscan() {
    let r = compute_range(inputs(100, 50, 300, 0, 5));
    assert_eq!(r.start, 0);
    assert_eq!(r.last(), Some(11));
    assert_eq!(r.len(), 12);
}

#[test]
fn window_after_scroll_overscans_both_edges() {
    let r = compute_range(inputs(100, 50, 300, 500, 5));
    // ceil((500 + 300) / 50) + 5
    assert_eq!(r.start, 5);
    assert_eq!(r.last(), Some(21));
}

#[test]
fn empty_collection_renders_nothing() {
    let r = compute_range(inputs(0, 50, 300, 0, 5));
    assert!(r.is_empty());
    assert_eq!(r.last(), None);
    assert_eq!(total_height(0, 50), 0);

    let items: [u32; 0] = [];
    let out = render_window(&items, r, 50, |it, _| *it);
    assert!(out.is_empty());
    assert_eq!(out.total_height, 0);
    assert_eq!(out.offset_top, 0);
}

#[test]
fn overscroll_clamps_to_last_item() {
    // total height is 5000; scroll well past it.
    let r = compute_range(inputs(100, 50, 300, 20_000, 5));
    assert_eq!(r.last(), Some(99));
    assert!(r.start <= 99);
    assert_eq!(r.end, 100);

    let items: Vec<usize> = (0..100).collect();
    let out = render_window(&items, r, 50, |it, i| {
        assert_eq!(*it, i);
        i
    });
    assert_eq!(out.items.last(), Some(&99));
}

#[test]
fn degenerate_heights_yield_empty_window() {
    assert!(compute_range(inputs(10, 0, 300, 0, 5)).is_empty());
    assert!(compute_range(inputs(10, 50, 0, 0, 5)).is_empty());
    assert_eq!(index_at_offset(10, 10, 0), None);
}

#[test]
fn range_invariants_hold_for_random_inputs() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..2_000 {
        let count = rng.gen_range_usize(1, 500);
        let item_height = rng.gen_range_u32(1, 120);
        let container_height = rng.gen_range_u32(1, 2_000);
        let overscan = rng.gen_range_usize(0, 12);
        let total = total_height(count, item_height);
        let scroll_offset = rng.gen_range_u64(0, total + 1_000);
        let inp = inputs(count, item_height, container_height, scroll_offset, overscan);

        let r = compute_range(inp);
        let last = r.last().expect("non-empty collection yields a window");
        assert!(r.start <= last);
        assert!(last <= count - 1);
        assert_eq!(r.len(), last - r.start + 1);

        // Unaligned offsets can straddle one extra row (see DESIGN.md).
        let per_view = (container_height as usize).div_ceil(item_height as usize);
        assert!(r.len() <= per_view + 2 * overscan + 2, "{inp:?} -> {r:?}");
        if scroll_offset % item_height as u64 == 0 {
            assert!(r.len() <= per_view + 2 * overscan + 1, "{inp:?} -> {r:?}");
        }

        assert_eq!(compute_range(inp), r);
        assert_eq!(total, count as u64 * item_height as u64);
    }
}

#[test]
fn window_covers_every_row_intersecting_the_viewport() {
    let mut rng = Lcg::new(42);
    for _ in 0..500 {
        let count = rng.gen_range_usize(1, 200);
        let item_height = rng.gen_range_u32(1, 60);
        let container_height = rng.gen_range_u32(1, 800);
        let total = total_height(count, item_height);
        let scroll_offset = rng.gen_range_u64(0, total.saturating_sub(container_height as u64) + 1);
        let r = compute_range(inputs(count, item_height, container_height, scroll_offset, 0));

        let view_end = scroll_offset + container_height as u64;
        for i in 0..count {
            let top = item_top(i, item_height);
            let bottom = top + item_height as u64;
            if bottom > scroll_offset && top < view_end {
                assert!(r.contains(i), "row {i} visible but outside {r:?}");
            }
        }
    }
}

#[test]
fn render_passes_absolute_indexes_and_spacer_geometry() {
    let items: Vec<String> = (0..100).map(|i| format!("msg-{i}")).collect();
    let r = compute_range(inputs(items.len(), 50, 300, 500, 5));
    let out = render_window(&items, r, 50, |item, index| (index, item.clone()));

    assert_eq!(out.range, r);
    assert_eq!(out.offset_top, 5 * 50);
    assert_eq!(out.total_height, 100 * 50);
    assert_eq!(out.len(), 17);
    assert_eq!(out.items.first(), Some(&(5, String::from("msg-5"))));
    assert_eq!(out.items.last(), Some(&(21, String::from("msg-21"))));
    for pair in out.items.windows(2) {
        assert_eq!(pair[0].0 + 1, pair[1].0);
    }
}

#[test]
fn render_truncates_range_past_items() {
    let items = [1u8, 2, 3];
    let out = render_window(&items, WindowRange { start: 1, end: 10 }, 10, |it, _| *it);
    assert_eq!(out.items, [2, 3]);
    assert_eq!(out.range, WindowRange { start: 1, end: 3 });
}

#[test]
fn render_follows_a_collection_that_grew_before_set_count() {
    let list = VirtualList::new(WindowOptions::new(10, 50, 300));
    let items: Vec<u32> = (0..11).collect();
    let out = list.render(&items, |it, _| *it);
    assert_eq!(out.range, WindowRange { start: 0, end: 11 });
    assert_eq!(out.items.last(), Some(&10));
    assert_eq!(out.total_height, 550);
    assert_eq!(list.count(), 10);
}

#[test]
fn for_each_window_item_positions_rows() {
    let mut rows = Vec::new();
    for_each_window_item(WindowRange { start: 3, end: 6 }, 10, 20, |it| rows.push(it));
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], WindowItem { index: 3, top: 60, height: 20 });
    assert_eq!(rows[2].bottom(), 120);
}

#[test]
fn memo_reuses_result_until_an_input_changes() {
    let memo = RangeMemo::new();
    let a = inputs(100, 50, 300, 500, 5);
    assert!(!memo.is_cached(a));
    let r = memo.get(a);
    assert!(memo.is_cached(a));
    assert_eq!(memo.get(a), r);

    let b = RangeInputs {
        count: 20,
        ..a
    };
    assert!(!memo.is_cached(b));
    assert_eq!(memo.get(b), compute_range(b));

    memo.invalidate();
    assert!(!memo.is_cached(b));
}

#[test]
fn list_recomputes_when_any_input_changes() {
    let mut list = VirtualList::new(WindowOptions::new(100, 50, 300));
    assert_eq!(list.overscan(), DEFAULT_OVERSCAN);
    assert_eq!(list.range().last(), Some(11));

    list.set_scroll_offset(500);
    assert_eq!(list.range(), WindowRange { start: 5, end: 22 });

    list.set_container_height(100);
    assert_eq!(list.range().last(), Some(17));

    list.set_item_height(25);
    assert_eq!(list.range(), compute_range(list.inputs()));

    list.set_count(10);
    assert_eq!(list.range().last(), Some(9));
    assert_eq!(list.total_height(), 250);
}

#[test]
fn visible_range_excludes_overscan() {
    let mut list = VirtualList::new(WindowOptions::new(100, 50, 300));
    list.set_scroll_offset(500);
    assert_eq!(list.visible_range(), WindowRange { start: 10, end: 16 });

    list.set_scroll_offset(510);
    assert_eq!(list.visible_range(), WindowRange { start: 10, end: 17 });
    let empty = RangeInputs {
        count: 0,
        ..list.inputs()
    };
    assert_eq!(compute_visible_range(empty), WindowRange::EMPTY);
}

#[test]
fn batch_update_coalesces_notifications() {
    let calls = Arc::new(AtomicUsize::new(0));
    let opts = WindowOptions::new(100, 10, 50).with_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &VirtualList| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    }));
    let mut list = VirtualList::new(opts);

    list.set_scroll_offset(10);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    list.set_scroll_offset(10);
    assert_eq!(calls.load(Ordering::Relaxed), 1, "no-op updates do not notify");

    list.batch_update(|l| {
        l.set_container_height(80);
        l.set_scroll_offset(40);
        l.set_overscan(1);
    });
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    list.batch_update(|_| {});
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn scroll_direction_tracks_offset_changes() {
    let mut list = VirtualList::new(WindowOptions::new(100, 10, 50));
    assert_eq!(list.scroll_direction(), None);
    list.set_scroll_offset(30);
    assert_eq!(list.scroll_direction(), Some(ScrollDirection::Forward));
    list.set_scroll_offset(10);
    assert_eq!(list.scroll_direction(), Some(ScrollDirection::Backward));
}

#[test]
fn scroll_to_index_offset_respects_alignment() {
    let mut list = VirtualList::new(WindowOptions::new(100, 10, 50));
    assert_eq!(list.scroll_to_index_offset(20, Align::Start), 200);
    assert_eq!(list.scroll_to_index_offset(20, Align::End), 160);
    assert_eq!(list.scroll_to_index_offset(20, Align::Center), 180);
    // clamped to max scroll (1000 - 50)
    assert_eq!(list.scroll_to_index_offset(99, Align::Start), 950);
    assert_eq!(list.scroll_to_index_offset(500, Align::End), 950);

    list.set_scroll_offset(100);
    assert_eq!(list.scroll_to_index_offset(12, Align::Auto), 100);
    assert_eq!(list.scroll_to_index_offset(5, Align::Auto), 50);
    assert_eq!(list.scroll_to_index_offset(30, Align::Auto), 260);

    assert_eq!(list.scroll_to_index(40, Align::Start), 400);
    assert_eq!(list.scroll_offset(), 400);
}

#[test]
fn clamped_scroll_never_exceeds_max() {
    let mut list = VirtualList::new(WindowOptions::new(10, 10, 30));
    list.set_scroll_offset_clamped(1_000);
    assert_eq!(list.scroll_offset(), 70);

    let short = VirtualList::new(WindowOptions::new(2, 10, 30));
    assert_eq!(short.max_scroll_offset(), 0);
}

#[test]
fn frame_state_round_trips_through_restore() {
    let mut list = VirtualList::new(WindowOptions::new(100, 10, 50));
    list.set_container_and_scroll(80, 230);
    let frame = list.frame_state();

    let mut remounted = VirtualList::new(WindowOptions::new(100, 10, 50));
    assert_eq!(remounted.scroll_offset(), 0);
    remounted.restore_frame_state(frame);
    assert_eq!(remounted.range(), list.range());
}

#[test]
fn list_render_and_collect_agree() {
    let items: Vec<u32> = (0..40).collect();
    let mut list = VirtualList::new(WindowOptions::new(items.len(), 10, 30).with_overscan(2));
    list.set_scroll_offset(105);

    let out = list.render(&items, |it, idx| {
        assert_eq!(*it as usize, idx);
        idx
    });
    let mut rows = Vec::new();
    list.collect_window_items(&mut rows);

    assert_eq!(out.items, rows.iter().map(|r| r.index).collect::<Vec<_>>());
    assert_eq!(out.offset_top, rows[0].top);
    assert_eq!(list.item(rows[0].index), Some(rows[0]));
}

#[test]
fn index_lookup_and_item_top() {
    let list = VirtualList::new(WindowOptions::new(10, 20, 50));
    assert_eq!(list.index_at_offset(0), Some(0));
    assert_eq!(list.index_at_offset(39), Some(1));
    assert_eq!(list.index_at_offset(40), Some(2));
    assert_eq!(list.index_at_offset(10_000), Some(9));
    assert_eq!(list.item_top(3), Some(60));
    assert_eq!(list.item_top(10), None);
}

#[test]
fn options_validate_reports_contract_violations() {
    assert_eq!(WindowOptions::new(10, 20, 50).validate(), Ok(()));
    assert_eq!(
        WindowOptions::new(10, 0, 50).validate(),
        Err(OptionsError::ZeroItemHeight)
    );
    assert_eq!(
        WindowOptions::new(10, 20, 0).validate(),
        Err(OptionsError::ZeroContainerHeight)
    );
}

#[test]
fn update_options_applies_in_one_notification() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut list = VirtualList::new(WindowOptions::new(100, 10, 50));
    list.set_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &VirtualList| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    }));
    list.update_options(|o| {
        o.count = 5;
        o.overscan = 0;
    });
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(list.range(), WindowRange { start: 0, end: 5 });
}
