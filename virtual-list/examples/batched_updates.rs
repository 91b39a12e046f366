// Example: coalescing resize + scroll into a single change notification.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use virtual_list::{VirtualList, WindowOptions};

fn main() {
    let renders = Arc::new(AtomicUsize::new(0));
    let opts = WindowOptions::new(500, 32, 400).with_overscan(3).with_on_change(Some({
        let renders = Arc::clone(&renders);
        move |l: &VirtualList| {
            renders.fetch_add(1, Ordering::Relaxed);
            println!("re-render: range={:?}", l.range());
        }
    }));
    let mut list = VirtualList::new(opts);

    // A window resize typically arrives together with a scroll adjustment.
    list.batch_update(|l| {
        l.set_container_height(640);
        l.set_scroll_offset(3_200);
    });

    // Snapshot before teardown; a remounted list starts at offset 0 unless restored.
    let frame = list.frame_state();
    let mut remounted = VirtualList::new(WindowOptions::new(500, 32, 400));
    remounted.restore_frame_state(frame);

    println!(
        "renders={} restored_range={:?}",
        renders.load(Ordering::Relaxed),
        remounted.range()
    );
}
