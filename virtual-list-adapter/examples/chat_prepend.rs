use std::collections::HashMap;

use virtual_list::WindowOptions;
use virtual_list_adapter::{Controller, Edge, EdgeTrigger, LocalEventSource, ScrollEvent};

fn main() {
    // Example: a chat history that loads older messages when the user scrolls near the top.
    //
    // The adapter flow is typically:
    // 1) the scroll container emits scroll events (tracked by the controller)
    // 2) poll_edge() reports Edge::Start near the top
    // 3) capture an anchor, prepend the page, re-apply the anchor so nothing jumps
    let container = LocalEventSource::<ScrollEvent>::new();
    let mut ids: Vec<u64> = (1_000..1_100).collect();

    let mut c = Controller::mount(WindowOptions::new(ids.len(), 24, 240), Some(&container))
        .with_edge_trigger(EdgeTrigger::start(3));

    container.emit(&ScrollEvent { offset: 30 });
    if c.poll_edge() == Some(Edge::Start) {
        let anchor = c
            .capture_anchor(|i| ids[i])
            .expect("visible range must not be empty");
        println!("before prepend: off={} anchor={anchor:?}", c.list().scroll_offset());

        let older: Vec<u64> = (950..1_000).collect();
        ids.splice(0..0, older);
        let index_of: HashMap<u64, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let target = c.prepend_with_anchor(&anchor, ids.len(), |k| index_of.get(k).copied());
        // The real container must be scrolled to `target` as well.
        println!("after prepend: target={target:?} range={:?}", c.list().range());
    }

    let window = c.render(&ids, |id, index| format!("[{index}] message {id}"));
    println!("rendered {} of {} rows", window.len(), ids.len());
}
