// Example: minimal usage and scroll-to helper.
use virtual_list::{Align, VirtualList, WindowOptions};

fn main() {
    let consultants: Vec<String> = (0..10_000).map(|i| format!("consultant #{i}")).collect();

    let mut list = VirtualList::new(WindowOptions::new(consultants.len(), 48, 600));
    list.set_scroll_offset(123_456);

    let window = list.render(&consultants, |name, index| format!("{index:>5} {name}"));
    println!("total_height={}", window.total_height);
    println!("offset_top={} range={:?}", window.offset_top, window.range);
    println!("first_row={:?}", window.items.first());

    let off = list.scroll_to_index(9_999, Align::End);
    println!("after scroll_to_index: offset={off} range={:?}", list.range());
}
