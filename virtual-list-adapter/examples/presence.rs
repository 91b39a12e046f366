use virtual_list_adapter::{LocalEventSource, PresenceEvent, PresenceTracker};

fn main() {
    // Example: mirror a presence channel into online/offline badges for a consultant list.
    //
    // A real adapter implements `EventSource<PresenceEvent<_>>` on top of its hosted realtime
    // client; `LocalEventSource` stands in for it here.
    let channel = LocalEventSource::<PresenceEvent<&'static str>>::new();

    {
        let presence = PresenceTracker::subscribe(&channel);
        channel.emit(&PresenceEvent::Sync(vec!["dr-lee", "dr-okafor"]));
        channel.emit(&PresenceEvent::Join("dr-santos"));
        channel.emit(&PresenceEvent::Leave("dr-lee"));

        for consultant in ["dr-lee", "dr-okafor", "dr-santos"] {
            println!("{consultant}: {:?}", presence.status(&consultant));
        }
        println!("listeners while mounted: {}", channel.listener_count());
    }

    println!("listeners after unmount: {}", channel.listener_count());
}
