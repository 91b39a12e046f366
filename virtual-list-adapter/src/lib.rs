//! Adapter utilities for the `virtual-list` crate.
//!
//! The `virtual-list` crate is UI-agnostic and focuses on the window math and state. This crate
//! provides small, framework-neutral helpers a client needs around it:
//!
//! - Event sources with scoped listener guards (attach on mount, detach on drop)
//! - A viewport tracker and controller that feed scroll events into a `VirtualList`
//! - Scroll anchoring for chat "load older messages" prepends
//! - A lazy-load edge trigger for paged feeds
//! - A bounded TTL cache for deduplicating fetches
//! - A presence tracker mirroring a hosted presence channel
//!
//! This crate is intentionally framework-agnostic and single-threaded: listeners and shared
//! state use `Rc`/`RefCell`.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod cache;
mod controller;
mod error;
mod key;
mod loader;
mod presence;
mod source;
mod tracker;


pub use anchor::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};
pub use cache::{CacheConfig, TtlCache};
pub use controller::Controller;
pub use error::CacheError;
pub use key::MapKey;
pub use loader::{Edge, EdgeTrigger};
pub use presence::{PresenceEvent, PresenceStatus, PresenceTracker};
pub use source::{EventSource, Listener, ListenerGuard, ListenerId, LocalEventSource, listen};
pub use tracker::{ScrollEvent, ViewportTracker};
