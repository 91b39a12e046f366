use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::key::{KeyMap, MapKey};
use crate::{EventSource, ListenerGuard, listen};

/// A membership event from a hosted presence channel.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresenceEvent<U> {
    /// Full membership snapshot. Replaces everything known so far; a user listed twice has two
    /// connections.
    Sync(Vec<U>),
    /// One connection of `U` joined.
    Join(U),
    /// One connection of `U` left.
    Leave(U),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresenceStatus {
    Online,
    Offline,
}

type Connections<U> = Rc<RefCell<KeyMap<U, usize>>>;

/// Mirrors a presence channel's membership into local state.
///
/// A user is online while at least one of their connections is present. The subscription is
/// released when the tracker is dropped. Transient network drops are not reconciled: a status
/// reflects the latest event received, so it may lag until the channel's next sync.
pub struct PresenceTracker<'a, U, S: EventSource<PresenceEvent<U>> + ?Sized> {
    connections: Connections<U>,
    _guard: ListenerGuard<'a, PresenceEvent<U>, S>,
}

impl<'a, U, S> PresenceTracker<'a, U, S>
where
    U: MapKey + Clone + 'static,
    S: EventSource<PresenceEvent<U>> + ?Sized,
{
    pub fn subscribe(channel: &'a S) -> Self {
        let connections: Connections<U> = Rc::new(RefCell::new(KeyMap::new()));
        let guard = listen(channel, {
            let connections = Rc::clone(&connections);
            move |ev: &PresenceEvent<U>| apply(&mut connections.borrow_mut(), ev)
        });
        Self {
            connections,
            _guard: guard,
        }
    }

    pub fn is_online(&self, user: &U) -> bool {
        self.connections.borrow().contains_key(user)
    }

    pub fn status(&self, user: &U) -> PresenceStatus {
        if self.is_online(user) {
            PresenceStatus::Online
        } else {
            PresenceStatus::Offline
        }
    }

    /// Number of live connections for `user`.
    pub fn connections(&self, user: &U) -> usize {
        self.connections.borrow().get(user).copied().unwrap_or(0)
    }

    pub fn online_count(&self) -> usize {
        self.connections.borrow().len()
    }

    /// Currently online users, in no particular order.
    pub fn online_users(&self) -> Vec<U> {
        self.connections.borrow().keys().cloned().collect()
    }
}

fn apply<U: MapKey + Clone>(connections: &mut KeyMap<U, usize>, ev: &PresenceEvent<U>) {
    match ev {
        PresenceEvent::Sync(members) => {
            connections.clear();
            for user in members {
                *connections.entry(user.clone()).or_insert(0) += 1;
            }
            adebug!(online = connections.len(), "presence sync");
        }
        PresenceEvent::Join(user) => {
            *connections.entry(user.clone()).or_insert(0) += 1;
        }
        PresenceEvent::Leave(user) => match connections.get_mut(user) {
            Some(n) if *n > 1 => *n -= 1,
            Some(_) => {
                connections.remove(user);
            }
            None => {
                awarn!("presence leave for a user that was not online");
            }
        },
    }
}

impl<U, S: EventSource<PresenceEvent<U>> + ?Sized> fmt::Debug for PresenceTracker<'_, U, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenceTracker")
            .field("online", &self.connections.borrow().len())
            .finish_non_exhaustive()
    }
}
