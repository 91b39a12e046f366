use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::marker::PhantomData;

/// A boxed event listener.
pub type Listener<E> = Box<dyn FnMut(&E)>;

/// Identifies one attached listener on an [`EventSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Anything that delivers events of type `E` to attached listeners: a scroll container, a
/// presence channel, a message feed.
///
/// Attaching is usually done through [`listen`], which hands back a guard that detaches on
/// drop.
pub trait EventSource<E> {
    fn attach(&self, listener: Listener<E>) -> ListenerId;

    /// Detaches a listener. Returns `false` if `id` was not attached.
    fn detach(&self, id: ListenerId) -> bool;
}

/// Attaches `listener` to `source` for as long as the returned guard lives.
pub fn listen<'a, E, S>(
    source: &'a S,
    listener: impl FnMut(&E) + 'static,
) -> ListenerGuard<'a, E, S>
where
    S: EventSource<E> + ?Sized,
{
    let id = source.attach(Box::new(listener));
    atrace!(id = id.0, "listener attached");
    ListenerGuard {
        source,
        id: Some(id),
        _event: PhantomData,
    }
}

/// Keeps a listener attached; detaches it when dropped.
///
/// Release happens on every exit path (early return, `?`, panic unwinding), so a subscription
/// can never outlive the scope that created it.
#[must_use = "dropping the guard detaches the listener immediately"]
pub struct ListenerGuard<'a, E, S: EventSource<E> + ?Sized> {
    source: &'a S,
    id: Option<ListenerId>,
    _event: PhantomData<fn(&E)>,
}

impl<E, S: EventSource<E> + ?Sized> ListenerGuard<'_, E, S> {
    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    /// Detaches now instead of at end of scope.
    pub fn detach(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        match self.id.take() {
            Some(id) => {
                atrace!(id = id.0, "listener detached");
                self.source.detach(id)
            }
            None => false,
        }
    }
}

impl<E, S: EventSource<E> + ?Sized> Drop for ListenerGuard<'_, E, S> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<E, S: EventSource<E> + ?Sized> fmt::Debug for ListenerGuard<'_, E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

type SharedListener<E> = Rc<RefCell<Listener<E>>>;

/// A single-threaded, in-process [`EventSource`].
///
/// Listeners may attach or detach other listeners (or themselves) while an event is being
/// delivered. A listener detached mid-delivery is not called for the rest of that event. A
/// listener that re-entrantly emits on the same source does not receive its own nested event.
pub struct LocalEventSource<E> {
    listeners: RefCell<Vec<(ListenerId, SharedListener<E>)>>,
    next_id: Cell<u64>,
}

impl<E> LocalEventSource<E> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_attached(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|(l, _)| *l == id)
    }

    /// Delivers `event` to every attached listener, in attach order.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<(ListenerId, SharedListener<E>)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();

        for (id, listener) in snapshot {
            if !self.is_attached(id) {
                continue;
            }
            let Ok(mut listener) = listener.try_borrow_mut() else {
                awarn!(id = id.0, "re-entrant emit skipped a busy listener");
                continue;
            };
            let f: &mut dyn FnMut(&E) = &mut **listener;
            f(event);
        }
    }
}

impl<E> Default for LocalEventSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventSource<E> for LocalEventSource<E> {
    fn attach(&self, listener: Listener<E>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        id
    }

    fn detach(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(l, _)| *l != id);
        listeners.len() != before
    }
}

impl<E> fmt::Debug for LocalEventSource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalEventSource")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}
