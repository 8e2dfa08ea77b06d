use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use slabmap::SlabMap;

use crate::{StateKeys, StateRecorder, Subscription};


/// An object whose reads can be recorded and whose changes can be subscribed to.
///
/// `State` is a shared handle; clones refer to the same subscriber registry and compare equal by [`StateId`].
/// Types with observable properties embed a `State` and expose it through [`Stateful`].
#[derive(Clone, Default)]
pub struct State(Rc<StateNode>);

impl State {
    /// Creates a state with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identity shared by all clones of this state.
    pub fn id(&self) -> StateId {
        StateId(Rc::as_ptr(&self.0) as usize)
    }

    /// Records a read of `key` (or of the whole state if `key` is `None`) to the active recording session.
    ///
    /// Does nothing if no session is active.
    pub fn record_read(&self, key: Option<&str>) {
        StateRecorder::record_read(self, key);
    }

    /// Notifies the subscribers whose filter matches `key`.
    ///
    /// `None` means anything may have changed, and notifies every subscriber.
    /// Callbacks run synchronously in registration order.
    /// The recipients are fixed before the first callback runs.
    pub fn dispatch_state_event(&self, key: Option<&str>) {
        let callbacks = self.0.matching_callbacks(key);
        tracing::trace!(state = ?self.id(), key, recipients = callbacks.len(), "dispatch");
        for callback in callbacks {
            callback();
        }
    }

    /// Registers `callback` to be called when a matching dispatch occurs.
    ///
    /// Pass [`StateKeys::All`] to be notified of every change.
    pub fn subscribe(
        &self,
        callback: impl Fn() + 'static,
        keys: impl Into<StateKeys>,
    ) -> Subscription {
        let seq = self.0.seq.get();
        self.0.seq.set(seq + 1);
        let key = self.0.subscribers.borrow_mut().insert(Subscriber {
            callback: Rc::new(callback),
            keys: keys.into(),
            seq,
        });
        let node: Weak<StateNode> = Rc::downgrade(&self.0);
        Subscription::from_weak_fn(node, move |node| node.unsubscribe(key, seq))
    }

    /// Returns the number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.0.subscribers.borrow().len()
    }
}
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for State {}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Identity of a [`State`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct StateId(usize);

/// A type that owns a [`State`].
pub trait Stateful {
    fn state(&self) -> &State;
}
impl Stateful for State {
    fn state(&self) -> &State {
        self
    }
}

#[derive(Default)]
struct StateNode {
    subscribers: RefCell<SlabMap<Subscriber>>,
    seq: Cell<u64>,
}
impl StateNode {
    fn matching_callbacks(&self, key: Option<&str>) -> Vec<Rc<dyn Fn()>> {
        let subscribers = self.subscribers.borrow();
        let mut matched: Vec<_> = subscribers
            .values()
            .filter(|s| s.keys.matches(key))
            .map(|s| (s.seq, s.callback.clone()))
            .collect();
        matched.sort_by_key(|&(seq, _)| seq);
        matched.into_iter().map(|(_, callback)| callback).collect()
    }
    fn unsubscribe(&self, key: usize, seq: u64) {
        let mut subscribers = self.subscribers.borrow_mut();
        if subscribers.get(key).is_some_and(|s| s.seq == seq) {
            let removed = subscribers.remove(key);
            drop(subscribers);
            drop(removed);
        }
    }
}

struct Subscriber {
    callback: Rc<dyn Fn()>,
    keys: StateKeys,
    seq: u64,
}
