use std::{
    cell::RefCell,
    mem::take,
    rc::{Rc, Weak},
};

use crate::{StateRecorder, Subscription};


/// Lifecycle hooks a host calls on its registered controllers.
///
/// Each pass of the host must be bracketed by [`host_update`](Self::host_update) and
/// [`host_updated`](Self::host_updated).
pub trait ReactiveController {
    fn host_connected(&self) {}
    fn host_disconnected(&self) {}
    fn host_update(&self) {}
    fn host_updated(&self) {}
}

/// The object that runs passes (typically a UI component) and drives its controllers.
pub trait ReactiveControllerHost {
    fn add_controller(&self, controller: Rc<dyn ReactiveController>);

    /// Asks the host to run a new pass. The host decides when.
    fn request_update(&self);
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ControllerPhase {
    /// The host no longer exists.
    Detached,
    Idle,
    /// Between `host_update` and `host_updated`.
    Recording,
}

/// Subscribes a host to exactly the states read during its last pass.
///
/// Every pass runs inside a recording session. When the pass ends, the subscriptions of the
/// previous pass are dropped and one subscription is created for each state read, filtered to
/// the keys that were read. A change to any of them requests a new pass from the host.
///
/// While the host is disconnected, no subscriptions are held. Reconnecting requests one pass
/// so that changes made in the meantime are picked up.
pub struct StateController {
    host: Weak<dyn ReactiveControllerHost>,
    data: RefCell<ControllerData>,
}

#[derive(Default)]
struct ControllerData {
    subscriptions: Vec<Subscription>,
    is_connected: bool,
    was_connected: bool,
    is_recording: bool,
}

impl StateController {
    /// Creates a controller and registers it with `host`.
    pub fn attach<H: ReactiveControllerHost + 'static>(host: &Rc<H>) -> Rc<Self> {
        let host_dyn: Rc<dyn ReactiveControllerHost> = host.clone();
        let this = Rc::new(Self {
            host: Rc::downgrade(&host_dyn),
            data: RefCell::new(ControllerData::default()),
        });
        host.add_controller(this.clone());
        this
    }

    /// Returns where the controller is in the host's lifecycle.
    pub fn phase(&self) -> ControllerPhase {
        if self.host.strong_count() == 0 {
            ControllerPhase::Detached
        } else if self.data.borrow().is_recording {
            ControllerPhase::Recording
        } else {
            ControllerPhase::Idle
        }
    }
    /// Returns `true` between `host_connected` and `host_disconnected`.
    pub fn is_connected(&self) -> bool {
        self.data.borrow().is_connected
    }
    /// Returns the number of states the host is currently subscribed to.
    pub fn subscription_count(&self) -> usize {
        self.data.borrow().subscriptions.len()
    }

    fn request_update(&self) {
        if let Some(host) = self.host.upgrade() {
            host.request_update();
        }
    }
    fn clear_subscriptions(&self) {
        let subscriptions = take(&mut self.data.borrow_mut().subscriptions);
        if !subscriptions.is_empty() {
            tracing::debug!(count = subscriptions.len(), "unsubscribe states");
        }
        drop(subscriptions);
    }
}

impl ReactiveController for StateController {
    fn host_connected(&self) {
        let resync = {
            let mut d = self.data.borrow_mut();
            d.is_connected = true;
            take(&mut d.was_connected)
        };
        if resync {
            self.request_update();
        }
    }

    fn host_disconnected(&self) {
        {
            let mut d = self.data.borrow_mut();
            d.is_connected = false;
            d.was_connected = true;
        }
        self.clear_subscriptions();
    }

    fn host_update(&self) {
        StateRecorder::start();
        self.data.borrow_mut().is_recording = true;
    }

    fn host_updated(&self) {
        self.clear_subscriptions();
        let is_connected = {
            let mut d = self.data.borrow_mut();
            d.is_recording = false;
            d.is_connected
        };
        let log = StateRecorder::finish();
        if !is_connected {
            return;
        }
        let mut subscriptions = Vec::with_capacity(log.len());
        for (state, keys) in log {
            let host = self.host.clone();
            subscriptions.push(state.subscribe(
                move || {
                    if let Some(host) = host.upgrade() {
                        host.request_update();
                    }
                },
                keys,
            ));
        }
        tracing::debug!(count = subscriptions.len(), "subscribe states");
        self.data.borrow_mut().subscriptions = subscriptions;
    }
}
