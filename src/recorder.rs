use std::{cell::RefCell, collections::HashMap};

use parse_display::Display;

use crate::{State, StateId, StateKeys};

#[cfg(test)]
mod tests;

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

/// Records which states are read between [`start`](Self::start) and [`finish`](Self::finish).
///
/// There is one recorder per thread, and at most one session is active on it at a time.
/// Sessions are not reentrant: starting a session while another is active discards the reads
/// collected so far. Use [`try_start`](Self::try_start) to detect that case instead.
pub struct StateRecorder;

impl StateRecorder {
    /// Starts a new session, discarding any unfinished one.
    pub fn start() {
        SESSION.with(|s| {
            if let Some(old) = s.borrow_mut().replace(Session::default()) {
                tracing::warn!(
                    discarded = old.entries.len(),
                    "recording session started while another was active"
                );
            }
        })
    }

    /// Starts a new session unless one is already active.
    pub fn try_start() -> Result<(), NestedSessionError> {
        SESSION.with(|s| {
            let mut s = s.borrow_mut();
            if s.is_some() {
                return Err(NestedSessionError {});
            }
            *s = Some(Session::default());
            Ok(())
        })
    }

    pub fn is_active() -> bool {
        SESSION.with(|s| s.borrow().is_some())
    }

    /// Records a read of `key` on `state`. `None` records a read of the whole state.
    ///
    /// Does nothing if no session is active.
    pub fn record_read(state: &State, key: Option<&str>) {
        SESSION.with(|s| {
            if let Some(session) = &mut *s.borrow_mut() {
                tracing::trace!(state = ?state.id(), key, "record read");
                session.record(state, key);
            }
        })
    }

    /// Ends the active session and returns what was read during it.
    ///
    /// Returns an empty log if no session is active.
    pub fn finish() -> StateLog {
        let session = SESSION.with(|s| s.borrow_mut().take());
        StateLog(session.map(|s| s.entries).unwrap_or_default())
    }
}

#[derive(Default)]
struct Session {
    indexes: HashMap<StateId, usize>,
    entries: Vec<(State, StateKeys)>,
}
impl Session {
    fn record(&mut self, state: &State, key: Option<&str>) {
        let index = *self.indexes.entry(state.id()).or_insert_with(|| {
            self.entries.push((state.clone(), StateKeys::none()));
            self.entries.len() - 1
        });
        self.entries[index].1.insert(key);
    }
}

/// The reads collected by one recording session, in order of each state's first read.
#[derive(Debug, Default)]
pub struct StateLog(Vec<(State, StateKeys)>);

impl StateLog {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the keys read from `state`, or `None` if it was not read.
    pub fn get(&self, state: &State) -> Option<&StateKeys> {
        self.0.iter().find(|(s, _)| s == state).map(|(_, keys)| keys)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&State, &StateKeys)> {
        self.0.iter().map(|(state, keys)| (state, keys))
    }
}
impl IntoIterator for StateLog {
    type Item = (State, StateKeys);
    type IntoIter = std::vec::IntoIter<(State, StateKeys)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[non_exhaustive]
#[derive(Display, Debug)]
#[display("a recording session is already active")]
pub struct NestedSessionError {}

impl std::error::Error for NestedSessionError {}
