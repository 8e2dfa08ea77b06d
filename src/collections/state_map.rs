use std::{
    borrow::Borrow,
    collections::{hash_map, HashMap},
    fmt::{self, Display},
    hash::Hash,
};

use serde::{ser::SerializeMap, Deserialize, Serialize};

use crate::{State, StateKeys, Stateful, Subscription};


/// A `HashMap` whose reads and writes are observable per key.
///
/// Each key is observed through its canonical form, the string produced by its [`Display`] implementation.
/// Reads of one key are recorded against that form, and writes dispatch to it.
///
/// # Key collisions
///
/// Distinct keys with the same canonical form (for example `Id::User(1)` and `Id::Group(1)` when both display
/// as `1`) are the same observation target.
/// A change to either notifies subscribers of both. This only causes extra notifications, never missed ones.
///
/// Methods taking a borrowed key `&Q` observe it through `Q`'s [`Display`].
/// `K` and `Q` must display identically, as `String` and `str` do, or a read and a write of the same entry
/// are observed under different keys.
pub struct StateMap<K, V> {
    state: State,
    map: HashMap<K, V>,
}

impl<K, V> StateMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::from_map(HashMap::new())
    }
    /// Wraps an existing map.
    pub fn from_map(map: HashMap<K, V>) -> Self {
        Self {
            state: State::new(),
            map,
        }
    }

    /// Returns the number of entries. Records a read of the whole map.
    pub fn len(&self) -> usize {
        self.state.record_read(None);
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the entries. Records a read of the whole map.
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.state.record_read(None);
        self.map.iter()
    }
    pub fn keys(&self) -> hash_map::Keys<'_, K, V> {
        self.state.record_read(None);
        self.map.keys()
    }
    pub fn values(&self) -> hash_map::Values<'_, K, V> {
        self.state.record_read(None);
        self.map.values()
    }
    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    /// Removes every entry, then notifies every subscriber regardless of its keys.
    pub fn clear(&mut self) {
        self.map.clear();
        self.state.dispatch_state_event(None);
    }

    /// Subscribes to changes of `keys`. Same as `self.state().subscribe(..)`.
    pub fn subscribe(
        &self,
        callback: impl Fn() + 'static,
        keys: impl Into<StateKeys>,
    ) -> Subscription {
        self.state.subscribe(callback, keys)
    }
}

impl<K: Eq + Hash + Display, V> StateMap<K, V> {
    /// Returns the value for `key`. Records a read of `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.state.record_read(Some(&key.to_string()));
        self.map.get(key)
    }

    /// Returns `true` if the map contains `key`. Records a read of `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.state.record_read(Some(&key.to_string()));
        self.map.contains_key(key)
    }

    /// Inserts a value, then notifies the subscribers of `key`.
    ///
    /// Returns the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let canonical = key.to_string();
        let old = self.map.insert(key, value);
        self.state.dispatch_state_event(Some(&canonical));
        old
    }

    /// Removes `key`, then notifies the subscribers of `key`.
    ///
    /// Subscribers are notified even if `key` was not present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let old = self.map.remove(key);
        self.state.dispatch_state_event(Some(&key.to_string()));
        old
    }

    /// Same as [`remove`](Self::remove), but returns whether an entry was removed.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.remove(key).is_some()
    }
}

impl<K, V> Stateful for StateMap<K, V> {
    fn state(&self) -> &State {
        &self.state
    }
}

impl<K, V> Default for StateMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The clone is a new observable map with the same entries and no subscribers.
impl<K: Clone, V: Clone> Clone for StateMap<K, V> {
    fn clone(&self) -> Self {
        Self::from_map(self.map.clone())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for StateMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl<K: Eq + Hash + Display, V> Extend<(K, V)> for StateMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for StateMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<'a, K, V> IntoIterator for &'a StateMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Serialize for StateMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
impl<'de, K, V> Deserialize<'de> for StateMap<K, V>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<StateMap<K, V>, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        HashMap::deserialize(deserializer).map(Self::from_map)
    }
}
