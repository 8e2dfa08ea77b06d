use std::collections::BTreeSet;

#[cfg(test)]
mod tests;

/// A set of observation keys, or every key of a state.
///
/// Used both as the filter of a subscription and as the set of keys read from a state
/// during a recording session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StateKeys {
    /// Matches every key.
    ///
    /// As a filter, the subscription fires on every dispatch.
    /// As a read set, something inspected the state as a whole (iteration, size, ...).
    #[default]
    All,

    /// Matches only the listed keys (and untargeted dispatches).
    Only(BTreeSet<String>),
}

impl StateKeys {
    /// An empty key set. As a filter, matches only untargeted dispatches.
    pub fn none() -> Self {
        StateKeys::Only(BTreeSet::new())
    }
    /// Returns `true` for [`StateKeys::All`].
    pub fn is_all(&self) -> bool {
        matches!(self, StateKeys::All)
    }

    /// Returns `true` if a dispatch targeted at `key` should reach a subscription with this filter.
    ///
    /// `None` is an untargeted dispatch and matches every filter.
    pub fn matches(&self, key: Option<&str>) -> bool {
        match (self, key) {
            (StateKeys::All, _) | (_, None) => true,
            (StateKeys::Only(keys), Some(key)) => keys.contains(key),
        }
    }

    /// Adds a read of `key`. `None` widens the set to [`StateKeys::All`].
    pub fn insert(&mut self, key: Option<&str>) {
        match key {
            None => *self = StateKeys::All,
            Some(key) => {
                if let StateKeys::Only(keys) = self {
                    if !keys.contains(key) {
                        keys.insert(key.to_owned());
                    }
                }
            }
        }
    }
}

impl From<&str> for StateKeys {
    fn from(key: &str) -> Self {
        Self::from_iter([key])
    }
}
impl From<String> for StateKeys {
    fn from(key: String) -> Self {
        StateKeys::Only(BTreeSet::from([key]))
    }
}
impl From<Option<&str>> for StateKeys {
    fn from(key: Option<&str>) -> Self {
        match key {
            Some(key) => key.into(),
            None => StateKeys::All,
        }
    }
}
impl<const N: usize> From<[&str; N]> for StateKeys {
    fn from(keys: [&str; N]) -> Self {
        Self::from_iter(keys)
    }
}
impl From<Vec<String>> for StateKeys {
    fn from(keys: Vec<String>) -> Self {
        StateKeys::Only(keys.into_iter().collect())
    }
}
impl From<BTreeSet<String>> for StateKeys {
    fn from(keys: BTreeSet<String>) -> Self {
        StateKeys::Only(keys)
    }
}
impl<'a> FromIterator<&'a str> for StateKeys {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        StateKeys::Only(iter.into_iter().map(str::to_owned).collect())
    }
}
