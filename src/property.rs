use derive_ex::derive_ex;

use crate::Stateful;

#[cfg(test)]
mod tests;

/// An observable property implemented by an existing accessor pair.
///
/// [`get`](Self::get) records a read of the property name before calling the getter.
/// [`set`](Self::set) calls the setter and then notifies the subscribers of the property name.
///
/// ```
/// use statemut::{State, StateProperty, Stateful};
///
/// struct Thermometer {
///     state: State,
///     kelvin: f64,
/// }
/// impl Stateful for Thermometer {
///     fn state(&self) -> &State {
///         &self.state
///     }
/// }
///
/// impl Thermometer {
///     fn celsius(&self) -> f64 {
///         self.kelvin - 273.15
///     }
///     fn set_celsius(&mut self, value: f64) {
///         self.kelvin = value + 273.15;
///     }
/// }
///
/// const CELSIUS: StateProperty<Thermometer, f64> =
///     StateProperty::new("celsius", Thermometer::celsius, Thermometer::set_celsius);
///
/// let mut t = Thermometer { state: State::new(), kelvin: 0.0 };
/// CELSIUS.set(&mut t, 20.0);
/// assert!((CELSIUS.get(&t) - 20.0).abs() < 1e-9);
/// ```
#[derive_ex(Clone, bound())]
pub struct StateProperty<O, T> {
    name: &'static str,
    get: fn(&O) -> T,
    set: fn(&mut O, T),
}

impl<O: Stateful, T> StateProperty<O, T> {
    pub const fn new(name: &'static str, get: fn(&O) -> T, set: fn(&mut O, T)) -> Self {
        Self { name, get, set }
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn get(&self, owner: &O) -> T {
        owner.state().record_read(Some(self.name));
        (self.get)(owner)
    }
    pub fn set(&self, owner: &mut O, value: T) {
        (self.set)(owner, value);
        owner.state().dispatch_state_event(Some(self.name));
    }
}

/// An observable property stored in a field.
#[derive_ex(Clone, bound())]
pub struct StateField<O, T> {
    name: &'static str,
    slot: fn(&O) -> &T,
    slot_mut: fn(&mut O) -> &mut T,
}

impl<O: Stateful, T> StateField<O, T> {
    pub const fn new(
        name: &'static str,
        slot: fn(&O) -> &T,
        slot_mut: fn(&mut O) -> &mut T,
    ) -> Self {
        Self {
            name,
            slot,
            slot_mut,
        }
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn get<'a>(&self, owner: &'a O) -> &'a T {
        owner.state().record_read(Some(self.name));
        (self.slot)(owner)
    }
    pub fn set(&self, owner: &mut O, value: T) {
        *(self.slot_mut)(owner) = value;
        owner.state().dispatch_state_event(Some(self.name));
    }
}
