//! Fine-grained observable state.
//!
//! A [`State`] records every read made during a recording session and notifies its subscribers when it
//! changes. A [`StateController`] wraps each pass of a host (a render, for example) in a session and
//! subscribes the host to exactly the keys it read, so that only relevant changes request a new pass.
//!
//! ```
//! use statemut::{State, Stateful};
//!
//! #[derive(Stateful)]
//! struct Example {
//!     #[state]
//!     state: State,
//!     #[property]
//!     foo: String,
//! }
//!
//! let mut e = Example { state: State::new(), foo: "bar".into() };
//! let calls = std::rc::Rc::new(std::cell::Cell::new(0));
//! let _s = e.state().subscribe(
//!     {
//!         let calls = calls.clone();
//!         move || calls.set(calls.get() + 1)
//!     },
//!     "foo",
//! );
//! e.set_foo("baz".into());
//! assert_eq!(e.foo(), "baz");
//! assert_eq!(calls.get(), 1);
//! ```
mod collections;
mod controller;
mod keys;
mod property;
mod recorder;
mod state;
mod subscription;

pub use collections::*;
pub use controller::*;
pub use keys::*;
pub use property::*;
pub use recorder::*;
pub use state::*;
pub use subscription::*;

/// Implements [`Stateful`] and generates observable accessors.
///
/// - The field marked `#[state]` (of type [`State`]) is returned by [`Stateful::state`].
/// - Each field marked `#[property]` gets a getter named after the field that records a read, and
///   a `set_` setter that stores the value and then notifies the subscribers of the field name.
/// - `#[property(get = path)]` and `#[property(set = path)]` route the getter or setter through an
///   existing function (`fn(&Self) -> T` / `fn(&mut Self, T)`) instead of the field.
/// - `#[property(name = "...")]` changes the observation key, which defaults to the field name.
pub use statemut_macros::Stateful;
