use assert_call::{call, CallRecorder};

use super::*;
use crate::{State, StateKeys, StateRecorder};

struct Example {
    state: State,
    foo: String,
    fool: String,
    count: i32,
}
impl Example {
    fn new() -> Self {
        Self {
            state: State::new(),
            foo: "bar".into(),
            fool: "bars".into(),
            count: 0,
        }
    }
    fn doubled(&self) -> i32 {
        self.count * 2
    }
    fn set_doubled(&mut self, value: i32) {
        call!("set_doubled {value}");
        self.count = value / 2;
    }
}
impl Stateful for Example {
    fn state(&self) -> &State {
        &self.state
    }
}

const FOO: StateField<Example, String> =
    StateField::<Example, String>::new("foo", |e| &e.foo, |e| &mut e.foo);
const FOOL: StateField<Example, String> =
    StateField::<Example, String>::new("fool", |e| &e.fool, |e| &mut e.fool);
const DOUBLED: StateProperty<Example, i32> =
    StateProperty::new("doubled", Example::doubled, Example::set_doubled);

#[test]
fn field_get_and_set() {
    let mut e = Example::new();
    assert_eq!(FOO.get(&e), "bar");
    FOO.set(&mut e, "baz".into());
    assert_eq!(FOO.get(&e), "baz");
    assert_eq!(e.foo, "baz");
}

#[test]
fn field_read_is_recorded_with_name() {
    let e = Example::new();
    StateRecorder::start();
    FOO.get(&e);
    let log = StateRecorder::finish();
    assert_eq!(log.len(), 1);
    assert_eq!(log.get(&e.state), Some(&StateKeys::from("foo")));
}

#[test]
fn field_set_notifies_global_subscriber_once() {
    let mut cr = CallRecorder::new();
    let mut e = Example::new();
    let _sub = e.state.subscribe(|| call!("changed"), StateKeys::All);
    FOO.set(&mut e, "baz".into());
    cr.verify("changed");
}

#[test]
fn field_set_notifies_only_matching_subscriber() {
    let mut cr = CallRecorder::new();
    let mut e = Example::new();
    let _sub = e.state.subscribe(|| call!("foo"), "foo");
    FOOL.set(&mut e, "baz".into());
    cr.verify(());
    FOO.set(&mut e, "baz".into());
    cr.verify("foo");
}

#[test]
fn accessors_run_setter_before_dispatch() {
    let mut cr = CallRecorder::new();
    let mut e = Example::new();
    let _sub = e.state.subscribe(|| call!("doubled"), "doubled");
    DOUBLED.set(&mut e, 8);
    cr.verify(["set_doubled 8", "doubled"]);
    assert_eq!(e.count, 4);
    assert_eq!(DOUBLED.get(&e), 8);
    assert_eq!(DOUBLED.name(), "doubled");
}

#[test]
fn accessors_record_read() {
    let e = Example::new();
    StateRecorder::start();
    DOUBLED.get(&e);
    FOO.get(&e);
    let log = StateRecorder::finish();
    assert_eq!(log.get(&e.state), Some(&StateKeys::from(["doubled", "foo"])));
}
