use statemut::{State, Stateful};

#[derive(Stateful)]
pub struct Slot<T: Clone> {
    #[state]
    state: State,
    #[property]
    value: T,
    untracked: u32,
}

fn main() {
    let mut slot = Slot {
        state: State::new(),
        value: 1u8,
        untracked: 0,
    };
    slot.set_value(2);
    assert_eq!(*slot.value(), 2);
    assert_eq!(slot.untracked, 0);
    let _ = slot.state();
}
