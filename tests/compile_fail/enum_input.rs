#![allow(unused)]
use statemut::{State, Stateful};

#[derive(Stateful)]
enum Mode {
    On(State),
    Off,
}

fn main() {}
