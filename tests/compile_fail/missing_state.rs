#![allow(unused)]
use statemut::{State, Stateful};

#[derive(Stateful)]
struct Missing {
    state: State,
}

fn main() {}
