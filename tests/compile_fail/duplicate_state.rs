#![allow(unused)]
use statemut::{State, Stateful};

#[derive(Stateful)]
struct Twice {
    #[state]
    a: State,
    #[state]
    b: State,
}

fn main() {}
