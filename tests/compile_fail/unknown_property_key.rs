#![allow(unused)]
use statemut::{State, Stateful};

#[derive(Stateful)]
struct Settings {
    #[state]
    state: State,
    #[property(default)]
    volume: u32,
}

fn main() {}
