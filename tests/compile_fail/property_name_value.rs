#![allow(unused)]
use statemut::{State, Stateful};

#[derive(Stateful)]
struct Settings {
    #[state]
    state: State,
    #[property = "volume"]
    volume: u32,
}

fn main() {}
