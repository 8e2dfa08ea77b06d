#![allow(unused)]
use statemut::{State, Stateful};

#[derive(Stateful)]
struct Pair(State, u32);

fn main() {}
