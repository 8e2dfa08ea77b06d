mod state_map;

pub use state_map::StateMap;
