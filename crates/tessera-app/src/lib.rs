//! Headless tessera host: platform directories, a fixed-timestep loop and a
//! scripted camera flight that drive the terrain system.

pub mod flight;
pub mod game_loop;
pub mod platform;
