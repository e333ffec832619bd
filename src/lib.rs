//! Launch sandbox: a 2D physics playground.
//!
//! Walls, stacked blocks and a pendulum are simulated by Rapier2D and drawn with
//! macroquad. Press once to place a ball, again to launch it along the drag,
//! and a third time to remove it.
//!
//! - `modules::entities`: scene entities and their registration in the world
//! - `modules::world`: Rapier sets, pipeline and per-collider colors
//! - `modules::scene`: scene state and the ball launch cycle
//! - `modules::render`, `modules::scale`, `modules::clock`: the per-frame loop helpers

pub mod modules;

pub use modules::scene::{LaunchState, Scene};
pub use modules::settings::Settings;
