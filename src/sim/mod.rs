//! Game engine
//!
//! All gameplay logic lives here. This module is pure:
//! - No I/O; persistence is the caller's job after a committed move
//! - Randomness only through an injected or seeded RNG
//! - Grids are values; a move builds a new one and never mutates its input

pub mod collapse;
pub mod direction;
pub mod grid;
pub mod moves;
pub mod spawn;
pub mod state;
pub mod step;

pub use collapse::{Collapsed, collapse_line};
pub use direction::{Axis, Direction};
pub use grid::{Cell, Grid, can_move, create_grid};
pub use moves::{MoveOutcome, apply_move};
pub use spawn::{Spawn, place_random_tile, random_tile_value, spawn_tile};
pub use state::{GamePhase, GameState, RngState};
pub use step::{Command, GameEvent, StepOutcome, StepReport, execute, step};
