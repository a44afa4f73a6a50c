//! Tile Merge - a sliding-tile merge puzzle (2048-style)
//!
//! Core modules:
//! - `sim`: The engine (line collapse, moves, spawning, win/over state)
//! - `settings`: Board size and winning value
//! - `highscores`: Best score and finished-game leaderboard
//! - `persistence`: Key/value storage for saved games
//!
//! ```
//! use tile_merge::sim::{Command, Direction, GameState, execute};
//!
//! let mut game = GameState::new(4, 2048, 42).unwrap();
//! let report = execute(&mut game, Command::Move(Direction::Left));
//! assert!(game.score >= report.score_delta);
//! ```

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use error::{GridError, SnapshotError, StoreError};
pub use highscores::HighScores;
pub use persistence::{FileStore, KeyValueStore, MemoryStore, SavedGame};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Board edge length used when no setting is stored
    pub const DEFAULT_BOARD_SIZE: usize = 4;
    /// Selectable board sizes
    pub const BOARD_SIZES: [usize; 5] = [4, 5, 6, 7, 8];
    /// Tile value that wins the game
    pub const WINNING_VALUE: u32 = 2048;
    /// Chance a spawned tile is a 4 instead of a 2
    pub const FOUR_PROBABILITY: f64 = 0.1;
}
