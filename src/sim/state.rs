//! Game state
//!
//! Everything a caller needs to render, persist or resume a game. The state
//! is an explicit value threaded through `step`; nothing is global.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, create_grid};
use super::spawn::place_random_tile;
use crate::error::GridError;
use crate::settings::Settings;

/// Current phase of play, derived from the state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play, target not reached yet
    Playing,
    /// Target reached, win notice showing; moves blocked until dismissed
    Won,
    /// Player dismissed the win notice and kept going
    ContinuedPlaying,
    /// No legal move remains
    Over,
}

/// RNG state wrapper for serialization
///
/// Each draw builds a fresh generator from the seed and a draw counter, so a
/// restored game continues the same random sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Generator for the next draw
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::seed_from_u64(self.seed ^ self.draws.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.draws += 1;
        rng
    }
}

/// Complete game state (serializable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board
    pub grid: Grid,
    /// Tile value that wins the game
    pub winning_value: u32,
    /// Score of the current game
    pub score: u64,
    /// Best score over every game played
    pub high_score: u64,
    /// No legal move remains
    pub over: bool,
    /// The winning value has been reached this game
    pub won: bool,
    /// The player chose to keep playing after winning
    pub continued: bool,
    /// Committed moves this game
    #[serde(default)]
    pub moves: u32,
    /// RNG state
    pub rng_state: RngState,
}

impl GameState {
    /// Start a new game: empty board seeded with one tile
    pub fn new(size: usize, winning_value: u32, seed: u64) -> Result<Self, GridError> {
        let mut state = Self {
            grid: create_grid(size)?,
            winning_value,
            score: 0,
            high_score: 0,
            over: false,
            won: false,
            continued: false,
            moves: 0,
            rng_state: RngState::new(seed),
        };
        state.seed_tile();
        Ok(state)
    }

    /// Start a new game using board size and target from `settings`
    pub fn from_settings(settings: &Settings, seed: u64) -> Result<Self, GridError> {
        settings.validate()?;
        Self::new(settings.board_size, settings.winning_value, seed)
    }

    /// Derived phase
    pub fn phase(&self) -> GamePhase {
        if self.over {
            GamePhase::Over
        } else if self.won && !self.continued {
            GamePhase::Won
        } else if self.continued {
            GamePhase::ContinuedPlaying
        } else {
            GamePhase::Playing
        }
    }

    /// True while the one-time win notice is waiting to be dismissed
    pub fn win_notice_showing(&self) -> bool {
        self.won && !self.continued
    }

    /// Moves are blocked when the game is over or the win notice is up
    pub fn accepts_moves(&self) -> bool {
        !self.over && !self.win_notice_showing()
    }

    /// Dismiss the win notice and keep playing
    ///
    /// Returns false (and changes nothing) if no notice is showing.
    pub fn continue_after_win(&mut self) -> bool {
        if !self.win_notice_showing() {
            return false;
        }
        self.continued = true;
        log::info!("Continuing after win (score {})", self.score);
        true
    }

    /// Fresh game on a board of the same size; the high score is kept
    pub fn restart(&mut self) {
        let grid = self.grid.cleared();
        self.reset(grid);
    }

    /// Fresh game on a board of a different size; the high score is kept
    pub fn resize(&mut self, size: usize) -> Result<(), GridError> {
        let grid = create_grid(size)?;
        self.reset(grid);
        Ok(())
    }

    /// Add merge points and keep the high score in step
    pub(crate) fn add_score(&mut self, delta: u64) {
        self.score += delta;
        self.high_score = self.high_score.max(self.score);
    }

    fn reset(&mut self, grid: Grid) {
        let previous = self.score;
        let size = grid.size();
        self.grid = grid;
        self.score = 0;
        self.over = false;
        self.won = false;
        self.continued = false;
        self.moves = 0;
        self.seed_tile();
        log::info!(
            "New {size}x{size} game (previous score {previous}, high score {})",
            self.high_score
        );
    }

    fn seed_tile(&mut self) {
        let mut rng = self.rng_state.next_rng();
        place_random_tile(&mut self.grid, &mut rng);
    }
}
