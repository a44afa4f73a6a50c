//! Save/load of games in progress
//!
//! Features:
//! - Versioned JSON envelope holding the grid snapshot and game flags
//! - Snapshot validation on load (cell count, powers of two, positions)
//! - Fallback to a fresh game when the save is missing or corrupt

pub mod store;

use serde::{Deserialize, Serialize};

pub use store::{FileStore, KeyValueStore, MemoryStore, load_json, save_json};

use crate::error::{GridError, StoreError};
use crate::settings::Settings;
use crate::sim::{Cell, GameState, Grid, RngState};

/// Store key for the game in progress
pub const BOARD_KEY: &str = "board";

/// Current envelope version
pub const SAVE_VERSION: u32 = 1;

/// Persisted form of a game in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    /// Ordered `{position, value}` list, empties included
    pub board: Vec<Cell>,
    pub winning_value: u32,
    pub score: u64,
    pub high_score: u64,
    pub over: bool,
    pub won: bool,
    pub continued: bool,
    #[serde(default)]
    pub moves: u32,
    pub rng_state: RngState,
}

impl SavedGame {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            version: SAVE_VERSION,
            board: state.grid.snapshot(),
            winning_value: state.winning_value,
            score: state.score,
            high_score: state.high_score,
            over: state.over,
            won: state.won,
            continued: state.continued,
            moves: state.moves,
            rng_state: state.rng_state.clone(),
        }
    }

    /// Validate and rebuild the game state
    pub fn into_state(self) -> Result<GameState, StoreError> {
        if self.version != SAVE_VERSION {
            return Err(StoreError::Version(self.version));
        }
        if self.winning_value < 4 || !self.winning_value.is_power_of_two() {
            return Err(GridError::InvalidWinningValue(self.winning_value).into());
        }
        let grid = Grid::from_snapshot(self.board)?;
        Ok(GameState {
            grid,
            winning_value: self.winning_value,
            score: self.score,
            high_score: self.high_score.max(self.score),
            over: self.over,
            won: self.won || self.continued,
            continued: self.continued,
            moves: self.moves,
            rng_state: self.rng_state,
        })
    }

    /// Write the game to the store
    pub fn save<S: KeyValueStore + ?Sized>(state: &GameState, store: &mut S) -> Result<(), StoreError> {
        save_json(store, BOARD_KEY, &Self::from_state(state))?;
        log::debug!("Game saved (score {}, {} moves)", state.score, state.moves);
        Ok(())
    }

    /// Read the saved game, `None` if nothing is stored
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<GameState>, StoreError> {
        let Some(saved) = load_json::<Self, S>(store, BOARD_KEY)? else {
            return Ok(None);
        };
        let state = saved.into_state()?;
        log::info!(
            "Loaded {size}x{size} game (score {})",
            state.score,
            size = state.grid.size()
        );
        Ok(Some(state))
    }

    /// Drop the saved game
    pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
        store.remove(BOARD_KEY)?;
        log::info!("Saved game cleared");
        Ok(())
    }

    /// Resume the saved game, or start a fresh one if it is missing or corrupt
    ///
    /// A save for a different board size than `settings` is discarded, since
    /// changing size always starts a new game.
    pub fn load_or_new<S: KeyValueStore + ?Sized>(
        store: &S,
        settings: &Settings,
        seed: u64,
    ) -> Result<GameState, GridError> {
        match Self::load(store) {
            Ok(Some(state)) if state.grid.size() == settings.board_size => return Ok(state),
            Ok(Some(state)) => log::info!(
                "Saved game is {}x{}, starting a new {}x{} game",
                state.grid.size(),
                state.grid.size(),
                settings.board_size,
                settings.board_size
            ),
            Ok(None) => log::info!("No saved game found, starting fresh"),
            Err(e) => log::warn!("Could not restore saved game: {e}"),
        }
        GameState::from_settings(settings, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::WINNING_VALUE;
    use crate::error::SnapshotError;
    use crate::sim::{Command, Direction, execute};

    fn played_game() -> GameState {
        let mut state = GameState::new(4, WINNING_VALUE, 77).unwrap();
        for dir in [Direction::Left, Direction::Down, Direction::Right, Direction::Up]
            .iter()
            .cycle()
            .take(12)
        {
            execute(&mut state, Command::Move(*dir));
        }
        state
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = MemoryStore::new();
        let state = played_game();
        SavedGame::save(&state, &mut store).unwrap();
        let restored = SavedGame::load(&store).unwrap().unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_restored_game_continues_identically() {
        let mut store = MemoryStore::new();
        let mut original = played_game();
        SavedGame::save(&original, &mut store).unwrap();
        let mut restored = SavedGame::load(&store).unwrap().unwrap();

        for dir in Direction::ALL.iter().cycle().take(20) {
            execute(&mut original, Command::Move(*dir));
            execute(&mut restored, Command::Move(*dir));
        }
        assert_eq!(original, restored);
    }

    #[test]
    fn test_load_missing() {
        let store = MemoryStore::new();
        assert_eq!(SavedGame::load(&store).unwrap(), None);
    }

    #[test]
    fn test_load_rejects_bad_snapshot() {
        let state = played_game();

        let mut saved = SavedGame::from_state(&state);
        saved.board.pop();
        assert!(matches!(
            saved.into_state(),
            Err(StoreError::Snapshot(SnapshotError::NotSquare { found: 15 }))
        ));

        let mut saved = SavedGame::from_state(&state);
        saved.board[3].value = Some(3);
        assert!(matches!(
            saved.into_state(),
            Err(StoreError::Snapshot(SnapshotError::NotPowerOfTwo { position: 3, value: 3 }))
        ));

        let mut saved = SavedGame::from_state(&state);
        saved.board[5].position = 4;
        assert!(matches!(
            saved.into_state(),
            Err(StoreError::Snapshot(SnapshotError::DuplicatePosition(4)))
        ));

        let mut saved = SavedGame::from_state(&state);
        saved.version = 99;
        assert!(matches!(saved.into_state(), Err(StoreError::Version(99))));

        let mut saved = SavedGame::from_state(&state);
        saved.winning_value = 100;
        assert!(matches!(saved.into_state(), Err(StoreError::Settings(_))));
    }

    #[test]
    fn test_load_or_new_falls_back() {
        let settings = Settings::default();
        let mut store = MemoryStore::new();
        store.set(BOARD_KEY, r#"{"version":1,"board":[]}"#).unwrap();
        let state = SavedGame::load_or_new(&store, &settings, 5).unwrap();
        assert_eq!(state.grid.size(), settings.board_size);
        assert_eq!(state.grid.tile_count(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_load_or_new_resumes_matching_size() {
        let settings = Settings::default();
        let mut store = MemoryStore::new();
        let state = played_game();
        SavedGame::save(&state, &mut store).unwrap();
        assert_eq!(SavedGame::load_or_new(&store, &settings, 5).unwrap(), state);

        let bigger = Settings {
            board_size: 6,
            ..Settings::default()
        };
        let fresh = SavedGame::load_or_new(&store, &bigger, 5).unwrap();
        assert_eq!(fresh.grid.size(), 6);
        assert_eq!(fresh.grid.tile_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::new();
        SavedGame::save(&played_game(), &mut store).unwrap();
        SavedGame::clear(&mut store).unwrap();
        assert_eq!(SavedGame::load(&store).unwrap(), None);
    }
}
