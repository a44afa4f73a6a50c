//! Game settings and preferences
//!
//! Persisted separately from the saved game, under their own store key.

use serde::{Deserialize, Serialize};

use crate::consts::{BOARD_SIZES, DEFAULT_BOARD_SIZE, WINNING_VALUE};
use crate::error::{GridError, StoreError};
use crate::persistence::{KeyValueStore, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Board edge length, one of `BOARD_SIZES`
    pub board_size: usize,
    /// Tile value that wins the game
    #[serde(default = "default_winning_value")]
    pub winning_value: u32,
}

fn default_winning_value() -> u32 {
    WINNING_VALUE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            winning_value: WINNING_VALUE,
        }
    }
}

impl Settings {
    /// Store key
    pub const STORAGE_KEY: &'static str = "settings";

    /// Check the board size is selectable and the target is reachable
    pub fn validate(&self) -> Result<(), GridError> {
        if self.board_size == 0 {
            return Err(GridError::InvalidSize(self.board_size));
        }
        if !BOARD_SIZES.contains(&self.board_size) {
            return Err(GridError::UnsupportedSize(self.board_size));
        }
        if self.winning_value < 4 || !self.winning_value.is_power_of_two() {
            return Err(GridError::InvalidWinningValue(self.winning_value));
        }
        Ok(())
    }

    /// Change the board size; the caller restarts the game
    pub fn set_board_size(&mut self, size: usize) -> Result<(), GridError> {
        let candidate = Self {
            board_size: size,
            ..self.clone()
        };
        candidate.validate()?;
        self.board_size = size;
        Ok(())
    }

    /// Load settings, falling back to defaults when missing or invalid
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let loaded = load_json::<Self, S>(store, Self::STORAGE_KEY).and_then(|settings| match settings {
            Some(settings) => {
                settings.validate()?;
                Ok(Some(settings))
            }
            None => Ok(None),
        });
        match loaded {
            Ok(Some(settings)) => {
                log::info!("Loaded settings ({}x{})", settings.board_size, settings.board_size);
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
