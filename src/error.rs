//! Error types
//!
//! One enum per concern: grid construction, snapshot validation, storage.

use std::io;

/// Invalid grid configuration
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid board size {0}: must be at least 1")]
    InvalidSize(usize),
    #[error("board size {0} is not one of the selectable sizes")]
    UnsupportedSize(usize),
    #[error("winning value {0} must be a power of two of at least 4")]
    InvalidWinningValue(u32),
}

/// A persisted snapshot that cannot be turned back into a grid
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot has {found} cells, which is not a square board")]
    NotSquare { found: usize },
    #[error("snapshot has {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },
    #[error("cell {position} holds {value}, which is not a power of two >= 2")]
    NotPowerOfTwo { position: usize, value: u32 },
    #[error("position {0} appears more than once")]
    DuplicatePosition(usize),
    #[error("position {position} is outside a board of {cells} cells")]
    PositionOutOfRange { position: usize, cells: usize },
}

/// Key/value store failures
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("invalid settings: {0}")]
    Settings(#[from] GridError),
    #[error("unsupported save version {0}")]
    Version(u32),
}
