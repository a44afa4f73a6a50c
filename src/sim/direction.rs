//! Move directions
//!
//! A direction is an axis plus a traversal order. Every move reads each line
//! in the order its tiles slide, so left/up walk forward and right/down walk
//! backward over the native row/column addressing.

use serde::{Deserialize, Serialize};

/// Which kind of line a move operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left/right moves slide along rows
    Row,
    /// Up/down moves slide along columns
    Column,
}

/// A direction to slide and merge tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Row,
            Direction::Up | Direction::Down => Axis::Column,
        }
    }

    /// True when the slide target is the far end of the line (right/down)
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    /// Cell index of the `step`-th cell of line `line`, in slide order
    #[inline]
    pub fn cell_index(self, size: usize, line: usize, step: usize) -> usize {
        let along = if self.is_reversed() { size - 1 - step } else { step };
        match self.axis() {
            Axis::Row => line * size + along,
            Axis::Column => along * size + line,
        }
    }

    /// Iterate the cell indices of line `line`, in slide order
    pub fn line_indices(self, size: usize, line: usize) -> impl Iterator<Item = usize> {
        (0..size).map(move |step| self.cell_index(size, line, step))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Map a key name to a direction
    ///
    /// Accepts browser arrow-key names, the words themselves, WASD and vi keys.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "arrowup" | "up" | "w" | "k" => Some(Direction::Up),
            "arrowdown" | "down" | "s" | "j" => Some(Direction::Down),
            "arrowleft" | "left" | "a" | "h" => Some(Direction::Left),
            "arrowright" | "right" | "d" | "l" => Some(Direction::Right),
            _ => None,
        }
    }
}
