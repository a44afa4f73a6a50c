//! The tile grid
//!
//! An N×N board stored row-major. Every cell keeps the position it was given
//! at creation; moves only copy values between cells.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::collapse::merge;
use crate::error::{GridError, SnapshotError};

/// One board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Fixed display position (row-major index)
    pub position: usize,
    /// Tile value, `None` when empty
    pub value: Option<u32>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Text label for renderers (empty string for an empty cell)
    pub fn label(&self) -> String {
        self.value.map(|v| v.to_string()).unwrap_or_default()
    }
}

/// Square board of cells
///
/// Serializes as its snapshot: the ordered list of `{position, value}`,
/// empties included. Deserializing validates the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

/// Create an empty `size`×`size` grid
pub fn create_grid(size: usize) -> Result<Grid, GridError> {
    if size == 0 {
        return Err(GridError::InvalidSize(size));
    }
    let cells = (0..size * size)
        .map(|position| Cell {
            position,
            value: None,
        })
        .collect();
    Ok(Grid { size, cells })
}

/// True if at least one move in some direction would change the grid
///
/// Any empty cell, or any two orthogonal neighbours that would merge.
pub fn can_move(grid: &Grid) -> bool {
    let n = grid.size;
    for row in 0..n {
        for col in 0..n {
            let Some(value) = grid.value_at(row, col) else {
                return true;
            };
            // Right and down cover every adjacent pair once; left/up are the
            // same pairs seen from the other side.
            let mergeable = |other: Option<u32>| other.and_then(|o| merge(value, o)).is_some();
            let right = col + 1 < n && mergeable(grid.value_at(row, col + 1));
            let down = row + 1 < n && mergeable(grid.value_at(row + 1, col));
            if right || down {
                return true;
            }
        }
    }
    false
}

impl Grid {
    /// Build a grid from row-major values, `0` meaning empty
    pub fn from_values(size: usize, values: &[u32]) -> Result<Self, SnapshotError> {
        let cells = values
            .iter()
            .enumerate()
            .map(|(position, &v)| Cell {
                position,
                value: (v != 0).then_some(v),
            })
            .collect::<Vec<_>>();
        let grid = Self::from_snapshot(cells)?;
        if grid.size != size {
            return Err(SnapshotError::CellCount {
                expected: size * size,
                found: values.len(),
            });
        }
        Ok(grid)
    }

    /// Restore a grid from a persisted snapshot
    ///
    /// Cells may arrive in any order; they are placed by position.
    pub fn from_snapshot(snapshot: Vec<Cell>) -> Result<Self, SnapshotError> {
        let found = snapshot.len();
        let size = (found as f64).sqrt().round() as usize;
        if size == 0 || size * size != found {
            return Err(SnapshotError::NotSquare { found });
        }

        let mut seen = HashSet::with_capacity(found);
        let mut cells = vec![
            Cell {
                position: 0,
                value: None
            };
            found
        ];
        for cell in snapshot {
            if cell.position >= found {
                return Err(SnapshotError::PositionOutOfRange {
                    position: cell.position,
                    cells: found,
                });
            }
            if !seen.insert(cell.position) {
                return Err(SnapshotError::DuplicatePosition(cell.position));
            }
            if let Some(value) = cell.value {
                if value < 2 || !value.is_power_of_two() {
                    return Err(SnapshotError::NotPowerOfTwo {
                        position: cell.position,
                        value,
                    });
                }
            }
            cells[cell.position] = cell;
        }

        Ok(Self { size, cells })
    }

    /// Ordered list of `{position, value}` for persistence
    pub fn snapshot(&self) -> Vec<Cell> {
        self.cells.clone()
    }

    /// Board edge length
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Value at a row-major index
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below `size * size`.
    #[inline]
    pub fn value(&self, index: usize) -> Option<u32> {
        self.cells[index].value
    }

    /// Value at `row`, `col`; panics outside the board like [`Grid::value`]
    #[inline]
    pub fn value_at(&self, row: usize, col: usize) -> Option<u32> {
        self.value(row * self.size + col)
    }

    #[inline]
    pub(crate) fn set_value(&mut self, index: usize, value: Option<u32>) {
        self.cells[index].value = value;
    }

    /// Same-size grid with every cell emptied
    pub fn cleared(&self) -> Grid {
        let cells = self
            .cells
            .iter()
            .map(|c| Cell {
                position: c.position,
                value: None,
            })
            .collect();
        Grid {
            size: self.size,
            cells,
        }
    }

    /// Positions of all empty cells, ascending
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .filter(|c| c.is_empty())
            .map(|c| c.position)
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Number of tiles on the board
    pub fn tile_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    /// Largest tile value, 0 on an empty board
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().filter_map(|c| c.value).max().unwrap_or(0)
    }

    /// Value-wise comparison, ignoring anything but cell contents
    pub fn same_values(&self, other: &Grid) -> bool {
        self.size == other.size
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.value == b.value)
    }

    /// Rows of values, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }
}

impl TryFrom<Vec<Cell>> for Grid {
    type Error = SnapshotError;

    fn try_from(snapshot: Vec<Cell>) -> Result<Self, Self::Error> {
        Grid::from_snapshot(snapshot)
    }
}

impl From<Grid> for Vec<Cell> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divider = "-".repeat(self.size * 7 + self.size - 1);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f, "{divider}")?;
            }
            let line = row
                .iter()
                .map(|c| format!("{:^7}", c.label()))
                .collect::<Vec<_>>()
                .join("|");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_grid_positions_row_major() {
        let grid = create_grid(4).unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.cells().len(), 16);
        for (i, cell) in grid.cells().iter().enumerate() {
            assert_eq!(cell.position, i);
            assert!(cell.is_empty());
        }
    }

    #[test]
    fn test_create_grid_rejects_zero() {
        assert_eq!(create_grid(0), Err(GridError::InvalidSize(0)));
    }

    #[test]
    fn test_can_move_with_empty_cell() {
        let grid = Grid::from_values(2, &[2, 4, 8, 0]).unwrap();
        assert!(can_move(&grid));
    }

    #[test]
    fn test_can_move_false_on_locked_board() {
        #[rustfmt::skip]
        let grid = Grid::from_values(4, &[
            2, 4, 2, 4,
            4, 2, 4, 2,
            2, 4, 2, 4,
            4, 2, 4, 2,
        ]).unwrap();
        assert!(!can_move(&grid));
    }

    #[test]
    fn test_can_move_true_with_one_equal_pair() {
        #[rustfmt::skip]
        let horizontal = Grid::from_values(4, &[
            2, 4, 2, 4,
            4, 2, 4, 2,
            2, 4, 2, 4,
            4, 2, 2, 8,
        ]).unwrap();
        assert!(can_move(&horizontal));

        #[rustfmt::skip]
        let vertical = Grid::from_values(4, &[
            2, 4, 2, 4,
            4, 2, 4, 2,
            2, 4, 2, 4,
            4, 2, 4, 4,
        ]).unwrap();
        assert!(can_move(&vertical));
    }

    #[test]
    #[should_panic]
    fn test_value_out_of_range_panics() {
        let grid = create_grid(2).unwrap();
        let _ = grid.value(4);
    }

    #[test]
    fn test_can_move_false_when_only_largest_tiles_pair() {
        let top = 1u32 << 31;
        let grid = Grid::from_values(2, &[top, top, 4, 4]).unwrap();
        assert!(can_move(&grid));
        let grid = Grid::from_values(2, &[top, top, top, top]).unwrap();
        assert!(!can_move(&grid));
    }

    #[test]
    fn test_snapshot_round_trip_keeps_empties() {
        let grid = Grid::from_values(2, &[2, 0, 0, 1024]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.contains("null"));
        let restored: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, grid);
    }

    #[test]
    fn test_snapshot_placed_by_position() {
        let snapshot = vec![
            Cell { position: 3, value: Some(8) },
            Cell { position: 0, value: Some(2) },
            Cell { position: 2, value: None },
            Cell { position: 1, value: None },
        ];
        let grid = Grid::from_snapshot(snapshot).unwrap();
        assert_eq!(grid.value(0), Some(2));
        assert_eq!(grid.value(3), Some(8));
    }

    #[test]
    fn test_snapshot_rejects_malformed() {
        let three = vec![Cell { position: 0, value: None }; 3];
        assert_eq!(
            Grid::from_snapshot(three),
            Err(SnapshotError::NotSquare { found: 3 })
        );

        let dup = vec![
            Cell { position: 0, value: None },
            Cell { position: 0, value: None },
            Cell { position: 2, value: None },
            Cell { position: 3, value: None },
        ];
        assert_eq!(
            Grid::from_snapshot(dup),
            Err(SnapshotError::DuplicatePosition(0))
        );

        let odd = vec![
            Cell { position: 0, value: Some(6) },
            Cell { position: 1, value: None },
            Cell { position: 2, value: None },
            Cell { position: 3, value: None },
        ];
        assert_eq!(
            Grid::from_snapshot(odd),
            Err(SnapshotError::NotPowerOfTwo { position: 0, value: 6 })
        );

        let out_of_range = vec![
            Cell { position: 0, value: None },
            Cell { position: 1, value: None },
            Cell { position: 2, value: None },
            Cell { position: 9, value: None },
        ];
        assert_eq!(
            Grid::from_snapshot(out_of_range),
            Err(SnapshotError::PositionOutOfRange { position: 9, cells: 4 })
        );

        assert!(serde_json::from_str::<Grid>(r#"[{"position":0,"value":1}]"#).is_err());
    }

    #[test]
    fn test_from_values_checks_size() {
        assert_eq!(
            Grid::from_values(3, &[0, 0, 0, 0]),
            Err(SnapshotError::CellCount { expected: 9, found: 4 })
        );
    }

    #[test]
    fn test_stats() {
        let grid = Grid::from_values(2, &[2, 0, 64, 0]).unwrap();
        assert_eq!(grid.empty_positions(), vec![1, 3]);
        assert_eq!(grid.empty_count(), 2);
        assert_eq!(grid.tile_count(), 2);
        assert_eq!(grid.highest_tile(), 64);
        assert_eq!(create_grid(3).unwrap().highest_tile(), 0);
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_values(2, &[2, 0, 0, 2048]).unwrap();
        let text = grid.to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("2048"));
    }
}
