//! Directional moves
//!
//! A move reads every line in slide order, collapses it, and writes the
//! result back in the same order. No randomness, no spawning.

use super::collapse::collapse_line;
use super::direction::Direction;
use super::grid::Grid;

/// Result of applying a move to a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Candidate grid after sliding and merging
    pub grid: Grid,
    /// Whether any cell value differs from the input
    pub changed: bool,
    /// Sum of merge gains over all lines
    pub score_delta: u64,
    /// Whether some line now holds the winning value
    pub reached_target: bool,
}

/// Slide and merge every line of `grid` toward `direction`
pub fn apply_move(grid: &Grid, direction: Direction, winning_value: u32) -> MoveOutcome {
    let size = grid.size();
    let mut next = grid.clone();
    let mut score_delta = 0;
    let mut reached_target = false;
    let mut line = Vec::with_capacity(size);

    for line_idx in 0..size {
        line.clear();
        line.extend(
            direction
                .line_indices(size, line_idx)
                .filter_map(|idx| grid.value(idx)),
        );

        let collapsed = collapse_line(&line, winning_value);
        score_delta += collapsed.score;
        reached_target |= collapsed.reached_target;

        for (step, idx) in direction.line_indices(size, line_idx).enumerate() {
            next.set_value(idx, collapsed.values.get(step).copied());
        }
    }

    let changed = !next.same_values(grid);
    MoveOutcome {
        grid: next,
        changed,
        score_delta,
        reached_target,
    }
}
