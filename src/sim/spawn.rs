//! Random tile spawning

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::FOUR_PROBABILITY;

/// A tile placed by the spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub position: usize,
    pub value: u32,
}

/// 2 (90%) or 4 (10%)
pub fn random_tile_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.random_bool(FOUR_PROBABILITY) { 4 } else { 2 }
}

/// Place one random tile into a uniformly chosen empty cell
///
/// Returns `None` and leaves the grid untouched when it is full.
pub fn place_random_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<Spawn> {
    let empty = grid.empty_positions();
    if empty.is_empty() {
        return None;
    }
    let position = empty[rng.random_range(0..empty.len())];
    let value = random_tile_value(rng);
    grid.set_value(position, Some(value));
    Some(Spawn { position, value })
}

/// Return a copy of `grid` with one random tile added (no-op when full)
pub fn spawn_tile<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Grid {
    let mut next = grid.clone();
    place_random_tile(&mut next, rng);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::create_grid;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_fills_board() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut grid = create_grid(4).unwrap();
        for expected_empty in (0..16).rev() {
            grid = spawn_tile(&grid, &mut rng);
            assert_eq!(grid.empty_count(), expected_empty);
        }
        assert!(grid.cells().iter().all(|c| matches!(c.value, Some(2) | Some(4))));
    }

    #[test]
    fn test_spawn_on_full_board_is_noop() {
        let mut rng = Pcg32::seed_from_u64(1);
        let full = Grid::from_values(2, &[2, 4, 8, 16]).unwrap();
        assert_eq!(spawn_tile(&full, &mut rng), full);
        let mut copy = full.clone();
        assert_eq!(place_random_tile(&mut copy, &mut rng), None);
    }

    #[test]
    fn test_spawn_never_overwrites() {
        let mut rng = Pcg32::seed_from_u64(99);
        let grid = Grid::from_values(3, &[8, 8, 8, 8, 0, 8, 8, 8, 0]).unwrap();
        for _ in 0..200 {
            let mut next = grid.clone();
            let spawn = place_random_tile(&mut next, &mut rng).unwrap();
            assert!(spawn.position == 4 || spawn.position == 8);
            assert_eq!(next.value(spawn.position), Some(spawn.value));
            assert_eq!(next.empty_count(), 1);
        }
    }

    #[test]
    fn test_spawn_value_distribution() {
        let mut rng = Pcg32::seed_from_u64(2048);
        let trials = 20_000;
        let fours = (0..trials)
            .filter(|_| random_tile_value(&mut rng) == 4)
            .count();
        let ratio = fours as f64 / trials as f64;
        assert!((0.08..0.12).contains(&ratio), "four ratio {ratio}");
    }

    #[test]
    fn test_spawn_position_is_uniform() {
        let mut rng = Pcg32::seed_from_u64(3);
        let grid = create_grid(2).unwrap();
        let mut counts = [0usize; 4];
        for _ in 0..8_000 {
            let mut next = grid.clone();
            let spawn = place_random_tile(&mut next, &mut rng).unwrap();
            counts[spawn.position] += 1;
        }
        for count in counts {
            assert!((1_600..2_400).contains(&count), "counts {counts:?}");
        }
    }
}
