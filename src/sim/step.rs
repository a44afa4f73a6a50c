//! One turn of play
//!
//! Applies a move to the committed grid, spawns a tile when the grid changed,
//! and advances score, win and game-over state.

use rand::Rng;

use super::direction::Direction;
use super::grid::can_move;
use super::moves::apply_move;
use super::spawn::{Spawn, place_random_tile};
use super::state::GameState;

/// Player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Slide tiles
    Move(Direction),
    /// Dismiss the win notice
    Continue,
    /// Start a fresh game
    Restart,
}

/// What happened to a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Game over or win notice showing; nothing was evaluated
    Rejected,
    /// The move would not change any cell; nothing was committed
    Unchanged,
    /// The candidate grid replaced the committed one
    Committed,
}

/// Notable things that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    TileSpawned(Spawn),
    /// The winning value was reached for the first time this game
    Won { score: u64 },
    /// No legal move remains
    GameOver { score: u64 },
    /// Win notice dismissed
    Continued,
    Restarted,
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub outcome: StepOutcome,
    pub score_delta: u64,
    pub events: Vec<GameEvent>,
}

impl StepReport {
    fn new(outcome: StepOutcome) -> Self {
        Self {
            outcome,
            score_delta: 0,
            events: Vec::new(),
        }
    }

    pub fn committed(&self) -> bool {
        self.outcome == StepOutcome::Committed
    }
}

/// Apply `direction` to the game, drawing spawn randomness from `rng`
pub fn step<R: Rng + ?Sized>(state: &mut GameState, direction: Direction, rng: &mut R) -> StepReport {
    if !state.accepts_moves() {
        log::debug!("Move {} rejected in phase {:?}", direction.as_str(), state.phase());
        return StepReport::new(StepOutcome::Rejected);
    }

    let outcome = apply_move(&state.grid, direction, state.winning_value);
    if !outcome.changed {
        return StepReport::new(StepOutcome::Unchanged);
    }

    let mut report = StepReport::new(StepOutcome::Committed);
    report.score_delta = outcome.score_delta;

    state.grid = outcome.grid;
    state.moves += 1;
    state.add_score(outcome.score_delta);
    if let Some(spawn) = place_random_tile(&mut state.grid, rng) {
        report.events.push(GameEvent::TileSpawned(spawn));
    }
    log::debug!(
        "Move {} committed: +{} (score {})",
        direction.as_str(),
        outcome.score_delta,
        state.score
    );

    // Sticky for the rest of the game; continuing never re-raises it
    if outcome.reached_target && !state.won {
        state.won = true;
        log::info!("Reached {} with score {}", state.winning_value, state.score);
        report.events.push(GameEvent::Won { score: state.score });
    }

    if !can_move(&state.grid) {
        state.over = true;
        log::info!("Game over with score {} after {} moves", state.score, state.moves);
        report.events.push(GameEvent::GameOver { score: state.score });
    }

    report
}

/// Run a command against the game, using the game's own RNG
pub fn execute(state: &mut GameState, command: Command) -> StepReport {
    match command {
        Command::Move(direction) => {
            let mut rng = state.rng_state.next_rng();
            step(state, direction, &mut rng)
        }
        Command::Continue => {
            if state.continue_after_win() {
                let mut report = StepReport::new(StepOutcome::Committed);
                report.events.push(GameEvent::Continued);
                report
            } else {
                StepReport::new(StepOutcome::Rejected)
            }
        }
        Command::Restart => {
            state.restart();
            let mut report = StepReport::new(StepOutcome::Committed);
            report.events.push(GameEvent::Restarted);
            report
        }
    }
}
