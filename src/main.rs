//! Tile Merge entry point
//!
//! Terminal driver: reads one command per line, feeds it to the engine,
//! and persists the game after every committed move.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use tile_merge::highscores::HighScoreEntry;
use tile_merge::sim::{Command, Direction, GameEvent, GamePhase, GameState, execute};
use tile_merge::{FileStore, HighScores, SavedGame, Settings};

#[derive(Parser, Debug)]
#[command(name = "tile-merge", about = "Slide and merge tiles until you reach the target")]
struct Args {
    /// Board size (4-8); saved as the new default
    #[arg(long)]
    size: Option<usize>,
    /// Winning tile value
    #[arg(long)]
    target: Option<u32>,
    /// RNG seed for a new game (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Directory holding the saved game, settings and high scores
    #[arg(long, default_value = ".tile-merge")]
    save_dir: PathBuf,
}

/// Input from one line of the terminal
enum Input {
    Play(Command),
    Resize(usize),
    Scores,
    Quit,
    Help,
}

fn parse_input(line: &str) -> Option<Input> {
    let mut parts = line.split_whitespace();
    let word = parts.next()?;
    match word.to_lowercase().as_str() {
        "q" | "quit" => Some(Input::Quit),
        "?" | "help" => Some(Input::Help),
        "r" | "restart" => Some(Input::Play(Command::Restart)),
        "c" | "continue" => Some(Input::Play(Command::Continue)),
        "t" | "top" | "scores" => Some(Input::Scores),
        "n" | "size" => parts.next()?.parse().ok().map(Input::Resize),
        _ => Direction::from_key(word).map(|d| Input::Play(Command::Move(d))),
    }
}

/// A game session: engine state plus everything persisted beside it
struct Session {
    state: GameState,
    settings: Settings,
    scores: HighScores,
    store: FileStore,
}

impl Session {
    fn open(args: &Args) -> anyhow::Result<Self> {
        let mut store = FileStore::open(&args.save_dir)
            .with_context(|| format!("opening save directory {}", args.save_dir.display()))?;

        let mut settings = Settings::load(&store);
        if let Some(size) = args.size {
            settings.set_board_size(size)?;
        }
        if let Some(target) = args.target {
            settings.winning_value = target;
        }
        settings.validate()?;
        settings.save(&mut store)?;

        let scores = HighScores::load(&store);
        let seed = args.seed.unwrap_or_else(rand::random);
        let mut state = SavedGame::load_or_new(&store, &settings, seed)?;
        state.winning_value = settings.winning_value;
        state.high_score = state.high_score.max(scores.best());

        Ok(Self {
            state,
            settings,
            scores,
            store,
        })
    }

    fn play(&mut self, command: Command) -> anyhow::Result<()> {
        let finished = HighScoreEntry::from_state(&self.state);
        let was_over = self.state.over;
        let report = execute(&mut self.state, command);

        for event in &report.events {
            match event {
                GameEvent::Won { score } => {
                    println!("You reached {}! Score {score}. Type 'c' to keep going.", self.state.winning_value)
                }
                GameEvent::GameOver { score } => {
                    println!("Game over. Final score {score}.");
                    self.finish_game(HighScoreEntry::from_state(&self.state))?;
                }
                GameEvent::Restarted => {
                    // An abandoned game still counts toward the leaderboard
                    if !was_over {
                        self.finish_game(finished.clone())?;
                    }
                    SavedGame::clear(&mut self.store)?;
                }
                _ => {}
            }
        }

        if report.committed() {
            if self.scores.record(self.state.high_score) {
                self.scores.save(&mut self.store)?;
            }
            SavedGame::save(&self.state, &mut self.store)?;
        }
        Ok(())
    }

    fn resize(&mut self, size: usize) -> anyhow::Result<()> {
        self.settings.set_board_size(size)?;
        self.settings.save(&mut self.store)?;
        if !self.state.over {
            self.finish_game(HighScoreEntry::from_state(&self.state))?;
        }
        self.state.resize(size)?;
        SavedGame::clear(&mut self.store)?;
        SavedGame::save(&self.state, &mut self.store)?;
        Ok(())
    }

    fn finish_game(&mut self, entry: HighScoreEntry) -> anyhow::Result<()> {
        if let Some(rank) = self.scores.add_entry(entry) {
            println!("New leaderboard entry at #{rank}");
        }
        self.scores.save(&mut self.store)?;
        Ok(())
    }

    fn print(&self) {
        let phase = match self.state.phase() {
            GamePhase::Playing => "",
            GamePhase::Won => " [won]",
            GamePhase::ContinuedPlaying => " [playing on]",
            GamePhase::Over => " [game over]",
        };
        println!(
            "\nScore: {}  Best: {}{phase}",
            self.state.score, self.state.high_score
        );
        if !self.state.over {
            if let Some(rank) = self.scores.potential_rank(self.state.score) {
                println!("Ending now would place #{rank} on the leaderboard");
            }
        }
        print!("{}", self.state.grid);
    }

    fn print_scores(&self) {
        if self.scores.is_empty() {
            println!("No finished games yet");
            return;
        }
        println!("Best score: {}", self.scores.best());
        for (i, entry) in self.scores.entries.iter().enumerate() {
            println!(
                "{:>2}. {:>8}  {}x{}  tile {}  {} moves",
                i + 1,
                entry.score,
                entry.board_size,
                entry.board_size,
                entry.highest_tile,
                entry.moves
            );
        }
    }
}

fn print_help() {
    println!("Moves: w/a/s/d, h/j/k/l or up/down/left/right");
    println!("c: continue after winning   r: restart   n <size>: new board size");
    println!("t: leaderboard   q: quit");
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Tile Merge starting (save dir {})", args.save_dir.display());

    let mut session = Session::open(&args)?;
    print_help();
    session.print();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        match parse_input(&line) {
            Some(Input::Quit) => break,
            Some(Input::Help) | None => print_help(),
            Some(Input::Play(command)) => session.play(command)?,
            Some(Input::Resize(size)) => {
                if let Err(e) = session.resize(size) {
                    println!("{e}");
                }
            }
            Some(Input::Scores) => {
                session.print_scores();
                continue;
            }
        }
        session.print();
        stdout.flush()?;
    }

    log::info!("Tile Merge exiting");
    Ok(())
}
