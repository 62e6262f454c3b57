//! Command-line options shared by the binaries.
use crate::config::{PuzzleConfig, DEFAULT_GRID_SIZE, DEFAULT_MAX_ERRORS, DEFAULT_TREE_COUNT};
use crate::solver::SearchStrategy;
use clap::Args;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Attempt budget the binaries use unless told otherwise.
pub const CLI_MAX_ATTEMPTS: u32 = 100;

/// Puzzle shape and generation options.
#[derive(Args, Debug, Clone)]
pub struct PuzzleArgs {
    /// Grid edge length
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    pub size: usize,

    /// Number of trees (and tents)
    #[arg(short, long, default_value_t = DEFAULT_TREE_COUNT)]
    pub trees: usize,

    /// Rejected placements before a reset
    #[arg(short = 'e', long, default_value_t = DEFAULT_MAX_ERRORS)]
    pub max_errors: u32,

    /// Generation attempts before giving up
    #[arg(short, long, default_value_t = CLI_MAX_ATTEMPTS)]
    pub attempts: u32,

    /// Tent search strategy
    #[arg(long, value_enum, default_value_t = SearchStrategy::Exhaustive)]
    pub strategy: SearchStrategy,

    /// Seed for reproducible puzzles (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl PuzzleArgs {
    pub fn config(&self) -> PuzzleConfig {
        PuzzleConfig::new(self.size, self.trees)
            .with_max_errors(self.max_errors)
            .with_max_attempts(self.attempts)
            .with_strategy(self.strategy)
    }

    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}
