//! Puzzle configuration.
//!
//! Everything the generator and the session need to know about the shape of
//! a puzzle travels in a [`PuzzleConfig`] value handed to their constructors.

use crate::error::ConfigError;
use crate::solver::SearchStrategy;

/// Default grid edge length.
pub const DEFAULT_GRID_SIZE: usize = 5;
/// Default number of trees (and therefore tents) per puzzle.
///
/// Column quotas are fixed at one tent per column, so a grid only validates
/// when the tree count equals the grid size.
pub const DEFAULT_TREE_COUNT: usize = 5;
/// Default number of rejected placements before a session signals a reset.
pub const DEFAULT_MAX_ERRORS: u32 = 3;
/// Default number of generation attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Shape and policy parameters of a puzzle.
///
/// # Examples
/// ```
/// use tents_puzzle::config::PuzzleConfig;
/// let config = PuzzleConfig::default();
/// assert_eq!(config.grid_size, 5);
/// assert_eq!(config.tree_count, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PuzzleConfig {
    /// Edge length N of the square grid.
    pub grid_size: usize,
    /// Number of trees K. Must satisfy `N <= K <= max_independent_trees(N)`.
    pub tree_count: usize,
    /// Rejected placements after which a click reports `reset`.
    pub max_errors: u32,
    /// Generation attempts before [`crate::error::GenerationError::Exhausted`].
    pub max_attempts: u32,
    /// How the tent search explores candidates.
    pub strategy: SearchStrategy,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            grid_size: DEFAULT_GRID_SIZE,
            tree_count: DEFAULT_TREE_COUNT,
            max_errors: DEFAULT_MAX_ERRORS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            strategy: SearchStrategy::SingleUndo,
        }
    }
}

impl PuzzleConfig {
    /// Creates a configuration for an `grid_size` x `grid_size` grid with
    /// `tree_count` trees and the default error and attempt limits.
    pub fn new(grid_size: usize, tree_count: usize) -> Self {
        PuzzleConfig {
            grid_size,
            tree_count,
            ..PuzzleConfig::default()
        }
    }

    pub fn with_max_errors(mut self, max_errors: u32) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns `true` if the row and column quota totals can agree.
    ///
    /// Row quotas add up to the tree count while column quotas add up to the
    /// grid size, so any other tree count fails validation on every attempt.
    pub fn quotas_can_balance(&self) -> bool {
        self.tree_count == self.grid_size
    }

    /// Checks that the configuration can produce a puzzle at all.
    ///
    /// Rejects a tree count below the grid size (the quota calculator could
    /// not reach it without dropping a row below one tent) and above the
    /// largest set of pairwise non-adjacent cells, where tree placement
    /// would exhaust every attempt.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.tree_count < self.grid_size {
            return Err(ConfigError::TooFewTrees {
                trees: self.tree_count,
                size: self.grid_size,
            });
        }
        let max = max_independent_trees(self.grid_size);
        if self.tree_count > max {
            return Err(ConfigError::TooManyTrees {
                trees: self.tree_count,
                size: self.grid_size,
                max,
            });
        }
        if self.max_errors == 0 {
            return Err(ConfigError::ZeroMaxErrors);
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        Ok(())
    }
}

/// Largest number of cells on an `n` x `n` grid with no two king-move adjacent.
///
/// Every 2x2 block holds at most one such cell, so the bound is `ceil(n/2)^2`.
pub fn max_independent_trees(n: usize) -> usize {
    let half = n.div_ceil(2);
    half * half
}
