//! Error types for puzzle configuration and generation.
//!
//! Only structural failures live here. Rejected player moves are ordinary
//! [`crate::session::ClickOutcome`] values and validator findings are
//! [`crate::validator::Violation`] values; neither is raised as an error.

use crate::validator::Violation;
use thiserror::Error;

/// A [`crate::config::PuzzleConfig`] that can never yield a puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    EmptyGrid,

    #[error("tree count {trees} is below grid size {size}: every row needs at least one tent")]
    TooFewTrees { trees: usize, size: usize },

    #[error("tree count {trees} exceeds {max}, the most non-adjacent trees a {size}x{size} grid can hold")]
    TooManyTrees { trees: usize, size: usize, max: usize },

    #[error("max errors must be at least 1")]
    ZeroMaxErrors,

    #[error("max attempts must be at least 1")]
    ZeroMaxAttempts,
}

/// The generation pipeline could not produce a validated grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("failed to generate a valid grid after {attempts} attempts (last failure: {last})")]
    Exhausted { attempts: u32, last: Violation },

    #[error("invalid puzzle configuration: {0}")]
    Config(#[from] ConfigError),
}
