//! # Tents Puzzle Library
//!
//! Generates and plays "tents and trees" logic puzzles. A square grid holds
//! trees; the player must place one tent per tree so that every tent shares
//! an edge with a tree, no two tents touch (diagonals included) and every
//! row and column holds its advertised number of tents.
//!
//! It is used by three binaries:
//! - `play`: interactive play on the command line.
//! - `generate`: prints one generated puzzle and its answer key.
//! - `generation_stats`: runs many seeded generations and reports how often
//!   each search strategy produces a valid grid.
//!
//! ## Modules
//! - `cli`: `clap` options shared by the binaries.
//! - `config`: `PuzzleConfig`, the grid size, tree count and limits.
//! - `engine`: the `Grid` representation, cells and adjacency helpers.
//! - `error`: configuration and generation errors.
//! - `generator`: tree placement, quota calculation and the retrying
//!   generation pipeline.
//! - `logging`: `tracing` subscriber setup shared by the binaries.
//! - `session`: `PuzzleSession`, the click-driven player state machine.
//! - `solver`: the tent search that fills a grid to its quotas.
//! - `utils`: parsing grids from string arrays.
//! - `validator`: rule checking for finished grids.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod logging;
pub mod session;
pub mod solver;
pub mod utils;
pub mod validator;
