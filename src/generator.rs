//! Puzzle generation pipeline.
//!
//! One attempt runs tree placement, quota calculation and the tent search,
//! then hands the result to the validator. [`generate`] repeats attempts with
//! fresh randomness until one validates or the configured attempt budget is
//! spent.
use crate::config::PuzzleConfig;
use crate::engine::{touches_any, Coord, Grid};
use crate::error::GenerationError;
use crate::solver::search_tents;
use crate::validator::validate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::{debug, error, info, warn};

/// Per-row and per-column tent quotas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quotas {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

/// A validated grid and the attempt that produced it (1-based).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generated {
    pub grid: Grid,
    pub attempts: u32,
}

/// Scatters up to `tree_count` trees, no two king-move adjacent.
///
/// Every cell is visited once in shuffled order and kept if it does not touch
/// a tree already kept. If the shuffled order runs out first, fewer trees are
/// returned; the validator rejects such a grid and the pipeline retries.
pub fn place_trees<R: Rng + ?Sized>(size: usize, tree_count: usize, rng: &mut R) -> BTreeSet<Coord> {
    let mut cells: Vec<Coord> = (0..size)
        .flat_map(|r| (0..size).map(move |c| (r, c)))
        .collect();
    cells.shuffle(rng);

    let mut trees = BTreeSet::new();
    for coord in cells {
        if trees.len() == tree_count {
            break;
        }
        if !touches_any(coord, &trees) {
            trees.insert(coord);
        }
    }

    if trees.len() < tree_count {
        debug!(placed = trees.len(), wanted = tree_count, "tree placement ran out of cells");
    }
    trees
}

/// Derives tent quotas for a grid holding `tree_count` trees.
///
/// Every row and column starts at one tent. Random rows are then raised (or
/// lowered, never below one) until the row quotas add up to `tree_count`.
/// Column quotas stay at one.
///
/// A `tree_count` below `size` cannot be reached without emptying a row; the
/// all-ones quotas are returned instead and the validator rejects the grid.
///
/// # Examples
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use tents_puzzle::generator::calculate_requirements;
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let quotas = calculate_requirements(5, 7, &mut rng);
/// assert_eq!(quotas.rows.iter().sum::<usize>(), 7);
/// assert!(quotas.rows.iter().all(|&q| q >= 1));
/// assert_eq!(quotas.cols, vec![1; 5]);
/// ```
pub fn calculate_requirements<R: Rng + ?Sized>(size: usize, tree_count: usize, rng: &mut R) -> Quotas {
    let mut rows = vec![1; size];
    let cols = vec![1; size];
    if size == 0 {
        return Quotas { rows, cols };
    }

    let mut total = size;
    while total != tree_count {
        let row = rng.gen_range(0..size);
        if total < tree_count {
            rows[row] += 1;
            total += 1;
        } else if rows[row] > 1 {
            rows[row] -= 1;
            total -= 1;
        } else if rows.iter().all(|&q| q == 1) {
            warn!(
                trees = tree_count,
                size, "tree count below grid size, keeping one tent per row"
            );
            break;
        }
    }

    Quotas { rows, cols }
}

/// Runs one generation attempt. The returned grid may break the rules.
pub fn attempt_grid<R: Rng + ?Sized>(config: &PuzzleConfig, rng: &mut R) -> Grid {
    let size = config.grid_size;
    let trees = place_trees(size, config.tree_count, rng);
    let quotas = calculate_requirements(size, trees.len(), rng);
    let search = search_tents(size, &trees, &quotas.rows, &quotas.cols, config.strategy, rng);
    debug!(end = ?search.end, tents = search.tents.len(), "tent search finished");
    Grid::new(size, trees, search.tents, quotas.rows, quotas.cols)
}

/// Generates a validated grid, retrying up to `config.max_attempts` times.
///
/// # Errors
/// * [`GenerationError::Config`] if `config` cannot describe a puzzle.
/// * [`GenerationError::Exhausted`] if no attempt validated; carries the
///   last validator finding.
pub fn generate<R: Rng + ?Sized>(config: &PuzzleConfig, rng: &mut R) -> Result<Generated, GenerationError> {
    config.validate()?;
    if !config.quotas_can_balance() {
        warn!(
            trees = config.tree_count,
            size = config.grid_size,
            "column quotas are fixed at one per column; grids with this tree count cannot validate"
        );
    }

    let mut attempt = 0;
    loop {
        attempt += 1;
        let grid = attempt_grid(config, rng);
        match validate(&grid, config.tree_count) {
            Ok(()) => {
                info!(
                    attempt,
                    trees = grid.trees().len(),
                    outcome = "success",
                    "Generated new grid"
                );
                return Ok(Generated {
                    grid,
                    attempts: attempt,
                });
            }
            Err(violation) if attempt >= config.max_attempts => {
                error!(
                    attempt,
                    reason = %violation,
                    critical = true,
                    "Failed to generate valid grid after multiple attempts"
                );
                return Err(GenerationError::Exhausted {
                    attempts: attempt,
                    last: violation,
                });
            }
            Err(violation) => {
                warn!(attempt, reason = %violation, "Generated invalid layout");
            }
        }
    }
}

/// Generates a validated grid. See [`generate`].
pub fn generate_grid<R: Rng + ?Sized>(config: &PuzzleConfig, rng: &mut R) -> Result<Grid, GenerationError> {
    generate(config, rng).map(|generated| generated.grid)
}
