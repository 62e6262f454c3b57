//! Post-hoc rule checking for finished grids.
//!
//! The checks run in a fixed order: tree count, total tent count, each row
//! quota, each column quota, tree adjacency of every tent, tent isolation.
//! [`validate`] stops at the first failure; [`validate_all`] reports every
//! failure in the same order.

use crate::engine::{is_king_adjacent, Coord, Grid};
use std::iter;
use thiserror::Error;

/// A broken puzzle rule, with enough detail to log why a grid was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("incorrect tree count: expected {expected}, found {actual}")]
    TreeCount { expected: usize, actual: usize },

    #[error("tent count mismatch: quotas require {expected}, found {actual}")]
    TentCount { expected: usize, actual: usize },

    #[error("row {row} requirement not met: expected {expected}, found {actual}")]
    RowQuota {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column {col} requirement not met: expected {expected}, found {actual}")]
    ColQuota {
        col: usize,
        expected: usize,
        actual: usize,
    },

    #[error("tent {tent:?} has no orthogonally adjacent tree")]
    TentWithoutTree { tent: Coord },

    #[error("tents {tent:?} and {other:?} are adjacent")]
    AdjacentTents { tent: Coord, other: Coord },
}

fn violations(grid: &Grid, expected_trees: usize) -> impl Iterator<Item = Violation> + '_ {
    let tree_count = iter::once(grid.trees().len())
        .filter(move |&actual| actual != expected_trees)
        .map(move |actual| Violation::TreeCount {
            expected: expected_trees,
            actual,
        });

    let tent_count = iter::once(grid.tents().len())
        .filter(move |&actual| actual != grid.row_quotas().iter().sum::<usize>())
        .map(move |actual| Violation::TentCount {
            expected: grid.row_quotas().iter().sum(),
            actual,
        });

    let rows = grid
        .row_quotas()
        .iter()
        .enumerate()
        .filter_map(move |(row, &expected)| {
            let actual = grid.tents_in_row(row);
            (actual != expected).then_some(Violation::RowQuota {
                row,
                expected,
                actual,
            })
        });

    let cols = grid
        .col_quotas()
        .iter()
        .enumerate()
        .filter_map(move |(col, &expected)| {
            let actual = grid.tents_in_col(col);
            (actual != expected).then_some(Violation::ColQuota {
                col,
                expected,
                actual,
            })
        });

    let orphans = grid
        .tents()
        .iter()
        .filter(move |&&tent| !grid.has_adjacent_tree(tent))
        .map(|&tent| Violation::TentWithoutTree { tent });

    // Each adjacent pair is reported once, from its smaller member.
    let crowded = grid.tents().iter().flat_map(move |&tent| {
        grid.tents()
            .range(tent..)
            .filter(move |&&other| is_king_adjacent(tent, other))
            .map(move |&other| Violation::AdjacentTents { tent, other })
    });

    tree_count
        .chain(tent_count)
        .chain(rows)
        .chain(cols)
        .chain(orphans)
        .chain(crowded)
}

/// Checks `grid` against every puzzle rule, stopping at the first failure.
///
/// `expected_trees` is the configured tree count K.
///
/// # Examples
/// ```
/// use tents_puzzle::utils::grid_from_str_array;
/// use tents_puzzle::validator::{validate, Violation};
///
/// let grid = grid_from_str_array(&["TA", ".."]).unwrap();
/// assert_eq!(validate(&grid, 1), Ok(()));
/// assert_eq!(
///     validate(&grid, 2),
///     Err(Violation::TreeCount { expected: 2, actual: 1 })
/// );
/// ```
pub fn validate(grid: &Grid, expected_trees: usize) -> Result<(), Violation> {
    match violations(grid, expected_trees).next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Checks `grid` against every puzzle rule and returns all failures, in the
/// order [`validate`] would meet them. An empty vector means the grid is valid.
pub fn validate_all(grid: &Grid, expected_trees: usize) -> Vec<Violation> {
    violations(grid, expected_trees).collect()
}
