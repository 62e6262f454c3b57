//! Core grid model for the tents-and-trees puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Coord`: a `(row, col)` cell position.
//! - `Cell`: what occupies a cell (empty, tree, tent).
//! - Adjacency helpers for the two neighbourhoods the rules use: orthogonal
//!   (4-directional) and king-move (8-directional).
//! - `Grid`: trees, per-row/per-column tent quotas and the canonical tent set
//!   of one generated puzzle.
use std::collections::BTreeSet;
use std::fmt;

/// A `(row, col)` cell position, 0-indexed.
pub type Coord = (usize, usize);

/// Row/column deltas of the four edge-sharing neighbours (up, down, left, right).
const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Row/column deltas of the eight edge- or corner-sharing neighbours.
const KING: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Represents what occupies a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Nothing placed.
    Empty,
    /// A fixed tree.
    Tree,
    /// A tent.
    Tent,
}

impl Cell {
    /// Converts the cell to its character representation.
    ///
    /// This is the same alphabet [`crate::utils::grid_from_str_array`] parses.
    ///
    /// # Examples
    ///
    /// ```
    /// use tents_puzzle::engine::Cell;
    /// assert_eq!(Cell::Tree.to_char(), 'T');
    /// assert_eq!(Cell::Tent.to_char(), 'A');
    /// assert_eq!(Cell::Empty.to_char(), '.');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Tree => 'T',
            Cell::Tent => 'A',
        }
    }
}

fn neighbors<'a>(
    coord: Coord,
    size: usize,
    deltas: &'a [(isize, isize)],
) -> impl Iterator<Item = Coord> + 'a {
    let (r, c) = coord;
    deltas.iter().filter_map(move |&(dr, dc)| {
        let nr = r as isize + dr;
        let nc = c as isize + dc;
        if nr >= 0 && nr < size as isize && nc >= 0 && nc < size as isize {
            Some((nr as usize, nc as usize))
        } else {
            None
        }
    })
}

/// Iterates over the in-bounds edge-sharing neighbours of `coord`.
pub fn orthogonal_neighbors(coord: Coord, size: usize) -> impl Iterator<Item = Coord> {
    neighbors(coord, size, &ORTHOGONAL)
}

/// Iterates over the in-bounds edge- or corner-sharing neighbours of `coord`.
pub fn king_neighbors(coord: Coord, size: usize) -> impl Iterator<Item = Coord> {
    neighbors(coord, size, &KING)
}

/// Returns `true` if `a` and `b` are distinct and share an edge or a corner.
///
/// # Examples
/// ```
/// use tents_puzzle::engine::is_king_adjacent;
/// assert!(is_king_adjacent((2, 2), (3, 3)));
/// assert!(!is_king_adjacent((2, 2), (2, 2)));
/// assert!(!is_king_adjacent((0, 0), (0, 2)));
/// ```
pub fn is_king_adjacent(a: Coord, b: Coord) -> bool {
    a != b && a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

/// Returns `true` if any member of `others` is king-move adjacent to `coord`.
pub fn touches_any(coord: Coord, others: &BTreeSet<Coord>) -> bool {
    others.iter().any(|&other| is_king_adjacent(coord, other))
}

/// Returns `true` if `coord` has a tree among its edge-sharing neighbours.
pub fn has_orthogonal_tree(coord: Coord, size: usize, trees: &BTreeSet<Coord>) -> bool {
    orthogonal_neighbors(coord, size).any(|n| trees.contains(&n))
}

/// One generated puzzle: trees, quotas and the canonical tent set.
///
/// A `Grid` is plain data. Whether it satisfies the puzzle rules is decided by
/// [`crate::validator`]; grids handed out by [`crate::generator::generate_grid`]
/// always do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    trees: BTreeSet<Coord>,
    tents: BTreeSet<Coord>,
    row_quotas: Vec<usize>,
    col_quotas: Vec<usize>,
}

impl Grid {
    /// Assembles a grid from its parts.
    ///
    /// # Panics
    /// Panics if either quota vector is not `size` long.
    pub fn new(
        size: usize,
        trees: BTreeSet<Coord>,
        tents: BTreeSet<Coord>,
        row_quotas: Vec<usize>,
        col_quotas: Vec<usize>,
    ) -> Self {
        assert_eq!(row_quotas.len(), size, "row quotas must cover every row");
        assert_eq!(col_quotas.len(), size, "column quotas must cover every column");
        Grid {
            size,
            trees,
            tents,
            row_quotas,
            col_quotas,
        }
    }

    /// Edge length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn trees(&self) -> &BTreeSet<Coord> {
        &self.trees
    }

    /// The canonical tent set: the answer key of this puzzle.
    pub fn tents(&self) -> &BTreeSet<Coord> {
        &self.tents
    }

    pub fn row_quotas(&self) -> &[usize] {
        &self.row_quotas
    }

    pub fn col_quotas(&self) -> &[usize] {
        &self.col_quotas
    }

    /// Returns `true` if `coord` lies on the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.0 < self.size && coord.1 < self.size
    }

    pub fn is_tree(&self, coord: Coord) -> bool {
        self.trees.contains(&coord)
    }

    /// Returns `true` if `coord` shares an edge with at least one tree.
    pub fn has_adjacent_tree(&self, coord: Coord) -> bool {
        has_orthogonal_tree(coord, self.size, &self.trees)
    }

    /// Number of canonical tents in `row`.
    pub fn tents_in_row(&self, row: usize) -> usize {
        self.tents.iter().filter(|&&(r, _)| r == row).count()
    }

    /// Number of canonical tents in `col`.
    pub fn tents_in_col(&self, col: usize) -> usize {
        self.tents.iter().filter(|&&(_, c)| c == col).count()
    }

    /// Returns the occupant of `coord`, showing canonical tents.
    ///
    /// # Panics
    /// Panics if `coord` is off the grid.
    pub fn cell(&self, coord: Coord) -> Cell {
        assert!(self.contains(coord), "{:?} is outside the grid", coord);
        if self.trees.contains(&coord) {
            Cell::Tree
        } else if self.tents.contains(&coord) {
            Cell::Tent
        } else {
            Cell::Empty
        }
    }

    /// Renders the grid with column quotas on top and row quotas on the left.
    ///
    /// Cells in `tents` are drawn as tents; pass `self.tents()` to reveal the
    /// answer key or a player's tent set to show their progress.
    pub fn render_with_tents(&self, tents: &BTreeSet<Coord>) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for quota in &self.col_quotas {
            output.push_str(&format!("{:<2}", quota));
        }
        output.push('\n');

        for r in 0..self.size {
            output.push_str(&format!("{:<3}", self.row_quotas[r]));
            for c in 0..self.size {
                let cell = if self.trees.contains(&(r, c)) {
                    Cell::Tree
                } else if tents.contains(&(r, c)) {
                    Cell::Tent
                } else {
                    Cell::Empty
                };
                output.push(cell.to_char());
                output.push(' ');
            }
            if r + 1 < self.size {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Grid {
    /// Formats the puzzle as the player sees it: trees and quotas, no tents.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_with_tents(&BTreeSet::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid_from_str_array;

    #[test]
    fn test_orthogonal_neighbors_corner_and_center() {
        let corner: Vec<Coord> = orthogonal_neighbors((0, 0), 5).collect();
        assert_eq!(corner, vec![(1, 0), (0, 1)]);

        let center: Vec<Coord> = orthogonal_neighbors((2, 2), 5).collect();
        assert_eq!(center, vec![(1, 2), (3, 2), (2, 1), (2, 3)]);
    }

    #[test]
    fn test_king_neighbors_counts() {
        assert_eq!(king_neighbors((0, 0), 5).count(), 3);
        assert_eq!(king_neighbors((0, 2), 5).count(), 5);
        assert_eq!(king_neighbors((2, 2), 5).count(), 8);
        assert_eq!(king_neighbors((4, 4), 5).count(), 3);
        assert_eq!(king_neighbors((0, 0), 1).count(), 0);
    }

    #[test]
    fn test_is_king_adjacent() {
        assert!(is_king_adjacent((1, 1), (0, 0)));
        assert!(is_king_adjacent((1, 1), (1, 2)));
        assert!(is_king_adjacent((1, 1), (2, 0)));
        assert!(!is_king_adjacent((1, 1), (3, 1)));
        assert!(!is_king_adjacent((1, 1), (1, 1)));
    }

    #[test]
    fn test_has_adjacent_tree_ignores_diagonals() {
        let grid = grid_from_str_array(&[".....", ".T...", ".....", ".....", "....."]).unwrap();
        assert!(grid.has_adjacent_tree((0, 1)));
        assert!(grid.has_adjacent_tree((1, 0)));
        assert!(grid.has_adjacent_tree((2, 1)));
        assert!(grid.has_adjacent_tree((1, 2)));
        assert!(!grid.has_adjacent_tree((0, 0)));
        assert!(!grid.has_adjacent_tree((2, 2)));
        assert!(!grid.has_adjacent_tree((4, 4)));
    }

    #[test]
    fn test_cell_and_counts() {
        let grid = grid_from_str_array(&["TA...", ".....", "..TA.", ".....", "....."]).unwrap();
        assert_eq!(grid.cell((0, 0)), Cell::Tree);
        assert_eq!(grid.cell((0, 1)), Cell::Tent);
        assert_eq!(grid.cell((4, 4)), Cell::Empty);
        assert_eq!(grid.tents_in_row(0), 1);
        assert_eq!(grid.tents_in_row(1), 0);
        assert_eq!(grid.tents_in_col(3), 1);
        assert!(grid.contains((4, 4)));
        assert!(!grid.contains((5, 0)));
        assert!(!grid.contains((0, 5)));
    }

    #[test]
    fn test_display_hides_tents() {
        let grid = grid_from_str_array(&["TA", ".."]).unwrap();
        let display_str = format!("{}", grid);
        assert!(display_str.contains("T . "));
        assert!(!display_str.contains('A'));
        assert_eq!(display_str.lines().count(), 3);

        let revealed = grid.render_with_tents(grid.tents());
        assert!(revealed.contains("T A "));
    }
}
