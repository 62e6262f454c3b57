//! Tent assignment search.
//!
//! [`TentSearch`] walks a fixed, prioritised list of candidate cells once,
//! placing a tent wherever the local rules allow. When a placement pushes a
//! row or column over its quota the placement is withdrawn and the most
//! recent earlier decision is undone as well; scanning then resumes just past
//! that decision. Nothing deeper is revisited, so the search can miss
//! solutions that exist. The generation pipeline in [`crate::generator`]
//! compensates by retrying from scratch.
//!
//! [`SearchStrategy::Exhaustive`] replaces that single pass with a complete
//! depth-first search over the same candidate order. It finds an assignment
//! whenever one exists, at a cost that grows quickly with the grid size.
use crate::engine::{has_orthogonal_tree, touches_any, Coord};
use rand::Rng;
use std::cmp::Reverse;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// How the tent search explores the candidate list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SearchStrategy {
    /// One forward pass that undoes a single earlier decision on overflow.
    #[default]
    SingleUndo,
    /// Full depth-first search; every place/skip combination is tried.
    Exhaustive,
}

/// How a search run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEnd {
    /// The cursor ran past the last candidate. The tents may or may not meet
    /// every quota; the validator decides.
    ListExhausted,
    /// Backtracking was requested with no decision left to undo.
    StackEmptied,
    /// The exhaustive search met every quota exactly.
    Solved,
    /// The exhaustive search proved no assignment exists for this candidate list.
    NoSolution,
}

/// The tents a search run settled on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub tents: BTreeSet<Coord>,
    pub end: SearchEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchState {
    Scanning,
    Backtracking,
}

/// Orders the cells a tent may go on.
///
/// A candidate is a non-tree cell with an edge-sharing tree. Candidates are
/// grouped by column. Inside a column they are stably sorted by the remaining
/// quota of their row, ties broken by a random key drawn once per candidate.
/// Columns are emitted in descending order of remaining column quota, with
/// equal columns kept in index order.
pub fn generate_candidates<R: Rng + ?Sized>(
    size: usize,
    trees: &BTreeSet<Coord>,
    row_remaining: &[usize],
    col_remaining: &[usize],
    rng: &mut R,
) -> Vec<Coord> {
    let mut col_groups: Vec<Vec<Coord>> = vec![Vec::new(); size];
    for r in 0..size {
        for c in 0..size {
            if !trees.contains(&(r, c)) && has_orthogonal_tree((r, c), size, trees) {
                col_groups[c].push((r, c));
            }
        }
    }

    let mut sorted_groups: Vec<Vec<Coord>> = Vec::with_capacity(size);
    for group in col_groups {
        let mut keyed: Vec<(usize, f64, Coord)> = group
            .into_iter()
            .map(|coord| (row_remaining[coord.0], rng.gen::<f64>(), coord))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
        sorted_groups.push(keyed.into_iter().map(|(_, _, coord)| coord).collect());
    }

    let mut col_order: Vec<usize> = (0..size).collect();
    col_order.sort_by_key(|&c| Reverse(col_remaining[c]));

    col_order
        .into_iter()
        .flat_map(|c| std::mem::take(&mut sorted_groups[c]))
        .collect()
}

/// State of one tent search over a fixed candidate list.
///
/// The candidate list never changes once built; the decision stack holds
/// indices into it.
#[derive(Clone, Debug)]
pub struct TentSearch<'a> {
    size: usize,
    trees: &'a BTreeSet<Coord>,
    row_quotas: &'a [usize],
    col_quotas: &'a [usize],
    candidates: Vec<Coord>,
    tents: BTreeSet<Coord>,
    row_counts: Vec<usize>,
    col_counts: Vec<usize>,
    stack: Vec<usize>,
}

impl<'a> TentSearch<'a> {
    /// Prepares a search, drawing the candidate tie-breakers from `rng`.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        trees: &'a BTreeSet<Coord>,
        row_quotas: &'a [usize],
        col_quotas: &'a [usize],
        rng: &mut R,
    ) -> Self {
        // No tents yet, so remaining quota equals the quota itself.
        let candidates = generate_candidates(size, trees, row_quotas, col_quotas, rng);
        Self::with_candidates(size, trees, row_quotas, col_quotas, candidates)
    }

    /// Prepares a search over an explicit candidate order.
    pub fn with_candidates(
        size: usize,
        trees: &'a BTreeSet<Coord>,
        row_quotas: &'a [usize],
        col_quotas: &'a [usize],
        candidates: Vec<Coord>,
    ) -> Self {
        TentSearch {
            size,
            trees,
            row_quotas,
            col_quotas,
            candidates,
            tents: BTreeSet::new(),
            row_counts: vec![0; size],
            col_counts: vec![0; size],
            stack: Vec::new(),
        }
    }

    pub fn candidates(&self) -> &[Coord] {
        &self.candidates
    }

    fn can_place(&self, coord: Coord) -> bool {
        !touches_any(coord, &self.tents) && has_orthogonal_tree(coord, self.size, self.trees)
    }

    fn place(&mut self, coord: Coord) {
        self.tents.insert(coord);
        self.row_counts[coord.0] += 1;
        self.col_counts[coord.1] += 1;
    }

    fn remove(&mut self, coord: Coord) {
        self.tents.remove(&coord);
        self.row_counts[coord.0] -= 1;
        self.col_counts[coord.1] -= 1;
    }

    // Only the row and column of the latest tent can have gone over.
    fn over_quota(&self, coord: Coord) -> bool {
        self.row_counts[coord.0] > self.row_quotas[coord.0]
            || self.col_counts[coord.1] > self.col_quotas[coord.1]
    }

    /// Runs the search to completion.
    pub fn run(mut self) -> SearchResult {
        debug!(candidates = self.candidates.len(), "starting tent search");

        let mut cursor = 0;
        let mut state = SearchState::Scanning;

        while cursor < self.candidates.len() {
            match state {
                SearchState::Backtracking => {
                    let Some(last_pos) = self.stack.pop() else {
                        warn!(placed = self.tents.len(), "No valid solution found");
                        return SearchResult {
                            tents: self.tents,
                            end: SearchEnd::StackEmptied,
                        };
                    };
                    self.remove(self.candidates[last_pos]);
                    cursor = last_pos + 1;
                    state = SearchState::Scanning;
                }
                SearchState::Scanning => {
                    let coord = self.candidates[cursor];
                    if self.can_place(coord) {
                        self.place(coord);
                        self.stack.push(cursor);
                        cursor += 1;

                        if self.over_quota(coord) {
                            self.remove(coord);
                            self.stack.pop();
                            state = SearchState::Backtracking;
                        }
                    } else {
                        cursor += 1;
                    }
                }
            }
        }

        debug!(placed = self.tents.len(), "tent search reached end of candidates");
        SearchResult {
            tents: self.tents,
            end: SearchEnd::ListExhausted,
        }
    }

    /// Runs a complete depth-first search over the candidate list.
    ///
    /// On failure the returned tent set is empty.
    pub fn run_exhaustive(mut self) -> SearchResult {
        debug!(candidates = self.candidates.len(), "starting exhaustive tent search");

        // rows_left[i][r]: candidates at positions >= i lying in row r.
        let n = self.candidates.len();
        let mut rows_left = vec![vec![0; self.size]; n + 1];
        let mut cols_left = vec![vec![0; self.size]; n + 1];
        for i in (0..n).rev() {
            let (r, c) = self.candidates[i];
            rows_left[i] = rows_left[i + 1].clone();
            cols_left[i] = cols_left[i + 1].clone();
            rows_left[i][r] += 1;
            cols_left[i][c] += 1;
        }

        if self.descend(0, &rows_left, &cols_left) {
            debug!(placed = self.tents.len(), "exhaustive tent search solved");
            SearchResult {
                tents: self.tents,
                end: SearchEnd::Solved,
            }
        } else {
            warn!("No valid solution found");
            SearchResult {
                tents: BTreeSet::new(),
                end: SearchEnd::NoSolution,
            }
        }
    }

    fn quotas_met(&self) -> bool {
        self.row_counts == self.row_quotas && self.col_counts == self.col_quotas
    }

    fn descend(&mut self, pos: usize, rows_left: &[Vec<usize>], cols_left: &[Vec<usize>]) -> bool {
        if self.quotas_met() {
            return true;
        }
        if pos == self.candidates.len() {
            return false;
        }

        let rows_reachable = (0..self.size)
            .all(|r| self.row_quotas[r] - self.row_counts[r] <= rows_left[pos][r]);
        let cols_reachable = (0..self.size)
            .all(|c| self.col_quotas[c] - self.col_counts[c] <= cols_left[pos][c]);
        if !rows_reachable || !cols_reachable {
            return false;
        }

        let coord = self.candidates[pos];
        if self.can_place(coord) {
            self.place(coord);
            if !self.over_quota(coord) {
                self.stack.push(pos);
                if self.descend(pos + 1, rows_left, cols_left) {
                    return true;
                }
                self.stack.pop();
            }
            self.remove(coord);
        }

        self.descend(pos + 1, rows_left, cols_left)
    }
}

/// Searches for tents satisfying the quotas around `trees`.
///
/// Builds a [`TentSearch`] and runs it with the given `strategy`.
pub fn search_tents<R: Rng + ?Sized>(
    size: usize,
    trees: &BTreeSet<Coord>,
    row_quotas: &[usize],
    col_quotas: &[usize],
    strategy: SearchStrategy,
    rng: &mut R,
) -> SearchResult {
    let search = TentSearch::new(size, trees, row_quotas, col_quotas, rng);
    match strategy {
        SearchStrategy::SingleUndo => search.run(),
        SearchStrategy::Exhaustive => search.run_exhaustive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid_from_str_array;
    use crate::validator::validate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn trees_of(rows: &[&str]) -> BTreeSet<Coord> {
        grid_from_str_array(rows).unwrap().trees().clone()
    }

    #[test]
    fn test_candidates_are_tree_neighbours_only() {
        let trees = trees_of(&["T...", "....", "...T", "...."]);
        let mut rng = SmallRng::seed_from_u64(1);
        let candidates = generate_candidates(4, &trees, &[1; 4], &[1; 4], &mut rng);

        let as_set: BTreeSet<Coord> = candidates.iter().copied().collect();
        let expected: BTreeSet<Coord> = [(0, 1), (1, 0), (1, 3), (2, 2), (3, 3)].into_iter().collect();
        assert_eq!(as_set, expected);
        assert_eq!(candidates.len(), expected.len(), "no duplicates");
    }

    #[test]
    fn test_candidates_grouped_by_column_in_quota_order() {
        let trees = trees_of(&["T...", "....", "...T", "...."]);
        let mut rng = SmallRng::seed_from_u64(2);
        // Column 3 needs the most tents, then column 0; 1 and 2 tie.
        let candidates = generate_candidates(4, &trees, &[1; 4], &[2, 1, 1, 3], &mut rng);
        let columns: Vec<usize> = candidates.iter().map(|&(_, c)| c).collect();
        assert_eq!(columns, vec![3, 3, 0, 1, 2]);
    }

    #[test]
    fn test_candidates_sorted_by_remaining_row_quota_within_column() {
        // Column 1 has one candidate per row; rows need 3, 2 and 1 tents.
        let trees = trees_of(&["T..", "..T", "T.."]);
        for seed in 0..10 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let candidates = generate_candidates(3, &trees, &[3, 2, 1], &[1, 1, 1], &mut rng);
            let column_one: Vec<Coord> = candidates.into_iter().filter(|&(_, c)| c == 1).collect();
            assert_eq!(column_one, vec![(2, 1), (1, 1), (0, 1)]);
        }
    }

    #[test]
    fn test_candidate_order_is_reproducible() {
        let trees = trees_of(&["T....", "..T..", ".....", "T...T", "..T.."]);
        let a = generate_candidates(5, &trees, &[1; 5], &[1; 5], &mut SmallRng::seed_from_u64(7));
        let b = generate_candidates(5, &trees, &[1; 5], &[1; 5], &mut SmallRng::seed_from_u64(7));
        assert_eq!(a, b);

        let search = TentSearch::new(5, &trees, &[1; 5], &[1; 5], &mut SmallRng::seed_from_u64(7));
        assert_eq!(search.candidates(), a.as_slice());
    }

    #[test]
    fn test_search_stops_when_first_placement_overflows() {
        let trees = trees_of(&["T.T", "...", "T.T"]);
        let row_quotas = [0, 2, 0];
        let col_quotas = [1, 0, 1];
        let result = TentSearch::with_candidates(
            3,
            &trees,
            &row_quotas,
            &col_quotas,
            vec![(0, 1), (1, 0), (1, 2), (2, 1)],
        )
        .run();
        // (0, 1) goes over row 0 immediately; with nothing to undo the run stops.
        assert_eq!(result.end, SearchEnd::StackEmptied);
        assert!(result.tents.is_empty());
    }

    #[test]
    fn test_exhaustive_solves_where_single_undo_stops() {
        let trees = trees_of(&["T.T", "...", "T.T"]);
        let row_quotas = [0, 2, 0];
        let col_quotas = [1, 0, 1];
        let result = TentSearch::with_candidates(
            3,
            &trees,
            &row_quotas,
            &col_quotas,
            vec![(0, 1), (1, 0), (1, 2), (2, 1)],
        )
        .run_exhaustive();
        assert_eq!(result.end, SearchEnd::Solved);
        let expected: BTreeSet<Coord> = [(1, 0), (1, 2)].into_iter().collect();
        assert_eq!(result.tents, expected);
    }

    #[test]
    fn test_exhaustive_reports_missing_solution() {
        // Only one candidate lies in row 1, which needs two tents.
        let trees = trees_of(&[".....", ".....", "..T..", ".....", "....."]);
        let mut rng = SmallRng::seed_from_u64(0);
        let result = search_tents(
            5,
            &trees,
            &[0, 2, 0, 0, 0],
            &[0, 1, 1, 0, 0],
            SearchStrategy::Exhaustive,
            &mut rng,
        );
        assert_eq!(result.end, SearchEnd::NoSolution);
        assert!(result.tents.is_empty());
    }

    #[test]
    fn test_search_places_in_candidate_order() {
        let trees = trees_of(&["T.T", "...", "T.T"]);
        let row_quotas = [0, 2, 0];
        let col_quotas = [1, 0, 1];
        let result = TentSearch::with_candidates(
            3,
            &trees,
            &row_quotas,
            &col_quotas,
            vec![(1, 0), (1, 2), (0, 1), (2, 1)],
        )
        .run();
        // (0, 1) and (2, 1) touch the placed tents and are skipped.
        assert_eq!(result.end, SearchEnd::ListExhausted);
        let expected: BTreeSet<Coord> = [(1, 0), (1, 2)].into_iter().collect();
        assert_eq!(result.tents, expected);
    }

    #[test]
    fn test_search_undoes_previous_decision_on_overflow() {
        let trees = trees_of(&[".....", ".....", "..T..", ".....", "....."]);
        let row_quotas = [0, 1, 0, 1, 0];
        let col_quotas = [0, 1, 1, 0, 0];
        let result = TentSearch::with_candidates(
            5,
            &trees,
            &row_quotas,
            &col_quotas,
            // (3, 2) overflows column 2: it is withdrawn and (1, 2) undone.
            // Scanning resumes at (3, 2), which now fits; (2, 1) touches it.
            vec![(1, 2), (3, 2), (2, 1)],
        )
        .run();
        assert_eq!(result.end, SearchEnd::ListExhausted);
        let expected: BTreeSet<Coord> = [(3, 2)].into_iter().collect();
        assert_eq!(result.tents, expected);
    }

    #[test]
    fn test_search_stops_when_undo_stack_is_empty() {
        let trees = trees_of(&[".....", ".....", "..T..", ".....", "....."]);
        let row_quotas = [0, 1, 0, 0, 0];
        let col_quotas = [0, 0, 1, 1, 0];
        // (3, 2) overflows row 3 both before and after (1, 2) is undone.
        let result = TentSearch::with_candidates(
            5,
            &trees,
            &row_quotas,
            &col_quotas,
            vec![(1, 2), (3, 2), (2, 3)],
        )
        .run();
        assert_eq!(result.end, SearchEnd::StackEmptied);
        assert!(result.tents.is_empty());

        // Overflowing on the last candidate ends the scan before backtracking.
        let result = TentSearch::with_candidates(
            5,
            &trees,
            &row_quotas,
            &col_quotas,
            vec![(1, 2), (3, 2)],
        )
        .run();
        assert_eq!(result.end, SearchEnd::ListExhausted);
        let expected: BTreeSet<Coord> = [(1, 2)].into_iter().collect();
        assert_eq!(result.tents, expected);
    }

    #[test]
    fn test_search_result_never_breaks_local_rules() {
        let grid = grid_from_str_array(&[
            "T...T", //
            "..T..", //
            "T....", //
            "...T.", //
            "T....",
        ])
        .unwrap();
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let result = search_tents(
                5,
                grid.trees(),
                &[1, 2, 1, 1, 1],
                &[1; 5],
                SearchStrategy::SingleUndo,
                &mut rng,
            );
            for &tent in &result.tents {
                assert!(!grid.is_tree(tent));
                assert!(grid.has_adjacent_tree(tent));
                assert!(!touches_any(tent, &result.tents));
            }
            let mut rows = [0usize; 5];
            let mut cols = [0usize; 5];
            for &(r, c) in &result.tents {
                rows[r] += 1;
                cols[c] += 1;
            }
            assert!(rows.iter().zip([1, 2, 1, 1, 1]).all(|(&n, q)| n <= q));
            assert!(cols.iter().all(|&n| n <= 1));
        }
    }

    #[test]
    fn test_search_eventually_solves_known_layout() {
        let grid = grid_from_str_array(&[
            "TA...", //
            "...AT", //
            "TA...", //
            "...A.", //
            "AT.T.",
        ])
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let exhaustive = search_tents(
            5,
            grid.trees(),
            grid.row_quotas(),
            grid.col_quotas(),
            SearchStrategy::Exhaustive,
            &mut rng,
        );
        assert_eq!(exhaustive.end, SearchEnd::Solved);

        let solved = (0..200).any(|seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let result = search_tents(
                5,
                grid.trees(),
                grid.row_quotas(),
                grid.col_quotas(),
                SearchStrategy::SingleUndo,
                &mut rng,
            );
            let candidate = crate::engine::Grid::new(
                5,
                grid.trees().clone(),
                result.tents,
                grid.row_quotas().to_vec(),
                grid.col_quotas().to_vec(),
            );
            validate(&candidate, 5).is_ok()
        });
        assert!(solved);
    }
}
