use crate::engine::{Coord, Grid};
use std::collections::BTreeSet;

/// Parses an array of string slices into a square [`Grid`].
///
/// Each string slice is one row, starting from row 0. The grid size is the
/// number of rows, and every row must have exactly that many characters.
///
/// Valid characters are:
/// - 'T': a tree
/// - 'A': a canonical tent
/// - '.': an empty cell
///
/// Row and column quotas are taken from the tents drawn, so a fixture spells
/// out its own answer key. Nothing is checked against the puzzle rules; run
/// [`crate::validator::validate`] on the result for that.
///
/// # Returns
/// * `Ok(Grid)` if parsing is successful.
/// * `Err(String)` if the input is empty, a row has the wrong length, or an
///   unrecognized character is encountered.
///
/// # Examples
/// ```
/// use tents_puzzle::utils::grid_from_str_array;
///
/// let grid = grid_from_str_array(&[
///     "TA.",
///     "...",
///     ".AT",
/// ]).unwrap();
/// assert_eq!(grid.size(), 3);
/// assert!(grid.is_tree((0, 0)));
/// assert!(grid.tents().contains(&(2, 1)));
/// assert_eq!(grid.row_quotas(), &[1, 0, 1]);
/// assert_eq!(grid.col_quotas(), &[0, 2, 0]);
///
/// assert!(grid_from_str_array(&["TX", ".."]).is_err());
/// assert!(grid_from_str_array(&["T..", ".."]).is_err());
/// ```
pub fn grid_from_str_array(s: &[&str]) -> Result<Grid, String> {
    let size = s.len();
    if size == 0 {
        return Err("Grid must have at least one row".to_string());
    }

    let mut trees: BTreeSet<Coord> = BTreeSet::new();
    let mut tents: BTreeSet<Coord> = BTreeSet::new();
    let mut row_quotas = vec![0; size];
    let mut col_quotas = vec![0; size];

    for (r, row_str) in s.iter().enumerate() {
        let width = row_str.chars().count();
        if width != size {
            return Err(format!(
                "Row {} has {} characters, expected {}",
                r, width, size
            ));
        }

        for (c, ch) in row_str.chars().enumerate() {
            match ch {
                'T' => {
                    trees.insert((r, c));
                }
                'A' => {
                    tents.insert((r, c));
                    row_quotas[r] += 1;
                    col_quotas[c] += 1;
                }
                '.' => {}
                _ => {
                    return Err(format!(
                        "Unrecognized character '{}' in row {} col {}",
                        ch, r, c
                    ))
                }
            }
        }
    }

    Ok(Grid::new(size, trees, tents, row_quotas, col_quotas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Cell;

    #[test]
    fn test_grid_from_str_array_valid() {
        let grid = grid_from_str_array(&["T.T..", "A..A.", ".....", ".T...", ".A..."]).unwrap();
        assert_eq!(grid.size(), 5);
        assert_eq!(grid.trees().len(), 3);
        assert_eq!(grid.tents().len(), 3);
        assert_eq!(grid.cell((1, 0)), Cell::Tent);
        assert_eq!(grid.cell((3, 1)), Cell::Tree);
        assert_eq!(grid.row_quotas(), &[0, 2, 0, 0, 1]);
        assert_eq!(grid.col_quotas(), &[1, 1, 0, 1, 0]);
    }

    #[test]
    fn test_grid_from_str_array_invalid_char() {
        let result = grid_from_str_array(&["TX", ".."]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unrecognized character 'X'"));
    }

    #[test]
    fn test_grid_from_str_array_with_spaces() {
        let result = grid_from_str_array(&["T .", "...", "..."]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unrecognized character ' '"));
    }

    #[test]
    fn test_grid_from_str_array_ragged_row() {
        let result = grid_from_str_array(&["T..", "....", "..."]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Row 1 has 4 characters"));
    }

    #[test]
    fn test_grid_from_str_array_empty_input() {
        let rows: [&str; 0] = [];
        assert!(grid_from_str_array(&rows).is_err());
    }
}
