//! Player session over one generated puzzle.
//!
//! A [`PuzzleSession`] owns a frozen [`Grid`] (the answer key), the tents the
//! player has placed so far and a count of rejected placements. Clicks are
//! judged with the same rules the validator enforces, and a placement is only
//! accepted if it is part of the answer key.
use crate::config::PuzzleConfig;
use crate::engine::{touches_any, Coord, Grid};
use crate::error::GenerationError;
use crate::generator::generate_grid;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{error, info, warn};

/// Result of a single click. Every click yields exactly one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickOutcome {
    /// The coordinate is off the grid. Nothing changes.
    Invalid,
    /// The coordinate held a player tent, which was taken away.
    Removed,
    /// The coordinate is a tree.
    TreeCollision,
    /// The coordinate has no tree above, below, left or right of it.
    NoAdjacentTree,
    /// The coordinate touches a tent the player already placed.
    TentAdjacent,
    /// The placement breaks no rule but is not part of the answer key.
    WrongPosition,
    /// The tent was placed.
    Placed,
    /// The tent was placed and the player's tents now equal the answer key.
    Victory,
    /// The placement was rejected and the error limit has been reached.
    Reset,
}

impl ClickOutcome {
    /// Stable lowercase code for the outcome.
    ///
    /// # Examples
    /// ```
    /// use tents_puzzle::session::ClickOutcome;
    /// assert_eq!(ClickOutcome::TreeCollision.code(), "tree_collision");
    /// assert_eq!(ClickOutcome::Victory.to_string(), "victory");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            ClickOutcome::Invalid => "invalid",
            ClickOutcome::Removed => "removed",
            ClickOutcome::TreeCollision => "tree_collision",
            ClickOutcome::NoAdjacentTree => "no_adjacent_tree",
            ClickOutcome::TentAdjacent => "tent_adjacent",
            ClickOutcome::WrongPosition => "wrong_position",
            ClickOutcome::Placed => "placed",
            ClickOutcome::Victory => "victory",
            ClickOutcome::Reset => "reset",
        }
    }

    /// Returns `true` for outcomes that counted as a player error.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ClickOutcome::TreeCollision
                | ClickOutcome::NoAdjacentTree
                | ClickOutcome::TentAdjacent
                | ClickOutcome::WrongPosition
                | ClickOutcome::Reset
        )
    }
}

impl fmt::Display for ClickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Manages the state of one puzzle being played.
///
/// The session is driven through `&mut self`; hosts that share it between
/// threads must serialise access themselves.
///
/// # Examples
/// ```
/// use tents_puzzle::config::PuzzleConfig;
/// use tents_puzzle::session::{ClickOutcome, PuzzleSession};
///
/// let config = PuzzleConfig::default().with_max_attempts(1000);
/// let mut session = PuzzleSession::from_seed(config, 7).unwrap();
///
/// let tent = *session.solution().iter().next().unwrap();
/// assert_eq!(session.process_click(tent), ClickOutcome::Placed);
/// assert_eq!(session.process_click(tent), ClickOutcome::Removed);
/// assert_eq!(session.process_click((99, 0)), ClickOutcome::Invalid);
/// ```
#[derive(Clone, Debug)]
pub struct PuzzleSession<R = SmallRng> {
    config: PuzzleConfig,
    rng: R,
    grid: Grid,
    user_tents: BTreeSet<Coord>,
    error_count: u32,
}

impl PuzzleSession<SmallRng> {
    /// Creates a session whose generation randomness is seeded with `seed`.
    pub fn from_seed(config: PuzzleConfig, seed: u64) -> Result<Self, GenerationError> {
        PuzzleSession::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PuzzleSession<R> {
    /// Generates a puzzle and starts a session on it.
    ///
    /// # Errors
    /// Returns the [`GenerationError`] if no valid grid could be generated.
    pub fn new(config: PuzzleConfig, mut rng: R) -> Result<Self, GenerationError> {
        let grid = generate_grid(&config, &mut rng)?;
        Ok(PuzzleSession::with_grid(config, grid, rng))
    }

    /// Starts a session on an existing grid.
    ///
    /// The grid is trusted as the answer key; `rng` is only used by [`Self::reset`].
    pub fn with_grid(config: PuzzleConfig, grid: Grid, rng: R) -> Self {
        PuzzleSession {
            config,
            rng,
            grid,
            user_tents: BTreeSet::new(),
            error_count: 0,
        }
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn trees(&self) -> &BTreeSet<Coord> {
        self.grid.trees()
    }

    pub fn row_quotas(&self) -> &[usize] {
        self.grid.row_quotas()
    }

    pub fn col_quotas(&self) -> &[usize] {
        self.grid.col_quotas()
    }

    /// The answer key.
    pub fn solution(&self) -> &BTreeSet<Coord> {
        self.grid.tents()
    }

    pub fn user_tents(&self) -> &BTreeSet<Coord> {
        &self.user_tents
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Errors left before clicks start reporting [`ClickOutcome::Reset`].
    pub fn remaining_errors(&self) -> u32 {
        self.config.max_errors.saturating_sub(self.error_count)
    }

    /// Returns `true` if the player's tents equal the answer key.
    pub fn is_solved(&self) -> bool {
        self.user_tents == *self.grid.tents()
    }

    /// Returns an answer-key tent the player has not placed yet, if any.
    pub fn hint(&self) -> Option<Coord> {
        self.grid.tents().difference(&self.user_tents).next().copied()
    }

    // The rule a new tent at `coord` would break, if any.
    fn rejection(&self, coord: Coord) -> Option<ClickOutcome> {
        if self.grid.is_tree(coord) {
            Some(ClickOutcome::TreeCollision)
        } else if !self.grid.has_adjacent_tree(coord) {
            Some(ClickOutcome::NoAdjacentTree)
        } else if touches_any(coord, &self.user_tents) {
            Some(ClickOutcome::TentAdjacent)
        } else if !self.grid.tents().contains(&coord) {
            Some(ClickOutcome::WrongPosition)
        } else {
            None
        }
    }

    /// Processes a click on `coord` and reports what happened.
    ///
    /// Clicking a placed tent removes it. Anything else is an attempt to place
    /// a tent, which is rejected if it sits on a tree, has no edge-sharing
    /// tree, touches another player tent or is not in the answer key. Each
    /// rejection counts one error; once the count reaches
    /// `config.max_errors` rejections report [`ClickOutcome::Reset`]. The
    /// session does not reset itself; call [`Self::reset`].
    pub fn process_click(&mut self, coord: Coord) -> ClickOutcome {
        if !self.grid.contains(coord) {
            warn!(?coord, outcome = "invalid", "Invalid coordinate");
            return ClickOutcome::Invalid;
        }

        if self.user_tents.remove(&coord) {
            info!(?coord, outcome = "removed", "Removed tent");
            return ClickOutcome::Removed;
        }

        match self.rejection(coord) {
            None => {
                self.user_tents.insert(coord);
                if self.is_solved() {
                    info!(?coord, outcome = "success", "Puzzle solved");
                    ClickOutcome::Victory
                } else {
                    info!(?coord, outcome = "placed", "Placed tent");
                    ClickOutcome::Placed
                }
            }
            Some(rejection) => {
                self.error_count += 1;
                warn!(
                    ?coord,
                    outcome = rejection.code(),
                    errors = self.error_count,
                    "Rejected placement"
                );
                if self.error_count >= self.config.max_errors {
                    error!(
                        errors = self.error_count,
                        critical = true,
                        "Error limit reached, reset required"
                    );
                    ClickOutcome::Reset
                } else {
                    rejection
                }
            }
        }
    }

    /// Replaces the puzzle with a freshly generated one and clears the
    /// player's tents and error count.
    ///
    /// # Errors
    /// Returns the [`GenerationError`] if no valid grid could be generated.
    /// The session is left unchanged in that case.
    pub fn reset(&mut self) -> Result<(), GenerationError> {
        let grid = generate_grid(&self.config, &mut self.rng)?;
        self.grid = grid;
        self.user_tents.clear();
        self.error_count = 0;
        info!("Game reset");
        Ok(())
    }
}
