use std::sync::Once;
use tents_puzzle::config::PuzzleConfig;
use tents_puzzle::engine::Grid;
use tents_puzzle::solver::SearchStrategy;
use tents_puzzle::utils::grid_from_str_array;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Installs a test-writer subscriber once per test binary.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_filter(env_filter);
        let _ = tracing_subscriber::registry().with(layer).try_init();
    });
}

/// A configuration that reliably generates a 5x5 puzzle.
#[allow(dead_code)]
pub fn reliable_config() -> PuzzleConfig {
    PuzzleConfig::new(5, 5)
        .with_strategy(SearchStrategy::Exhaustive)
        .with_max_attempts(500)
}

/// A valid 5x5 puzzle. Answer key: (0,0) (1,2) (2,4) (3,1) (4,3).
#[allow(dead_code)]
pub fn fixture_grid() -> Grid {
    grid_from_str_array(&[
        "AT...", //
        "..A.T", //
        "..T.A", //
        "TA...", //
        "...AT",
    ])
    .unwrap()
}
