use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use tents_puzzle::cli::PuzzleArgs;
use tents_puzzle::error::GenerationError;
use tents_puzzle::generator::{attempt_grid, generate};
use tents_puzzle::logging::init_logging;
use tents_puzzle::solver::SearchStrategy;
use tents_puzzle::validator::{validate, Violation};

/// Measure how often each tent search strategy yields a valid grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    puzzle: PuzzleArgs,

    /// Number of seeds to evaluate per strategy
    #[arg(short, long, default_value_t = 200)]
    runs: u64,
}

// Short label for the rule a failed attempt broke.
fn failure_kind(violation: &Violation) -> &'static str {
    match violation {
        Violation::TreeCount { .. } => "tree count",
        Violation::TentCount { .. } => "tent count",
        Violation::RowQuota { .. } => "row quota",
        Violation::ColQuota { .. } => "column quota",
        Violation::TentWithoutTree { .. } => "tent without tree",
        Violation::AdjacentTents { .. } => "adjacent tents",
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.puzzle.verbose);

    let base = cli.puzzle.config();
    let start_seed = cli.puzzle.seed.unwrap_or(0);
    let strategies = [SearchStrategy::SingleUndo, SearchStrategy::Exhaustive];

    println!(
        "Evaluating {} seeds on a {}x{} grid with {} trees...",
        cli.runs, base.grid_size, base.grid_size, base.tree_count
    );
    if !base.quotas_can_balance() {
        println!("Note: column quotas total {}, so no attempt can validate.", base.grid_size);
    }

    for strategy in strategies {
        let config = base.with_strategy(strategy);

        // Single attempts: how often one pass of the pipeline validates.
        let mut valid_attempts = 0u64;
        let mut failures: BTreeMap<&'static str, u64> = BTreeMap::new();
        // Full generations: how many attempts a successful generation needs.
        let mut generated = 0u64;
        let mut attempts_used = 0u64;

        for run in 0..cli.runs {
            let seed = start_seed + run;

            let grid = attempt_grid(&config, &mut SmallRng::seed_from_u64(seed));
            match validate(&grid, config.tree_count) {
                Ok(()) => valid_attempts += 1,
                Err(violation) => *failures.entry(failure_kind(&violation)).or_insert(0) += 1,
            }

            match generate(&config, &mut SmallRng::seed_from_u64(seed)) {
                Ok(result) => {
                    generated += 1;
                    attempts_used += u64::from(result.attempts);
                }
                Err(GenerationError::Config(e)) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
                Err(GenerationError::Exhausted { .. }) => {}
            }
        }

        let rate = |n: u64| 100.0 * n as f64 / cli.runs.max(1) as f64;
        println!("\n--- Strategy: {:?} ---", strategy);
        println!(
            "Single attempt valid: {:<6} ({:.1}%)",
            valid_attempts,
            rate(valid_attempts)
        );
        for (kind, count) in &failures {
            println!("  failed on {:<18}: {:<6} ({:.1}%)", kind, count, rate(*count));
        }
        println!(
            "Generated within {} attempts: {:<6} ({:.1}%)",
            config.max_attempts,
            generated,
            rate(generated)
        );
        if generated > 0 {
            println!(
                "Average attempts per success: {:.2}",
                attempts_used as f64 / generated as f64
            );
        }
    }
}
