use clap::Parser;
use std::process;
use tents_puzzle::cli::PuzzleArgs;
use tents_puzzle::generator::generate;
use tents_puzzle::logging::init_logging;
use tents_puzzle::validator::validate_all;

/// Generate a tents and trees puzzle and print it with its solution
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    puzzle: PuzzleArgs,

    /// Only print the puzzle, not the solution
    #[arg(long)]
    hide_solution: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.puzzle.verbose);

    let config = cli.puzzle.config();
    let mut rng = cli.puzzle.rng();

    println!(
        "Generating a {}x{} puzzle with {} trees ({:?} search, up to {} attempts)...\n",
        config.grid_size, config.grid_size, config.tree_count, config.strategy, config.max_attempts
    );

    let generated = match generate(&config, &mut rng) {
        Ok(generated) => generated,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let grid = &generated.grid;

    println!("Generated after {} attempt(s).\n", generated.attempts);
    println!("Puzzle:\n{}\n", grid);
    if !cli.hide_solution {
        println!("Solution:\n{}\n", grid.render_with_tents(grid.tents()));
        let tents: Vec<String> = grid.tents().iter().map(|(r, c)| format!("({}, {})", r, c)).collect();
        println!("Tents ({}): {}", tents.len(), tents.join(" "));
    }

    let violations = validate_all(grid, config.tree_count);
    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("Violation: {}", violation);
        }
        process::exit(1);
    }
}
