use clap::Parser;
use std::io::{self, Write};
use std::process;
use tents_puzzle::cli::PuzzleArgs;
use tents_puzzle::logging::init_logging;
use tents_puzzle::session::{ClickOutcome, PuzzleSession};

/// Play tents and trees in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    puzzle: PuzzleArgs,
}

fn describe(outcome: ClickOutcome) -> &'static str {
    match outcome {
        ClickOutcome::Invalid => "That cell is not on the grid.",
        ClickOutcome::Removed => "Tent removed.",
        ClickOutcome::TreeCollision => "There is a tree there.",
        ClickOutcome::NoAdjacentTree => "A tent needs a tree above, below, left or right of it.",
        ClickOutcome::TentAdjacent => "Tents may not touch, not even diagonally.",
        ClickOutcome::WrongPosition => "That is not where the tent goes.",
        ClickOutcome::Placed => "Tent placed.",
        ClickOutcome::Victory => "Solved!",
        ClickOutcome::Reset => "Too many mistakes.",
    }
}

fn new_puzzle(session: &mut PuzzleSession) {
    if let Err(e) = session.reset() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    println!("New puzzle generated.");
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.puzzle.verbose);

    let config = cli.puzzle.config();
    let mut session = match PuzzleSession::new(config, cli.puzzle.rng()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    println!("Welcome to Tents and Trees!");
    println!("Place one tent (A) next to every tree (T). Numbers give the tents per row and column.");

    loop {
        println!("---------------------");
        println!(
            "Tents: {}/{}, Errors left: {}",
            session.user_tents().len(),
            session.solution().len(),
            session.remaining_errors()
        );
        println!("{}", session.grid().render_with_tents(session.user_tents()));

        print!("Enter a cell (row col), 'h' for a hint, 's' to show the solution, 'r' for a new puzzle, 'q' to quit: ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        match input.trim() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "r" => {
                new_puzzle(&mut session);
                continue;
            }
            "h" => {
                match session.hint() {
                    Some((r, c)) => println!("Try ({}, {}).", r, c),
                    None => println!("All tents are placed."),
                }
                continue;
            }
            "s" => {
                println!("{}", session.grid().render_with_tents(session.solution()));
                continue;
            }
            _ => {}
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let coord = match parts.as_slice() {
            [r, c] => match (r.parse::<usize>(), c.parse::<usize>()) {
                (Ok(r), Ok(c)) => (r, c),
                _ => {
                    println!("Invalid input: Please enter numbers for row and column (e.g., '2 3').");
                    continue;
                }
            },
            _ => {
                println!("Invalid input format. Use 'row col', 'h', 's', 'r', or 'q'.");
                continue;
            }
        };

        let outcome = session.process_click(coord);
        println!("{}", describe(outcome));
        match outcome {
            ClickOutcome::Victory => {
                println!("{}", session.grid().render_with_tents(session.user_tents()));
                println!("🎉 PUZZLE SOLVED! 🎉");
                new_puzzle(&mut session);
            }
            ClickOutcome::Reset => {
                println!("The puzzle has been replaced.");
                new_puzzle(&mut session);
            }
            _ if outcome.is_error() => {
                println!("Errors left: {}", session.remaining_errors());
            }
            _ => {}
        }
    }
}
