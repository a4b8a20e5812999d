use clap::Parser;
use hanoi_solver::engine::Puzzle;
use hanoi_solver::logging::{init_logging, LogConfig};
use hanoi_solver::solver::{optimal_move_count, optimal_moves};
use tracing::info;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Print the optimal Tower of Hanoi solution", long_about = None)]
struct Args {
    /// Number of disks
    #[clap(short, long)]
    disks: usize,

    /// Print at most this many moves
    #[clap(short, long)]
    limit: Option<usize>,

    /// Verify each move against a live puzzle and show the final layout
    #[clap(long)]
    check: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    if let Err(error) = init_logging(&LogConfig::from_verbosity(args.verbose)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let mut puzzle = match Puzzle::new(args.disks) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    match optimal_move_count(args.disks) {
        Some(total) => println!("Optimal solution for {} disks: {} moves", args.disks, total),
        None => println!("Optimal solution for {} disks: 2^{} - 1 moves", args.disks, args.disks),
    }
    info!(disks = args.disks, limit = ?args.limit, "solving");

    let moves = optimal_moves(args.disks);
    let printed = match args.limit {
        Some(limit) => print_moves(moves.take(limit), &mut puzzle, args.check),
        None => print_moves(moves, &mut puzzle, args.check),
    };

    if let Err(e) = printed {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
    if args.check {
        println!("\nFinal state after {} moves:\n{}", puzzle.steps(), puzzle);
        if puzzle.is_won() {
            println!("Solved.");
        }
    }
}

fn print_moves(
    moves: impl Iterator<Item = hanoi_solver::engine::Move>,
    puzzle: &mut Puzzle,
    check: bool,
) -> Result<(), hanoi_solver::error::PuzzleError> {
    for (i, mv) in moves.enumerate() {
        if check {
            let disk = puzzle.apply(mv)?;
            println!("  Move {}: {} (disk {})", i + 1, mv, disk);
        } else {
            println!("  Move {}: {}", i + 1, mv);
        }
    }
    Ok(())
}
