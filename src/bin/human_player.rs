use clap::Parser;
use hanoi_solver::engine::{Puzzle, MAX_DISKS, MIN_DISKS};
use hanoi_solver::logging::{init_logging, LogConfig};
use hanoi_solver::simulation::Simulation;
use hanoi_solver::solver::optimal_move_count;
use hanoi_solver::utils::{parse_disk_count, parse_move};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Boards up to this many disks are redrawn after every simulated move.
const REDRAW_LIMIT: usize = 10;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play the Tower of Hanoi in the terminal", long_about = None)]
struct Args {
    /// Number of disks; prompted for when omitted
    #[clap(short, long)]
    disks: Option<usize>,

    /// Pause between simulated moves in milliseconds (defaults to a pace based on the disk count)
    #[clap(long)]
    delay_ms: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

enum Outcome {
    Won,
    Quit,
}

fn main() {
    let args = Args::parse();
    if let Err(error) = init_logging(&LogConfig::from_verbosity(args.verbose)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    println!("Welcome to the Tower of Hanoi!");
    let mut preset = args.disks;

    loop {
        let disks = match preset.take() {
            Some(n) => n,
            None => match ask_disk_count() {
                Some(n) => n,
                None => break,
            },
        };

        let mut puzzle = match Puzzle::new(disks) {
            Ok(p) => p,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        info!(disks, "new game");

        match play(&mut puzzle, args.delay_ms.map(Duration::from_millis)) {
            Outcome::Quit => break,
            Outcome::Won => {
                if !ask_yes_no("Play again? (y/n): ") {
                    break;
                }
            }
        }
    }
    println!("Thanks for playing!");
}

fn play(puzzle: &mut Puzzle, delay: Option<Duration>) -> Outcome {
    print_help();
    loop {
        println!("---------------------");
        println!("Moves: {}", puzzle.steps());
        println!("{}", puzzle);

        let Some(input) = read_line("Enter your move (from to), or 'h' for help: ") else {
            return Outcome::Quit;
        };
        let trimmed = input.trim();
        let mut words = trimmed.split_whitespace();

        match words.next() {
            None => continue,
            Some("q") => return Outcome::Quit,
            Some("h") => print_help(),
            Some("r") => {
                puzzle.reset();
                println!("Puzzle reset.");
            }
            Some("u") => match puzzle.undo_last_move() {
                Ok(mv) => println!("Undid {}.", mv),
                Err(e) => println!("Cannot undo: {}.", e),
            },
            Some("s") => {
                let limit = match words.next().map(str::parse::<u128>) {
                    None => None,
                    Some(Ok(n)) => Some(n),
                    Some(Err(_)) => {
                        println!("Usage: s [count]");
                        continue;
                    }
                };
                if simulate(puzzle, limit, delay) {
                    return Outcome::Won;
                }
            }
            Some(_) => match parse_move(trimmed) {
                Ok(mv) => match puzzle.apply(mv) {
                    Ok(disk) => {
                        debug!(%mv, disk, "player move");
                        if puzzle.is_won() {
                            announce_win(puzzle);
                            return Outcome::Won;
                        }
                    }
                    // The disk stays where it was; show why.
                    Err(e) => println!("Invalid move: {}.", e),
                },
                Err(e) => println!("Invalid input: {}.", e),
            },
        }
    }
}

/// Plays back the optimal solution from the start layout. Returns true if it
/// ran to the win.
fn simulate(puzzle: &mut Puzzle, limit: Option<u128>, delay: Option<Duration>) -> bool {
    let mut sim = Simulation::start(puzzle);
    if let Some(delay) = delay {
        sim = sim.with_delay(delay);
    }
    println!("Simulating the optimal solution from the start...");

    loop {
        if limit.is_some_and(|l| sim.applied() >= l) {
            sim.cancel();
            println!("Simulation paused after {} moves.", sim.applied());
            return false;
        }
        match sim.step(puzzle) {
            Ok(Some(step)) => {
                println!("Move {}: {} (disk {})", step.index, step.mv, step.disk);
                if puzzle.disks() <= REDRAW_LIMIT {
                    println!("{}", puzzle);
                }
                if step.won {
                    println!("Simulation complete.");
                    announce_win(puzzle);
                    return true;
                }
                thread::sleep(sim.delay());
            }
            Ok(None) => return false,
            Err(e) => {
                println!("Simulation stopped: {}.", e);
                return false;
            }
        }
    }
}

fn announce_win(puzzle: &Puzzle) {
    println!();
    println!("---------------------");
    println!("{}", puzzle);
    println!("You win!");
    if let Some(tower) = puzzle.winning_tower() {
        println!("All {} disks are on the {} tower.", puzzle.disks(), tower);
    }
    match optimal_move_count(puzzle.disks()) {
        Some(best) => println!("Moves: {} (optimal: {})", puzzle.steps(), best),
        None => println!("Moves: {}", puzzle.steps()),
    }
    println!("---------------------");
}

fn print_help() {
    println!("Commands:");
    println!("  <from> <to>  move the top disk, e.g. '1 3', 'a c' or 'ac'");
    println!("  s [count]    simulate the optimal solution (optionally only count moves)");
    println!("  u            undo the last move");
    println!("  r            reset the puzzle");
    println!("  h            show this help");
    println!("  q            quit");
}

fn ask_disk_count() -> Option<usize> {
    loop {
        let prompt = format!("Enter number of disks ({}-{}): ", MIN_DISKS, MAX_DISKS);
        let input = read_line(&prompt)?;
        match parse_disk_count(&input) {
            Ok(n) => return Some(n),
            Err(e) => println!("{}", e),
        }
    }
}

fn ask_yes_no(prompt: &str) -> bool {
    read_line(prompt).is_some_and(|s| s.trim().eq_ignore_ascii_case("y"))
}

/// Prints `prompt` and reads one line. Returns `None` on end of input or a read error.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}
