//! # Hanoi Solver Library
//!
//! This library provides the core game logic for the Tower of Hanoi puzzle
//! and a lazy generator of its optimal solution.
//!
//! It is used by two binaries:
//! - `human_player`: Interactive gameplay on the command line, including reset,
//!   undo and an automatic playback of the optimal solution.
//! - `ai_solver`: Prints the optimal move sequence for a given disk count.
//!
//! ## Modules
//! - `engine`: Towers, moves, and the `Puzzle` state with move validation and win detection.
//! - `solver`: The optimal `2^n - 1` move sequence as an iterator with linear memory.
//! - `simulation`: Step-by-step playback of the solver's moves on a live puzzle.
//! - `utils`: Parsing of tower names, move commands, disk counts, and puzzle layouts.
//! - `error`: Error types shared by the modules above.
//! - `logging`: `tracing` subscriber setup for the binaries.

pub mod engine;
pub mod error;
pub mod logging;
pub mod simulation;
pub mod solver;
pub mod utils;
