//! Move-by-move playback of the optimal solution on a live puzzle.
//!
//! A `Simulation` never owns the puzzle: the front end keeps the single
//! `Puzzle` for the session and hands it to `step` on every tick. Playback can
//! stop at any move boundary, either by calling `cancel` or by simply not
//! calling `step` again.
use crate::engine::{Disk, Move, Puzzle};
use crate::error::PuzzleError;
use crate::solver::{optimal_moves, OptimalMoves};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Shortest pause between two simulated moves.
pub const MIN_TICK: Duration = Duration::from_millis(10);

/// Pause between simulated moves for a puzzle of `disks` disks.
///
/// Small puzzles play slowly enough to follow; the pause halves with every
/// extra disk up to ten disks and never drops below `MIN_TICK`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use hanoi_solver::simulation::tick_delay;
/// assert_eq!(tick_delay(1), Duration::from_millis(2500));
/// assert_eq!(tick_delay(3), Duration::from_millis(625));
/// assert_eq!(tick_delay(50), Duration::from_millis(10));
/// ```
pub fn tick_delay(disks: usize) -> Duration {
    let shift = disks.min(10) as u32;
    let millis = 5000u64 >> shift;
    Duration::from_millis(millis).max(MIN_TICK)
}

/// Outcome of one simulated move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationStep {
    /// 1-based position of the move in the solution.
    pub index: u128,
    pub mv: Move,
    pub disk: Disk,
    /// Whether the puzzle is solved after this move.
    pub won: bool,
}

/// Playback state of one simulation run.
#[derive(Clone, Debug)]
pub struct Simulation {
    moves: OptimalMoves,
    applied: u128,
    cancelled: bool,
    delay: Duration,
}

impl Simulation {
    /// Resets `puzzle` to its start layout and prepares playback of the
    /// optimal solution for its disk count.
    #[instrument(level = "info", skip(puzzle), fields(disks = puzzle.disks()))]
    pub fn start(puzzle: &mut Puzzle) -> Self {
        puzzle.reset();
        let delay = tick_delay(puzzle.disks());
        info!(
            total = ?crate::solver::optimal_move_count(puzzle.disks()),
            delay_ms = delay.as_millis() as u64,
            "simulation started"
        );
        Simulation {
            moves: optimal_moves(puzzle.disks()),
            applied: 0,
            cancelled: false,
            delay,
        }
    }

    /// Overrides the pause between moves.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Pause the front end should wait between two calls to `step`.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of moves applied so far.
    pub fn applied(&self) -> u128 {
        self.applied
    }

    /// Moves left in the run, when that number fits in a `u128`.
    pub fn remaining(&self) -> Option<u128> {
        if self.cancelled {
            Some(0)
        } else {
            self.moves.remaining()
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// True once the run has no further moves, either completed or cancelled.
    pub fn is_finished(&self) -> bool {
        self.remaining() == Some(0)
    }

    /// Stops playback. Later calls to `step` return `Ok(None)`.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            info!(applied = self.applied as u64, "simulation cancelled");
            self.cancelled = true;
        }
    }

    /// Pulls the next solution move and applies it to `puzzle`.
    ///
    /// Returns `Ok(None)` once the run is complete or cancelled.
    ///
    /// # Errors
    /// Returns the `PuzzleError::IllegalMove` from the puzzle if it was changed
    /// outside the simulation since `start`. The run is cancelled in that case.
    pub fn step(&mut self, puzzle: &mut Puzzle) -> Result<Option<SimulationStep>, PuzzleError> {
        if self.cancelled {
            return Ok(None);
        }
        let Some(mv) = self.moves.next() else {
            return Ok(None);
        };
        let disk = match puzzle.apply(mv) {
            Ok(disk) => disk,
            Err(err) => {
                warn!(%mv, error = %err, "puzzle diverged from the solution, stopping");
                self.cancelled = true;
                return Err(err);
            }
        };
        self.applied += 1;
        let won = puzzle.is_won();
        debug!(index = self.applied as u64, %mv, disk, won, "simulated move");
        if won {
            info!(moves = self.applied as u64, "simulation complete");
        }
        Ok(Some(SimulationStep {
            index: self.applied,
            mv,
            disk,
            won,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{TowerId, MAX_DISKS, UNDO_LIMIT};

    #[test]
    fn test_tick_delay_floor() {
        assert_eq!(tick_delay(9), Duration::from_millis(10));
        assert_eq!(tick_delay(10), Duration::from_millis(10));
        assert_eq!(tick_delay(200), MIN_TICK);
        assert_eq!(tick_delay(6), Duration::from_millis(78));
    }

    #[test]
    fn test_start_resets_puzzle() {
        let mut puzzle = Puzzle::new(3).unwrap();
        puzzle.attempt_move(TowerId::Source, TowerId::Auxiliary).unwrap();
        let sim = Simulation::start(&mut puzzle);
        assert!(puzzle.is_initial());
        assert_eq!(sim.applied(), 0);
        assert_eq!(sim.remaining(), Some(7));
        assert_eq!(sim.delay(), tick_delay(3));
    }

    #[test]
    fn test_full_run_wins_on_last_step() {
        let mut puzzle = Puzzle::new(4).unwrap();
        let mut sim = Simulation::start(&mut puzzle);
        let mut steps = Vec::new();
        while let Some(step) = sim.step(&mut puzzle).unwrap() {
            steps.push(step);
        }
        assert_eq!(steps.len(), 15);
        assert!(steps[..14].iter().all(|s| !s.won));
        assert!(steps[14].won);
        assert_eq!(steps[14].index, 15);
        assert_eq!(steps[7].disk, 4);
        assert!(sim.is_finished());
        assert_eq!(puzzle.winning_tower(), Some(TowerId::Destination));
        assert_eq!(sim.step(&mut puzzle), Ok(None));
    }

    #[test]
    fn test_cancel_stops_at_move_boundary() {
        let mut puzzle = Puzzle::new(5).unwrap();
        let mut sim = Simulation::start(&mut puzzle);
        for _ in 0..3 {
            sim.step(&mut puzzle).unwrap();
        }
        sim.cancel();
        let snapshot = puzzle.clone();
        assert_eq!(sim.step(&mut puzzle), Ok(None));
        assert_eq!(puzzle, snapshot);
        assert_eq!(puzzle.steps(), 3);
        assert!(sim.is_cancelled());
        assert!(sim.is_finished());
    }

    #[test]
    fn test_tampered_puzzle_cancels_run() {
        let mut puzzle = Puzzle::new(3).unwrap();
        let mut sim = Simulation::start(&mut puzzle);
        // Disk 1 is moved to B by hand, so the first solution move (A -> C)
        // carries disk 2 and the second (A -> B) tries disk 3 on disk 1.
        puzzle.attempt_move(TowerId::Source, TowerId::Auxiliary).unwrap();
        sim.step(&mut puzzle).unwrap();
        let err = sim.step(&mut puzzle).unwrap_err();
        assert!(matches!(err, PuzzleError::IllegalMove { .. }));
        assert!(sim.is_cancelled());
        assert_eq!(sim.step(&mut puzzle), Ok(None));
    }

    #[test]
    fn test_long_run_keeps_undo_history_bounded() {
        let mut puzzle = Puzzle::new(MAX_DISKS).unwrap();
        let mut sim = Simulation::start(&mut puzzle);
        for _ in 0..200_000 {
            sim.step(&mut puzzle).unwrap();
        }
        assert_eq!(sim.applied(), 200_000);
        assert_eq!(puzzle.steps(), 200_000);
        assert!(!puzzle.is_won());
        for _ in 0..UNDO_LIMIT {
            puzzle.undo_last_move().unwrap();
        }
        assert_eq!(puzzle.undo_last_move(), Err(PuzzleError::NothingToUndo));
    }

    #[test]
    fn test_restart_replays_from_scratch() {
        let mut puzzle = Puzzle::new(2).unwrap();
        let mut first = Simulation::start(&mut puzzle);
        first.step(&mut puzzle).unwrap();
        let mut second = Simulation::start(&mut puzzle);
        let step = second.step(&mut puzzle).unwrap().unwrap();
        assert_eq!(step.index, 1);
        assert_eq!(step.mv, Move::new(TowerId::Source, TowerId::Auxiliary));
    }
}
