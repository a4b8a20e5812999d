use crate::engine::{Move, TowerId};

/// Length of the optimal solution for `disks` disks, `2^disks - 1`.
///
/// Returns `None` when the count does not fit in a `u128` (more than 128 disks).
///
/// # Examples
/// ```
/// use hanoi_solver::solver::optimal_move_count;
/// assert_eq!(optimal_move_count(0), Some(0));
/// assert_eq!(optimal_move_count(3), Some(7));
/// assert_eq!(optimal_move_count(128), Some(u128::MAX));
/// assert_eq!(optimal_move_count(200), None);
/// ```
pub fn optimal_move_count(disks: usize) -> Option<u128> {
    match disks {
        0..=127 => Some((1u128 << disks) - 1),
        128 => Some(u128::MAX),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    /// Move `disks` disks from `from` to `to`, parking on `via`.
    Solve {
        disks: usize,
        from: TowerId,
        via: TowerId,
        to: TowerId,
    },
    Emit(Move),
}

/// Lazy sequence of moves realising the classic recursive solution.
///
/// The recursion is unrolled onto an explicit stack holding at most two
/// entries per disk, so memory stays linear in the disk count even though the
/// sequence itself has `2^n - 1` moves. Cloning the iterator snapshots its
/// position; calling `optimal_moves` again starts from the first move.
#[derive(Clone, Debug)]
pub struct OptimalMoves {
    stack: Vec<Task>,
    remaining: Option<u128>,
}

impl OptimalMoves {
    /// Moves solving `disks` disks from `from` to `to` using `via` as the spare tower.
    pub fn between(disks: usize, from: TowerId, via: TowerId, to: TowerId) -> Self {
        let mut stack = Vec::with_capacity(2 * disks + 1);
        if disks > 0 {
            stack.push(Task::Solve {
                disks,
                from,
                via,
                to,
            });
        }
        OptimalMoves {
            stack,
            remaining: optimal_move_count(disks),
        }
    }

    /// Moves still to be produced, when that number fits in a `u128`.
    pub fn remaining(&self) -> Option<u128> {
        self.remaining
    }
}

impl Iterator for OptimalMoves {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        while let Some(task) = self.stack.pop() {
            match task {
                Task::Emit(mv) => {
                    self.remaining = self.remaining.map(|r| r.saturating_sub(1));
                    return Some(mv);
                }
                Task::Solve { disks: 0, .. } => {}
                Task::Solve {
                    disks: 1,
                    from,
                    to,
                    ..
                } => self.stack.push(Task::Emit(Move::new(from, to))),
                Task::Solve {
                    disks,
                    from,
                    via,
                    to,
                } => {
                    // Pushed in reverse: park n-1 on `via`, move the largest, restack on `to`.
                    self.stack.push(Task::Solve {
                        disks: disks - 1,
                        from: via,
                        via: from,
                        to,
                    });
                    self.stack.push(Task::Emit(Move::new(from, to)));
                    self.stack.push(Task::Solve {
                        disks: disks - 1,
                        from,
                        via: to,
                        to: via,
                    });
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining.map(usize::try_from) {
            Some(Ok(n)) => (n, Some(n)),
            _ => (usize::MAX, None),
        }
    }
}

/// The optimal solution for `disks` disks, moving them from the source tower
/// to the destination tower via the auxiliary tower.
///
/// Every move is legal when replayed in order against a freshly created
/// `Puzzle` with the same disk count.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::{Puzzle, TowerId};
/// use hanoi_solver::solver::optimal_moves;
///
/// let mut puzzle = Puzzle::new(4).unwrap();
/// for mv in optimal_moves(4) {
///     puzzle.apply(mv).unwrap();
/// }
/// assert_eq!(puzzle.winning_tower(), Some(TowerId::Destination));
/// assert_eq!(puzzle.steps(), 15);
/// ```
pub fn optimal_moves(disks: usize) -> OptimalMoves {
    OptimalMoves::between(disks, TowerId::Source, TowerId::Auxiliary, TowerId::Destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Puzzle, MAX_DISKS};
    use crate::engine::TowerId::{Auxiliary as B, Destination as C, Source as A};

    #[test]
    fn test_zero_disks_is_empty() {
        let mut moves = optimal_moves(0);
        assert_eq!(moves.remaining(), Some(0));
        assert_eq!(moves.next(), None);
    }

    #[test]
    fn test_three_disk_sequence() {
        let moves: Vec<Move> = optimal_moves(3).collect();
        let expected = vec![
            Move::new(A, C),
            Move::new(A, B),
            Move::new(C, B),
            Move::new(A, C),
            Move::new(B, A),
            Move::new(B, C),
            Move::new(A, C),
        ];
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_three_disk_replay_wins_only_at_end() {
        let mut puzzle = Puzzle::new(3).unwrap();
        let moves: Vec<Move> = optimal_moves(3).collect();
        for (i, mv) in moves.iter().enumerate() {
            assert!(!puzzle.is_won(), "won early before move {}", i + 1);
            puzzle.apply(*mv).unwrap();
        }
        assert!(puzzle.is_won());
        let dest: Vec<u8> = puzzle.tower(C).top_down().collect();
        assert_eq!(dest, vec![1, 2, 3]);
    }

    #[test]
    fn test_lengths_match_closed_form() {
        for n in 0..=16 {
            let count = optimal_moves(n).count() as u128;
            assert_eq!(Some(count), optimal_move_count(n), "n = {}", n);
        }
    }

    #[test]
    fn test_replay_is_always_legal() {
        for n in 1..=12 {
            let mut puzzle = Puzzle::new(n).unwrap();
            let total = optimal_move_count(n).unwrap();
            for (i, mv) in optimal_moves(n).enumerate() {
                puzzle
                    .apply(mv)
                    .unwrap_or_else(|e| panic!("n = {}, move {}: {}", n, i + 1, e));
                assert_eq!(puzzle.is_won(), (i + 1) as u128 == total);
            }
        }
    }

    #[test]
    fn test_restart_yields_same_sequence() {
        let first: Vec<Move> = optimal_moves(6).collect();
        let second: Vec<Move> = optimal_moves(6).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut moves = optimal_moves(4);
        assert_eq!(moves.size_hint(), (15, Some(15)));
        moves.next();
        moves.next();
        assert_eq!(moves.size_hint(), (13, Some(13)));
        assert_eq!(moves.remaining(), Some(13));
    }

    #[test]
    fn test_large_counts_are_lazy() {
        let mut moves = optimal_moves(MAX_DISKS);
        assert_eq!(moves.remaining(), None);
        assert_eq!(moves.size_hint(), (usize::MAX, None));

        // Even disk counts open with a move onto the auxiliary tower.
        assert_eq!(moves.next(), Some(Move::new(A, B)));
        assert!(moves.stack.len() <= 2 * MAX_DISKS + 1);

        let mut puzzle = Puzzle::new(MAX_DISKS).unwrap();
        puzzle.apply(Move::new(A, B)).unwrap();
        for mv in moves.take(10_000) {
            puzzle.apply(mv).unwrap();
        }
        assert!(!puzzle.is_won());
    }

    #[test]
    fn test_between_custom_towers() {
        let moves: Vec<Move> = OptimalMoves::between(2, B, A, C).collect();
        assert_eq!(moves, vec![Move::new(B, A), Move::new(B, C), Move::new(A, C)]);
    }
}
