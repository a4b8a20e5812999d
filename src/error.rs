//! Error types for the Hanoi puzzle engine.

use crate::engine::{Disk, TowerId};
use thiserror::Error;

/// Why a move attempt was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// The tower to take a disk from has no disks.
    EmptySource,
    /// The moving disk is larger than the disk on top of the target tower.
    LargerOnSmaller { disk: Disk, top: Disk },
    /// Source and target name the same tower.
    SameTower,
}

impl std::fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMoveReason::EmptySource => write!(f, "source tower is empty"),
            IllegalMoveReason::LargerOnSmaller { disk, top } => {
                write!(f, "disk {} cannot rest on smaller disk {}", disk, top)
            }
            IllegalMoveReason::SameTower => write!(f, "source and target are the same tower"),
        }
    }
}

/// Errors produced by the puzzle state model and the simulation driver.
///
/// All of them are recoverable: the puzzle is never left half-modified.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// Disk count outside `MIN_DISKS..=MAX_DISKS`.
    #[error("invalid disk count {disks}: expected between {min} and {max}")]
    InvalidConfiguration { disks: usize, min: usize, max: usize },

    /// Rejected move attempt; the puzzle is unchanged.
    #[error("illegal move {from} -> {to}: {reason}")]
    IllegalMove {
        from: TowerId,
        to: TowerId,
        reason: IllegalMoveReason,
    },

    /// `undo_last_move` was called with no move since the last reset.
    #[error("no move to undo")]
    NothingToUndo,
}

/// Errors produced while parsing text input (commands, tower names, layouts).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized tower '{0}'")]
    UnknownTower(String),

    #[error("expected 'from to', found '{0}'")]
    MalformedMove(String),

    #[error("expected a number, found '{0}'")]
    InvalidNumber(String),

    #[error("invalid disk '{token}' on tower {tower}")]
    InvalidDisk { tower: TowerId, token: String },

    #[error("expected {expected} tower rows, found {found}")]
    WrongTowerCount { expected: usize, found: usize },

    #[error("tower {tower} is not ordered: disk {upper} sits on disk {lower}")]
    Unordered {
        tower: TowerId,
        upper: Disk,
        lower: Disk,
    },

    #[error("disk {0} appears more than once")]
    DuplicateDisk(Disk),

    #[error("layout must hold each disk 1..={disks} exactly once")]
    DiskSetMismatch { disks: usize },

    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}
