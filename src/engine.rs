//! Core game engine for the Tower of Hanoi puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `TowerId`: Names one of the three towers.
//! - `Tower`: An ordered stack of disks, smaller disks always resting on larger ones.
//! - `Move`: An ordered pair of towers. A move onto its own tower is always rejected.
//! - `Puzzle`: Owns the three towers, validates moves, detects the win, and keeps
//!   a move counter plus a bounded undo history.
use crate::error::{IllegalMoveReason, PuzzleError};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, instrument, trace};

/// A disk, identified by its size. `1` is the smallest disk.
pub type Disk = u8;

/// Smallest disk count a puzzle accepts.
pub const MIN_DISKS: usize = 1;

/// Largest disk count a puzzle accepts.
pub const MAX_DISKS: usize = 200;

/// Identifies one of the three towers.
///
/// All disks start on `Source`. The optimal solver targets `Destination`,
/// but consolidating every disk on either non-source tower wins the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TowerId {
    Source,
    Auxiliary,
    Destination,
}

impl TowerId {
    /// All towers, in left-to-right display order.
    pub const ALL: [TowerId; 3] = [TowerId::Source, TowerId::Auxiliary, TowerId::Destination];

    /// Position of the tower in left-to-right order (0-based).
    pub fn index(self) -> usize {
        match self {
            TowerId::Source => 0,
            TowerId::Auxiliary => 1,
            TowerId::Destination => 2,
        }
    }

    /// Single-letter label used by the text front ends.
    ///
    /// # Examples
    /// ```
    /// use hanoi_solver::engine::TowerId;
    /// assert_eq!(TowerId::Source.label(), 'A');
    /// assert_eq!(TowerId::Destination.label(), 'C');
    /// ```
    pub fn label(self) -> char {
        match self {
            TowerId::Source => 'A',
            TowerId::Auxiliary => 'B',
            TowerId::Destination => 'C',
        }
    }
}

impl fmt::Display for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TowerId::Source => "source",
            TowerId::Auxiliary => "auxiliary",
            TowerId::Destination => "destination",
        };
        f.write_str(name)
    }
}

/// An ordered stack of disks.
///
/// Disks are stored bottom first. Sizes strictly decrease from bottom to top,
/// which `Puzzle` guarantees by only mutating towers through validated moves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tower {
    disks: Vec<Disk>,
}

impl Tower {
    /// The disk on top of the tower, if any.
    pub fn top(&self) -> Option<Disk> {
        self.disks.last().copied()
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Disks from bottom to top.
    pub fn bottom_up(&self) -> &[Disk] {
        &self.disks
    }

    /// Disks from top to bottom.
    pub fn top_down(&self) -> impl Iterator<Item = Disk> + '_ {
        self.disks.iter().rev().copied()
    }

    /// Disk at `level` counted from the bottom (0 = bottom disk).
    pub fn disk_at(&self, level: usize) -> Option<Disk> {
        self.disks.get(level).copied()
    }

    fn push(&mut self, disk: Disk) {
        self.disks.push(disk);
    }

    fn pop(&mut self) -> Option<Disk> {
        self.disks.pop()
    }
}

/// A move of the top disk of `from` onto `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: TowerId,
    pub to: TowerId,
}

impl Move {
    pub fn new(from: TowerId, to: TowerId) -> Self {
        Move { from, to }
    }

    /// The move that undoes this one.
    pub fn reversed(self) -> Self {
        Move {
            from: self.to,
            to: self.from,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from.label(), self.to.label())
    }
}

/// Most recent moves kept for `undo_last_move`. Older moves are forgotten.
pub const UNDO_LIMIT: usize = 256;

/// Width in characters of one tower column in the text rendering.
pub const COLUMN_WIDTH: usize = 23;

const MIN_DISK_WIDTH: usize = 3;
const MAX_DISK_WIDTH: usize = COLUMN_WIDTH - 2;

/// Width of a disk of `size` when `disks` disks share the range `min..=max`.
///
/// Width grows linearly with the disk size: the smallest disk gets `min`, the
/// largest gets `max`. A single-disk puzzle draws its disk at `min`.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::disk_width;
/// assert_eq!(disk_width(1, 5, 3, 21), 3);
/// assert_eq!(disk_width(5, 5, 3, 21), 21);
/// assert_eq!(disk_width(3, 5, 3, 21), 12);
/// ```
pub fn disk_width(size: Disk, disks: usize, min: usize, max: usize) -> usize {
    let denom = disks.saturating_sub(1).max(1);
    let step = usize::from(size).saturating_sub(1);
    min + (max.saturating_sub(min)) * step / denom
}

/// The state of a Tower of Hanoi session.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::{Puzzle, TowerId};
///
/// let mut puzzle = Puzzle::new(1).unwrap();
/// assert!(!puzzle.is_won());
///
/// let moved = puzzle.attempt_move(TowerId::Source, TowerId::Destination).unwrap();
/// assert_eq!(moved, 1);
/// assert!(puzzle.is_won());
/// assert_eq!(puzzle.steps(), 1);
///
/// puzzle.reset();
/// assert_eq!(puzzle.tower(TowerId::Source).len(), 1);
/// assert_eq!(puzzle.steps(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    disks: usize,
    towers: [Tower; 3],
    steps: u64,
    history: VecDeque<Move>,
}

impl Puzzle {
    /// Creates a puzzle with `disks` disks stacked on the source tower,
    /// largest at the bottom and disk `1` on top.
    ///
    /// # Errors
    /// `PuzzleError::InvalidConfiguration` if `disks` is outside
    /// `MIN_DISKS..=MAX_DISKS`.
    #[instrument(level = "debug")]
    pub fn new(disks: usize) -> Result<Self, PuzzleError> {
        if !(MIN_DISKS..=MAX_DISKS).contains(&disks) {
            debug!(disks, "rejected disk count");
            return Err(PuzzleError::InvalidConfiguration {
                disks,
                min: MIN_DISKS,
                max: MAX_DISKS,
            });
        }
        Ok(Puzzle {
            disks,
            towers: Self::initial_towers(disks),
            steps: 0,
            history: VecDeque::new(),
        })
    }

    /// Builds a puzzle from an already validated layout.
    pub(crate) fn from_towers(disks: usize, towers: [Tower; 3]) -> Self {
        Puzzle {
            disks,
            towers,
            steps: 0,
            history: VecDeque::new(),
        }
    }

    pub(crate) fn tower_from_bottom_up(disks: Vec<Disk>) -> Tower {
        Tower { disks }
    }

    fn initial_towers(disks: usize) -> [Tower; 3] {
        // MAX_DISKS fits in a Disk, so the conversion never truncates.
        let top = Disk::try_from(disks).unwrap_or(Disk::MAX);
        let source = Tower {
            disks: (1..=top).rev().collect(),
        };
        [source, Tower::default(), Tower::default()]
    }

    /// Number of disks this puzzle was configured with.
    pub fn disks(&self) -> usize {
        self.disks
    }

    pub fn tower(&self, id: TowerId) -> &Tower {
        &self.towers[id.index()]
    }

    /// Number of successful moves since the puzzle was created or last reset.
    ///
    /// Undone moves are subtracted again.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Checks whether moving the top disk of `from` onto `to` is legal.
    ///
    /// Returns the disk that would move.
    pub fn check_move(&self, from: TowerId, to: TowerId) -> Result<Disk, PuzzleError> {
        let illegal = |reason| PuzzleError::IllegalMove { from, to, reason };
        if from == to {
            return Err(illegal(IllegalMoveReason::SameTower));
        }
        let disk = self
            .tower(from)
            .top()
            .ok_or_else(|| illegal(IllegalMoveReason::EmptySource))?;
        match self.tower(to).top() {
            Some(top) if top < disk => Err(illegal(IllegalMoveReason::LargerOnSmaller { disk, top })),
            _ => Ok(disk),
        }
    }

    /// Moves the top disk of `from` onto `to`.
    ///
    /// An empty target tower accepts any disk. On success the moved disk's size
    /// is returned and the move is remembered for undo, up to `UNDO_LIMIT` moves.
    ///
    /// # Errors
    /// `PuzzleError::IllegalMove` if `from` is empty, `from == to`, or the
    /// target's top disk is smaller than the moving disk. The puzzle is left
    /// untouched in that case.
    pub fn attempt_move(&mut self, from: TowerId, to: TowerId) -> Result<Disk, PuzzleError> {
        let disk = match self.check_move(from, to) {
            Ok(disk) => disk,
            Err(err) => {
                debug!(%from, %to, error = %err, "move rejected");
                return Err(err);
            }
        };
        self.transfer(from, to);
        if self.history.len() == UNDO_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(Move::new(from, to));
        self.steps = self.steps.saturating_add(1);
        trace!(disk, %from, %to, steps = self.steps, "disk moved");
        Ok(disk)
    }

    /// Applies `mv` with the same rules as `attempt_move`.
    pub fn apply(&mut self, mv: Move) -> Result<Disk, PuzzleError> {
        self.attempt_move(mv.from, mv.to)
    }

    /// Reverts the most recent successful move.
    ///
    /// # Errors
    /// `PuzzleError::NothingToUndo` if no move was made since the last reset,
    /// or the last `UNDO_LIMIT` moves have already been undone.
    pub fn undo_last_move(&mut self) -> Result<Move, PuzzleError> {
        let last = self.history.pop_back().ok_or(PuzzleError::NothingToUndo)?;
        // Reversing a legal move always lands the disk back on a larger one.
        let back = last.reversed();
        self.transfer(back.from, back.to);
        self.steps = self.steps.saturating_sub(1);
        debug!(%last, steps = self.steps, "move undone");
        Ok(last)
    }

    fn transfer(&mut self, from: TowerId, to: TowerId) {
        if let Some(disk) = self.towers[from.index()].pop() {
            self.towers[to.index()].push(disk);
        }
    }

    /// True once a tower other than the source holds all disks.
    pub fn is_won(&self) -> bool {
        self.winning_tower().is_some()
    }

    /// The non-source tower holding all disks, if any.
    pub fn winning_tower(&self) -> Option<TowerId> {
        [TowerId::Auxiliary, TowerId::Destination]
            .into_iter()
            .find(|&id| self.tower(id).len() == self.disks)
    }

    /// True while the puzzle is in its start layout.
    pub fn is_initial(&self) -> bool {
        self.towers == Self::initial_towers(self.disks)
    }

    /// Restores the start layout for the configured disk count, zeroes the move
    /// counter and clears the undo history.
    #[instrument(level = "debug", skip(self), fields(disks = self.disks))]
    pub fn reset(&mut self) {
        self.towers = Self::initial_towers(self.disks);
        self.steps = 0;
        self.history.clear();
    }

    /// Renders the towers side by side, optionally highlighting one tower.
    ///
    /// Disks are drawn as ANSI-coloured bars whose width scales with the disk
    /// size, labelled with the size when it fits. A highlighted tower gets a
    /// marker under its label.
    pub fn to_string_with_highlight(&self, highlight: Option<TowerId>) -> String {
        let mut output = String::new();

        for level in (0..=self.disks).rev() {
            for id in TowerId::ALL {
                let cell = match self.tower(id).disk_at(level) {
                    Some(disk) => self.render_disk(disk),
                    None => render_peg(highlight == Some(id)),
                };
                output.push_str(&cell);
            }
            output.push('\n');
        }

        for id in TowerId::ALL {
            let label = format!("{} ({})", id.label(), id);
            output.push_str(&format!("{:^width$}", label, width = COLUMN_WIDTH));
        }
        if let Some(id) = highlight {
            output.push('\n');
            for other in TowerId::ALL {
                let marker = if other == id { "^" } else { "" };
                output.push_str(&format!("{:^width$}", marker, width = COLUMN_WIDTH));
            }
        }

        output
    }

    fn render_disk(&self, disk: Disk) -> String {
        // Odd widths keep the bar centred on the peg.
        let width = disk_width(disk, self.disks, MIN_DISK_WIDTH, MAX_DISK_WIDTH) | 1;
        let pad = (COLUMN_WIDTH - width) / 2;
        let label = disk.to_string();
        let body = if label.len() <= width {
            format!("{:^width$}", label, width = width)
        } else {
            " ".repeat(width)
        };
        format!(
            "{}\x1b[1;30;{}m{}\x1b[m{}",
            " ".repeat(pad),
            disk_color_code(disk),
            body,
            " ".repeat(pad)
        )
    }
}

fn render_peg(highlight: bool) -> String {
    let pad = " ".repeat(COLUMN_WIDTH / 2);
    if highlight {
        format!("{}\x1b[1;33m|\x1b[m{}", pad, pad)
    } else {
        format!("{}|{}", pad, pad)
    }
}

/// ANSI background colour for a disk, cycling so neighbours differ.
fn disk_color_code(disk: Disk) -> &'static str {
    match disk % 5 {
        0 => "45",
        1 => "46",
        2 => "42",
        3 => "43",
        _ => "44",
    }
}

impl fmt::Display for Puzzle {
    /// Formats the puzzle using `to_string_with_highlight(None)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}
