use crate::engine::{Disk, Move, Puzzle, TowerId, MAX_DISKS, MIN_DISKS};
use crate::error::{ParseError, PuzzleError};

/// Parses a tower name.
///
/// Accepts the letter labels (`A`, `B`, `C`), 1-based numbers (`1`, `2`, `3`)
/// and the names `source`/`src`, `auxiliary`/`aux`, `destination`/`dest`/`dst`,
/// case-insensitively.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::TowerId;
/// use hanoi_solver::utils::parse_tower;
/// assert_eq!(parse_tower("b").unwrap(), TowerId::Auxiliary);
/// assert_eq!(parse_tower("3").unwrap(), TowerId::Destination);
/// assert!(parse_tower("4").is_err());
/// ```
pub fn parse_tower(s: &str) -> Result<TowerId, ParseError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "a" | "1" | "src" | "source" => Ok(TowerId::Source),
        "b" | "2" | "aux" | "auxiliary" => Ok(TowerId::Auxiliary),
        "c" | "3" | "dst" | "dest" | "destination" => Ok(TowerId::Destination),
        _ => Err(ParseError::UnknownTower(s.trim().to_string())),
    }
}

/// Parses a move command: two tower names separated by whitespace or `->`,
/// or two single-character labels written together (`ac`, `13`).
///
/// # Examples
/// ```
/// use hanoi_solver::engine::{Move, TowerId};
/// use hanoi_solver::utils::parse_move;
/// let expected = Move::new(TowerId::Source, TowerId::Destination);
/// assert_eq!(parse_move("1 3").unwrap(), expected);
/// assert_eq!(parse_move("a -> c").unwrap(), expected);
/// assert_eq!(parse_move("AC").unwrap(), expected);
/// ```
pub fn parse_move(s: &str) -> Result<Move, ParseError> {
    let normalized = s.replace("->", " ");
    let parts: Vec<&str> = normalized.split_whitespace().collect();
    match parts.as_slice() {
        [from, to] => Ok(Move::new(parse_tower(from)?, parse_tower(to)?)),
        [compact] if compact.chars().count() == 2 => {
            let mut chars = compact.chars().map(|c| c.to_string());
            match (chars.next(), chars.next()) {
                (Some(from), Some(to)) => Ok(Move::new(parse_tower(&from)?, parse_tower(&to)?)),
                _ => Err(ParseError::MalformedMove(s.trim().to_string())),
            }
        }
        _ => Err(ParseError::MalformedMove(s.trim().to_string())),
    }
}

/// Parses a disk count and checks it against `MIN_DISKS..=MAX_DISKS`.
pub fn parse_disk_count(s: &str) -> Result<usize, ParseError> {
    let trimmed = s.trim();
    let disks: usize = trimmed
        .parse()
        .map_err(|_| ParseError::InvalidNumber(trimmed.to_string()))?;
    if !(MIN_DISKS..=MAX_DISKS).contains(&disks) {
        return Err(PuzzleError::InvalidConfiguration {
            disks,
            min: MIN_DISKS,
            max: MAX_DISKS,
        }
        .into());
    }
    Ok(disks)
}

/// Builds a `Puzzle` from one row per tower.
///
/// Each row lists the disks of one tower from top to bottom, separated by
/// whitespace; an empty row or `.` stands for an empty tower. Rows are given
/// in `TowerId::ALL` order. The disk count is the total number of disks,
/// which must be exactly `1..=n` with each disk once.
///
/// Any layout reached this way satisfies the tower ordering, so the puzzle can
/// be played from it. `reset` still returns to the standard start layout.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::TowerId;
/// use hanoi_solver::utils::puzzle_from_str_array;
///
/// let puzzle = puzzle_from_str_array(&["3", "1 2", "."]).unwrap();
/// assert_eq!(puzzle.disks(), 3);
/// assert_eq!(puzzle.tower(TowerId::Auxiliary).top(), Some(1));
///
/// assert!(puzzle_from_str_array(&["2 1", "", ""]).is_err());
/// ```
pub fn puzzle_from_str_array(rows: &[&str]) -> Result<Puzzle, ParseError> {
    if rows.len() != TowerId::ALL.len() {
        return Err(ParseError::WrongTowerCount {
            expected: TowerId::ALL.len(),
            found: rows.len(),
        });
    }

    let mut towers = Vec::with_capacity(TowerId::ALL.len());
    let mut seen = vec![false; MAX_DISKS + 1];
    let mut total = 0usize;

    for (id, row) in TowerId::ALL.into_iter().zip(rows) {
        let mut top_down: Vec<Disk> = Vec::new();
        for token in row.split_whitespace().filter(|t| *t != ".") {
            let disk: Disk = token
                .parse()
                .ok()
                .filter(|&d| d >= 1 && usize::from(d) <= MAX_DISKS)
                .ok_or_else(|| ParseError::InvalidDisk {
                    tower: id,
                    token: token.to_string(),
                })?;
            if let Some(&upper) = top_down.last() {
                if upper >= disk {
                    return Err(ParseError::Unordered {
                        tower: id,
                        upper,
                        lower: disk,
                    });
                }
            }
            if std::mem::replace(&mut seen[usize::from(disk)], true) {
                return Err(ParseError::DuplicateDisk(disk));
            }
            top_down.push(disk);
            total += 1;
        }
        top_down.reverse();
        towers.push(Puzzle::tower_from_bottom_up(top_down));
    }

    if total < MIN_DISKS {
        return Err(PuzzleError::InvalidConfiguration {
            disks: total,
            min: MIN_DISKS,
            max: MAX_DISKS,
        }
        .into());
    }
    if !seen[1..=total].iter().all(|&s| s) {
        return Err(ParseError::DiskSetMismatch { disks: total });
    }

    let mut towers = towers.into_iter();
    match (towers.next(), towers.next(), towers.next()) {
        (Some(source), Some(aux), Some(dest)) => {
            Ok(Puzzle::from_towers(total, [source, aux, dest]))
        }
        _ => Err(ParseError::WrongTowerCount {
            expected: TowerId::ALL.len(),
            found: rows.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tower_aliases() {
        for s in ["A", "a", "1", "source", "SRC", " a "] {
            assert_eq!(parse_tower(s).unwrap(), TowerId::Source, "{:?}", s);
        }
        for s in ["B", "2", "aux", "Auxiliary"] {
            assert_eq!(parse_tower(s).unwrap(), TowerId::Auxiliary, "{:?}", s);
        }
        for s in ["c", "3", "dst", "dest", "destination"] {
            assert_eq!(parse_tower(s).unwrap(), TowerId::Destination, "{:?}", s);
        }
        assert_eq!(
            parse_tower("x"),
            Err(ParseError::UnknownTower("x".to_string()))
        );
        // Single letters other than the labels are left to the player commands.
        assert!(parse_tower("s").is_err());
    }

    #[test]
    fn test_parse_move_forms() {
        let a_to_b = Move::new(TowerId::Source, TowerId::Auxiliary);
        assert_eq!(parse_move("1 2").unwrap(), a_to_b);
        assert_eq!(parse_move("a->b").unwrap(), a_to_b);
        assert_eq!(parse_move("  source   aux ").unwrap(), a_to_b);
        assert_eq!(parse_move("12").unwrap(), a_to_b);
    }

    #[test]
    fn test_parse_move_errors() {
        assert!(matches!(parse_move(""), Err(ParseError::MalformedMove(_))));
        assert!(matches!(parse_move("1 2 3"), Err(ParseError::MalformedMove(_))));
        assert!(matches!(parse_move("abc"), Err(ParseError::MalformedMove(_))));
        assert!(matches!(parse_move("1 9"), Err(ParseError::UnknownTower(_))));
    }

    #[test]
    fn test_parse_disk_count() {
        assert_eq!(parse_disk_count(" 7 ").unwrap(), 7);
        assert_eq!(parse_disk_count("200").unwrap(), 200);
        assert!(matches!(
            parse_disk_count("0"),
            Err(ParseError::Puzzle(PuzzleError::InvalidConfiguration { disks: 0, .. }))
        ));
        assert!(matches!(
            parse_disk_count("201"),
            Err(ParseError::Puzzle(PuzzleError::InvalidConfiguration { disks: 201, .. }))
        ));
        assert_eq!(
            parse_disk_count("seven"),
            Err(ParseError::InvalidNumber("seven".to_string()))
        );
    }

    #[test]
    fn test_puzzle_from_str_array_start_layout() {
        let puzzle = puzzle_from_str_array(&["1 2 3", "", ""]).unwrap();
        assert_eq!(puzzle, Puzzle::new(3).unwrap());
        assert!(puzzle.is_initial());
    }

    #[test]
    fn test_puzzle_from_str_array_won_layout() {
        let puzzle = puzzle_from_str_array(&[".", "1 2", ""]).unwrap();
        assert!(puzzle.is_won());
        assert_eq!(puzzle.winning_tower(), Some(TowerId::Auxiliary));
    }

    #[test]
    fn test_puzzle_from_str_array_playable() {
        let mut puzzle = puzzle_from_str_array(&["2 3", "", "1"]).unwrap();
        assert!(puzzle.attempt_move(TowerId::Source, TowerId::Destination).is_err());
        assert_eq!(puzzle.attempt_move(TowerId::Source, TowerId::Auxiliary), Ok(2));
        assert_eq!(puzzle.attempt_move(TowerId::Destination, TowerId::Auxiliary), Ok(1));
        puzzle.reset();
        assert_eq!(puzzle, Puzzle::new(3).unwrap());
    }

    #[test]
    fn test_puzzle_from_str_array_errors() {
        assert_eq!(
            puzzle_from_str_array(&["1", ""]).unwrap_err(),
            ParseError::WrongTowerCount {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            puzzle_from_str_array(&["2 1", "", ""]).unwrap_err(),
            ParseError::Unordered {
                tower: TowerId::Source,
                upper: 2,
                lower: 1
            }
        );
        assert!(matches!(
            puzzle_from_str_array(&["1 x", "", ""]),
            Err(ParseError::InvalidDisk { tower: TowerId::Source, .. })
        ));
        assert!(matches!(
            puzzle_from_str_array(&["1", "1", ""]),
            Err(ParseError::DuplicateDisk(1))
        ));
        assert_eq!(
            puzzle_from_str_array(&["1 3", "", ""]).unwrap_err(),
            ParseError::DiskSetMismatch { disks: 2 }
        );
        assert!(matches!(
            puzzle_from_str_array(&["", ".", ""]),
            Err(ParseError::Puzzle(PuzzleError::InvalidConfiguration { disks: 0, .. }))
        ));
    }
}
