use alloc::vec::Vec;

use crate::*;

/// Outcome of a surroundings check on a revealed cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChordResult {
    /// Target is not revealed, nothing changed.
    NotEligible,
    /// A mined neighbor is not flagged, nothing changed.
    Aborted,
    /// All mined neighbors are flagged, these cells were opened.
    Satisfied(Vec<CellDelta>),
    /// A neighbor reveal hit a mine, only reachable on a board whose flags disagree with its
    /// mines. Cells opened before the hit are kept.
    HitMine { opened: Vec<CellDelta>, fatal: Pos },
}

/// Opens every hidden neighbor of a revealed cell once all of its mined neighbors are flagged.
///
/// The safety check runs over every neighbor before anything is opened, so an unsafe chord
/// leaves the board exactly as it was. Flags on safe cells are tolerated and left in place.
pub fn chord(board: &mut Board, pos: Pos) -> Result<ChordResult> {
    let pos = board.validate_pos(pos)?;

    if !board.visibility(pos).is_revealed() {
        return Ok(ChordResult::NotEligible);
    }

    let unflagged_mine = board
        .neighbors(pos)
        .find(|&neighbor| board.is_mine(neighbor) && !board.visibility(neighbor).is_flagged());
    if let Some(mine) = unflagged_mine {
        log::debug!("Chord at {:?} aborted, unflagged mine at {:?}", pos, mine);
        return Ok(ChordResult::Aborted);
    }

    let mut opened = Vec::new();
    for neighbor in board.neighbors(pos) {
        // an earlier neighbor's cascade may already have opened this one
        if !board.visibility(neighbor).is_hidden() {
            continue;
        }
        match reveal(board, neighbor)? {
            RevealResult::Opened(cells) => opened.extend(cells),
            RevealResult::AlreadyOpen => {}
            RevealResult::HitMine => {
                log::warn!("Chord at {:?} reached a mine at {:?}", pos, neighbor);
                return Ok(ChordResult::HitMine {
                    opened,
                    fatal: neighbor,
                });
            }
        }
    }

    log::debug!("Chord at {:?} opened {} cells", pos, opened.len());
    Ok(ChordResult::Satisfied(opened))
}
