use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::*;

/// Outcome of revealing a single cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealResult {
    /// Cell was already revealed or is flagged, nothing changed.
    AlreadyOpen,
    /// Cell holds a mine, the board is left untouched.
    HitMine,
    /// Every cell opened by this call, the target first, each exactly once.
    Opened(Vec<CellDelta>),
}

/// Reveals `pos` and floods outward through zero-count cells.
///
/// Uses a work list instead of recursion so the depth is bounded by the queue, not the call
/// stack. A cell only enters the queue while hidden and is marked revealed as it is taken out,
/// so re-entry through another zero neighbor is a no-op. Flagged cells stop the flood.
pub fn reveal(board: &mut Board, pos: Pos) -> Result<RevealResult> {
    let pos = board.validate_pos(pos)?;

    if !board.visibility(pos).is_hidden() {
        return Ok(RevealResult::AlreadyOpen);
    }

    if board.is_mine(pos) {
        log::debug!("Revealed mine at {:?}", pos);
        return Ok(RevealResult::HitMine);
    }

    let mut opened = Vec::new();
    let mut to_visit = VecDeque::from([pos]);

    while let Some(visit) = to_visit.pop_front() {
        if !board.visibility(visit).is_hidden() {
            continue;
        }

        if board.is_mine(visit) {
            log::warn!("Flood fill reached a mine at {:?}, skipping", visit);
            continue;
        }

        let count = board.open(visit);
        opened.push(CellDelta::revealed(visit, count));
        log::trace!("Opened cell at {:?}, mine count: {}", visit, count);

        if count == 0 {
            to_visit.extend(
                board
                    .neighbors(visit)
                    .filter(|&neighbor| board.visibility(neighbor).is_hidden()),
            );
        }
    }

    log::debug!("Reveal at {:?} opened {} cells", pos, opened.len());
    Ok(RevealResult::Opened(opened))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    fn board(size: Size, mines: &[Pos]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn opened(result: RevealResult) -> Vec<CellDelta> {
        match result {
            RevealResult::Opened(cells) => cells,
            other => panic!("expected opened cells, got {other:?}"),
        }
    }

    #[test]
    fn numbered_cell_opens_alone() {
        let mut board = board(Size::new(3, 3), &[Pos::new(0, 0)]);

        let cells = opened(reveal(&mut board, Pos::new(1, 1)).unwrap());

        assert_eq!(cells, [CellDelta::revealed(Pos::new(1, 1), 1)]);
        assert_eq!(board.count_visibility(Visibility::Revealed), 1);
    }

    #[test]
    fn mine_returns_hit_without_mutation() {
        let mut board = board(Size::new(3, 3), &[Pos::new(2, 2)]);
        let before = board.clone();

        assert_eq!(reveal(&mut board, Pos::new(2, 2)), Ok(RevealResult::HitMine));
        assert_eq!(board, before);
    }

    #[test]
    fn second_reveal_is_already_open() {
        let mut board = board(Size::new(3, 3), &[Pos::new(0, 0)]);
        reveal(&mut board, Pos::new(2, 2)).unwrap();
        let before = board.clone();

        assert_eq!(
            reveal(&mut board, Pos::new(2, 2)),
            Ok(RevealResult::AlreadyOpen)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn flagged_cell_is_blocked() {
        let mut board = board(Size::new(3, 3), &[Pos::new(0, 0)]);
        board.toggle_flag(Pos::new(2, 2)).unwrap();

        assert_eq!(
            reveal(&mut board, Pos::new(2, 2)),
            Ok(RevealResult::AlreadyOpen)
        );

        board.toggle_flag(Pos::new(2, 2)).unwrap();
        assert!(matches!(
            reveal(&mut board, Pos::new(2, 2)),
            Ok(RevealResult::Opened(_))
        ));
    }

    #[test]
    fn flood_opens_zero_region_and_border() {
        // mine column splits the board, left side stays covered
        let mines = [Pos::new(0, 2), Pos::new(1, 2), Pos::new(2, 2), Pos::new(3, 2)];
        let mut board = board(Size::new(4, 6), &mines);

        let cells = opened(reveal(&mut board, Pos::new(0, 5)).unwrap());
        let positions: BTreeSet<_> = cells.iter().map(|delta| delta.pos).collect();

        assert_eq!(cells.len(), positions.len());
        assert_eq!(positions.len(), 12);
        assert!(positions.iter().all(|pos| pos.col >= 3));
        assert!(board.visibility(Pos::new(0, 0)).is_hidden());
        assert!(mines.iter().all(|&mine| board.visibility(mine).is_hidden()));
        assert_eq!(
            cells.iter().find(|delta| delta.pos == Pos::new(1, 3)).unwrap().display,
            DisplayValue::Count(3)
        );
    }

    #[test]
    fn flood_stops_at_flags() {
        let mut board = board(Size::new(3, 3), &[]);
        board.toggle_flag(Pos::new(1, 1)).unwrap();

        let cells = opened(reveal(&mut board, Pos::new(0, 0)).unwrap());

        assert_eq!(cells.len(), 8);
        assert_eq!(board.visibility(Pos::new(1, 1)), Visibility::Flagged);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut board = board(Size::new(3, 3), &[]);
        let before = board.clone();

        assert_eq!(
            reveal(&mut board, Pos::new(3, 0)),
            Err(GameError::InvalidCoordinate {
                pos: Pos::new(3, 0),
                size: Size::new(3, 3)
            })
        );
        assert_eq!(board, before);
    }
}
