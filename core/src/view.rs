use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A cell as the player is allowed to see it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    /// Mine shown after a loss.
    Mine,
    /// The mine that ended the game.
    Detonated,
    /// Flag on a safe cell, shown after a loss.
    WrongFlag,
}

/// Snapshot of the whole board from the player's side.
///
/// While the game is running only visible state is exposed. After a loss unflagged mines and
/// wrong flags are disclosed, after a win the remaining mines show up flagged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub size: Size,
    pub outcome: Outcome,
    pub mines_left: i64,
    pub remaining_safe_cells: CellCount,
    pub cells: Array2<CellView>,
}

impl View {
    pub fn from_session(session: &GameSession) -> Self {
        let board = session.board();
        let size = board.size();
        let outcome = session.outcome();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::Hidden);

        for pos in size.positions() {
            let mine = board.is_mine(pos);
            cells[pos.to_nd_index()] = match (board.visibility(pos), mine, outcome) {
                (Visibility::Revealed, _, _) => CellView::Revealed(board.adjacent_mine_count(pos)),
                (Visibility::Flagged, false, Outcome::Lost) => CellView::WrongFlag,
                (Visibility::Flagged, _, _) => CellView::Flagged,
                (Visibility::Hidden, true, Outcome::Lost) if session.fatal_mine() == Some(pos) => {
                    CellView::Detonated
                }
                (Visibility::Hidden, true, Outcome::Lost) => CellView::Mine,
                (Visibility::Hidden, true, Outcome::Won) => CellView::Flagged,
                (Visibility::Hidden, _, _) => CellView::Hidden,
            };
        }

        let mines_left = if outcome == Outcome::Won {
            0
        } else {
            session.mines_left()
        };

        Self {
            size,
            outcome,
            mines_left,
            remaining_safe_cells: session.remaining_safe_cells(),
            cells,
        }
    }

    pub fn cell(&self, pos: Pos) -> Option<CellView> {
        self.cells.get(pos.to_nd_index()).copied()
    }
}
