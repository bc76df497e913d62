use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of toggling a flag on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagResult {
    Flagged,
    Unflagged,
    NoOp,
}

/// Ground truth and player-visible state of every cell, stored as parallel grids.
///
/// `mines` and `counts` are fixed once the board is built; only `visibility` changes during
/// play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    mines: Array2<bool>,
    counts: Array2<u8>,
    visibility: Array2<Visibility>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct RawBoard {
    mines: Array2<bool>,
    counts: Array2<u8>,
    visibility: Array2<Visibility>,
    mine_count: CellCount,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    /// Rebuilds the ground truth from the mine mask and only accepts the stored copy if it matches.
    fn try_from(raw: RawBoard) -> Result<Self> {
        let dim = raw.mines.dim();
        if raw.counts.dim() != dim || raw.visibility.dim() != dim {
            return Err(GameError::InvalidBoardShape);
        }
        if Coord::try_from(dim.0).is_err() || Coord::try_from(dim.1).is_err() {
            return Err(GameError::InvalidBoardShape);
        }

        let mut board = Self::from_mine_mask(raw.mines);
        if board.counts != raw.counts || board.mine_count != raw.mine_count {
            return Err(GameError::InconsistentState("adjacency counts do not match mines"));
        }
        if board
            .mines
            .iter()
            .zip(raw.visibility.iter())
            .any(|(&mine, &visibility)| mine && visibility.is_revealed())
        {
            return Err(GameError::InconsistentState("a mine is revealed"));
        }

        board.visibility = raw.visibility;
        Ok(board)
    }
}

impl Board {
    /// Builds a board from a mine mask, deriving the adjacency counts.
    ///
    /// Counts are accumulated outward from every mine into its non-mine neighbors.
    pub fn from_mine_mask(mines: Array2<bool>) -> Self {
        let size = mask_size(&mines);
        let mut counts: Array2<u8> = Array2::zeros(mines.raw_dim());
        let mut mine_count = 0;

        for pos in size.positions() {
            if !mines[pos.to_nd_index()] {
                continue;
            }
            mine_count += 1;
            for neighbor in size.neighbors(pos) {
                if !mines[neighbor.to_nd_index()] {
                    counts[neighbor.to_nd_index()] += 1;
                }
            }
        }

        Self {
            visibility: Array2::default(mines.raw_dim()),
            mines,
            counts,
            mine_count,
        }
    }

    /// Builds a board with mines at exactly the given positions, duplicates collapse.
    pub fn from_mine_coords(size: Size, mine_coords: &[Pos]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());

        for &pos in mine_coords {
            if !size.contains(pos) {
                return Err(GameError::InvalidCoordinate { pos, size });
            }
            mines[pos.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mines))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Size {
        mask_size(&self.mines)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.size().total_cells() - self.mine_count
    }

    pub fn validate_pos(&self, pos: Pos) -> Result<Pos> {
        let size = self.size();
        if size.contains(pos) {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoordinate { pos, size })
        }
    }

    pub fn is_mine(&self, pos: Pos) -> bool {
        self.mines[pos.to_nd_index()]
    }

    /// Number of mined neighbors, meaningless for a mine cell.
    pub fn adjacent_mine_count(&self, pos: Pos) -> u8 {
        self.counts[pos.to_nd_index()]
    }

    pub fn visibility(&self, pos: Pos) -> Visibility {
        self.visibility[pos.to_nd_index()]
    }

    pub fn neighbors(&self, pos: Pos) -> Neighbors {
        self.size().neighbors(pos)
    }

    /// Every mine position in row-major order.
    pub fn mine_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size();
        self.mines
            .iter()
            .enumerate()
            .filter(|&(_, &is_mine)| is_mine)
            .map(move |(index, _)| size.pos_of(index))
    }

    pub fn count_visibility(&self, visibility: Visibility) -> CellCount {
        // a board never holds more cells than `CellCount` can count
        self.visibility.iter().filter(|&&v| v == visibility).count() as CellCount
    }

    /// Flips a cell between hidden and flagged, revealed cells are left alone.
    pub fn toggle_flag(&mut self, pos: Pos) -> Result<FlagResult> {
        let pos = self.validate_pos(pos)?;
        let cell = &mut self.visibility[pos.to_nd_index()];

        Ok(match *cell {
            Visibility::Hidden => {
                *cell = Visibility::Flagged;
                FlagResult::Flagged
            }
            Visibility::Flagged => {
                *cell = Visibility::Hidden;
                FlagResult::Unflagged
            }
            Visibility::Revealed => FlagResult::NoOp,
        })
    }

    /// Marks a hidden safe cell as revealed, returning its adjacency count.
    pub(crate) fn open(&mut self, pos: Pos) -> u8 {
        self.visibility[pos.to_nd_index()] = Visibility::Revealed;
        self.counts[pos.to_nd_index()]
    }
}

fn mask_size(mask: &Array2<bool>) -> Size {
    let (rows, cols) = mask.dim();
    // masks are only ever allocated from a `Size`
    Size::new(rows as Coord, cols as Coord)
}
