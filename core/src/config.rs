use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

use crate::*;

/// Smallest accepted side length, for both rows and columns.
pub const MIN_SIDE: Coord = 10;

/// Largest board the caller can display.
///
/// The engine itself has no upper bound, the surface owning the display does, so the caller
/// hands its own maximum in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLimits {
    pub max: Size,
}

impl BoardLimits {
    pub const fn new(max_rows: Coord, max_cols: Coord) -> Self {
        Self {
            max: Size::new(max_rows, max_cols),
        }
    }
}

impl Default for BoardLimits {
    fn default() -> Self {
        Self::new(Coord::MAX, Coord::MAX)
    }
}

/// Allowed mine counts for a board: a tenth to a third of its cells, rounded down.
pub const fn mine_range(size: Size) -> RangeInclusive<CellCount> {
    let total = size.total_cells();
    (total / 10)..=(total / 3)
}

/// Validated board dimensions and mine count.
///
/// Only obtainable through [`GameConfig::new`] or deserialization, which checks the same bounds
/// against the default limits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    size: Size,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    size: Size,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.size, raw.mines, BoardLimits::default())
    }
}

impl GameConfig {
    /// Skips validation, used for fixed layouts that are known to be consistent.
    pub(crate) const fn new_unchecked(size: Size, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Size, mines: CellCount, limits: BoardLimits) -> Result<Self> {
        if !(MIN_SIDE..=limits.max.rows).contains(&size.rows) {
            return Err(ConfigError::Rows {
                rows: size.rows,
                min: MIN_SIDE,
                max: limits.max.rows,
            }
            .into());
        }

        if !(MIN_SIDE..=limits.max.cols).contains(&size.cols) {
            return Err(ConfigError::Cols {
                cols: size.cols,
                min: MIN_SIDE,
                max: limits.max.cols,
            }
            .into());
        }

        let range = mine_range(size);
        if !range.contains(&mines) {
            return Err(ConfigError::Mines {
                mines,
                min: *range.start(),
                max: *range.end(),
            }
            .into());
        }

        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn size(&self) -> Size {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        self.size.total_cells()
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}
