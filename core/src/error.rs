use thiserror::Error;

use crate::{CellCount, Coord, Pos, Size};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates {pos:?} for a {}x{} board", .size.rows, .size.cols)]
    InvalidCoordinate { pos: Pos, size: Size },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Board grids do not share one shape")]
    InvalidBoardShape,
    #[error("Inconsistent game state: {0}")]
    InconsistentState(&'static str),
}

/// Construction-time bound violations, reported as-is and never clamped.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{rows} rows is outside the allowed range {min}..={max}")]
    Rows { rows: Coord, min: Coord, max: Coord },
    #[error("{cols} columns is outside the allowed range {min}..={max}")]
    Cols { cols: Coord, min: Coord, max: Coord },
    #[error("{mines} mines is outside the allowed range {min}..={max}")]
    Mines {
        mines: CellCount,
        min: CellCount,
        max: CellCount,
    },
    #[error("Cannot place {mines} mines on a board of {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
