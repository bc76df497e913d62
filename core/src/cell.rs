use serde::{Deserialize, Serialize};

use crate::Pos;

/// Player-visible state of a cell, stored explicitly by the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl Visibility {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// What a renderer should draw for a cell after a change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayValue {
    /// Covered cell.
    Hidden,
    /// Player flag.
    Flag,
    /// Revealed cell without adjacent mines.
    Blank,
    /// Revealed cell with 1 to 8 adjacent mines.
    Count(u8),
}

impl DisplayValue {
    pub const fn for_count(count: u8) -> Self {
        if count == 0 { Self::Blank } else { Self::Count(count) }
    }
}

/// A single cell state change, in the order the engine applied it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellDelta {
    pub pos: Pos,
    pub visibility: Visibility,
    pub display: DisplayValue,
}

impl CellDelta {
    pub const fn revealed(pos: Pos, count: u8) -> Self {
        Self {
            pos,
            visibility: Visibility::Revealed,
            display: DisplayValue::for_count(count),
        }
    }

    pub const fn flagged(pos: Pos) -> Self {
        Self {
            pos,
            visibility: Visibility::Flagged,
            display: DisplayValue::Flag,
        }
    }

    pub const fn hidden(pos: Pos) -> Self {
        Self {
            pos,
            visibility: Visibility::Hidden,
            display: DisplayValue::Hidden,
        }
    }
}
