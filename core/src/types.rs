use serde::{Deserialize, Serialize};

/// Single coordinate axis used for row/column indices and board sides.
pub type Coord = u16;

/// Count type used for mine counts, cell totals and the revealed counter.
pub type CellCount = u32;

/// A cell address, `row` counted from the top and `col` from the left.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: Coord,
    pub col: Coord,
}

impl Pos {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    pub fn to_nd_index(self) -> [usize; 2] {
        [self.row.into(), self.col.into()]
    }
}

impl From<(Coord, Coord)> for Pos {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self { row, col }
    }
}

/// Board dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub rows: Coord,
    pub cols: Coord,
}

impl Size {
    pub const fn new(rows: Coord, cols: Coord) -> Self {
        Self { rows, cols }
    }

    pub const fn total_cells(self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn contains(self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn to_nd_index(self) -> [usize; 2] {
        [self.rows.into(), self.cols.into()]
    }

    /// Existing neighbors of `pos`, never more than 8 and never wrapping around an edge.
    pub fn neighbors(self, pos: Pos) -> Neighbors {
        Neighbors {
            center: pos,
            size: self,
            step: 0,
        }
    }

    /// Every position of the board in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Pos> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Pos::new(row, col)))
    }

    /// Position of the `index`-th cell in row-major order.
    pub(crate) fn pos_of(self, index: usize) -> Pos {
        let cols = usize::from(self.cols);
        // both quotient and remainder are below a `Coord` bound
        Pos::new((index / cols) as Coord, (index % cols) as Coord)
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount) * (b as CellCount)
}

/// Bounds-checked iterator over the surrounding cells of a position.
///
/// Walks the 3x3 block centered on the position and yields only the cells that
/// exist on the board, skipping the center itself.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Pos,
    size: Size,
    step: u8,
}

impl Iterator for Neighbors {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        while self.step < 9 {
            let step = self.step;
            self.step += 1;

            if step == 4 {
                continue;
            }

            let row = offset(self.center.row, step / 3, self.size.rows);
            let col = offset(self.center.col, step % 3, self.size.cols);
            if let (Some(row), Some(col)) = (row, col) {
                return Some(Pos::new(row, col));
            }
        }
        None
    }
}

/// `value - 1 + shift` when that lands in `0..bound`.
fn offset(value: Coord, shift: u8, bound: Coord) -> Option<Coord> {
    let next = (u32::from(value) + u32::from(shift)).checked_sub(1)?;
    if next < u32::from(bound) {
        Coord::try_from(next).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn collect(size: Size, pos: Pos) -> Vec<Pos> {
        size.neighbors(pos).collect()
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let neighbors = collect(Size::new(10, 10), Pos::new(4, 4));

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&Pos::new(4, 4)));
        assert!(neighbors.contains(&Pos::new(5, 5)));
        assert!(neighbors.contains(&Pos::new(3, 3)));
    }

    #[test]
    fn corners_and_edges_are_clipped() {
        let size = Size::new(10, 12);

        assert_eq!(
            collect(size, Pos::new(0, 0)),
            [Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]
        );
        assert_eq!(
            collect(size, Pos::new(9, 11)),
            [Pos::new(8, 10), Pos::new(8, 11), Pos::new(9, 10)]
        );
        assert_eq!(collect(size, Pos::new(0, 5)).len(), 5);
        assert_eq!(collect(size, Pos::new(5, 11)).len(), 5);
    }

    #[test]
    fn no_wraparound_on_max_coordinates() {
        let size = Size::new(Coord::MAX, Coord::MAX);
        let corner = Pos::new(Coord::MAX - 1, Coord::MAX - 1);

        assert_eq!(collect(size, corner).len(), 3);
    }

    #[test]
    fn positions_are_row_major() {
        let size = Size::new(2, 3);
        let all: Vec<_> = size.positions().collect();

        assert_eq!(all.len(), 6);
        assert_eq!(all[1], Pos::new(0, 1));
        assert_eq!(all[3], Pos::new(1, 0));
        assert_eq!(size.pos_of(4), Pos::new(1, 1));
    }
}
