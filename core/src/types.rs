use core::fmt;

use serde::{Deserialize, Serialize};

/// Single coordinate axis, used for the board side and for row/column indices.
pub type Coord = u8;

/// Count type used for mine counts, flag counts and total-cell counts.
pub type CellCount = u16;

/// Cell position on a square board, `row` first as printed on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: Coord,
    pub col: Coord,
}

impl Pos {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Index into an `ndarray::Array2` laid out as `[row, col]`.
    pub fn to_nd_index(self) -> [usize; 2] {
        [self.row.into(), self.col.into()]
    }

    /// Row-major position of the `index`-th cell on a board with the given side.
    pub(crate) fn from_flat_index(index: usize, side: Coord) -> Self {
        let side = usize::from(side);
        // index < side * side and side <= Coord::MAX, so both parts fit
        Self::new((index / side) as Coord, (index % side) as Coord)
    }

    pub const fn is_within(self, side: Coord) -> bool {
        self.row < side && self.col < side
    }

    /// Up to 8 surrounding positions that stay on a board of the given side.
    pub fn neighbors(self, side: Coord) -> Neighbors {
        Neighbors {
            center: self,
            side,
            next: 0,
        }
    }
}

impl From<(Coord, Coord)> for Pos {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount).saturating_mul(b as CellCount)
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone)]
pub struct Neighbors {
    center: Pos,
    side: Coord,
    next: usize,
}

impl Neighbors {
    fn shifted(&self, (d_row, d_col): (i8, i8)) -> Option<Pos> {
        let row = self.center.row.checked_add_signed(d_row)?;
        let col = self.center.col.checked_add_signed(d_col)?;
        let pos = Pos::new(row, col);
        pos.is_within(self.side).then_some(pos)
    }
}

impl Iterator for Neighbors {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = OFFSETS.get(self.next) {
            self.next += 1;
            if let Some(pos) = self.shifted(offset) {
                return Some(pos);
            }
        }
        None
    }
}
