//! Board engine for a single-player Minesweeper game.
//!
//! The engine keeps the true mine layout apart from what the player can see,
//! defers mine placement to the first reveal so that the first cell is always
//! safe, and reports every move as a [`Result`] so front ends can re-prompt
//! instead of failing.

use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub side: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(side: Coord, mines: CellCount) -> Self {
        Self { side, mines }
    }

    /// Validates `1 <= side` and `1 <= mines < side * side`.
    pub fn new(side: Coord, mines: CellCount) -> Result<Self> {
        if side == 0 {
            return Err(GameError::EmptyBoard);
        }
        let max = mult(side, side) - 1;
        if mines == 0 || mines > max {
            return Err(GameError::InvalidMineCount { mines, max });
        }
        Ok(Self::new_unchecked(side, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.side, self.side)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// True mine layout of a board, with the mine positions kept next to the mask.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    side: Coord,
    mine_mask: Array2<bool>,
    mine_positions: Vec<Pos>,
}

impl MineLayout {
    pub(crate) fn empty(side: Coord) -> Self {
        let side_ix = usize::from(side);
        Self {
            side,
            mine_mask: Array2::default((side_ix, side_ix)),
            mine_positions: Vec::new(),
        }
    }

    /// Builds a layout from explicit mine positions, duplicates are ignored.
    pub fn from_mine_coords(side: Coord, mine_coords: &[Pos]) -> Result<Self> {
        if side == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut layout = Self::empty(side);
        for &pos in mine_coords {
            let pos = layout.validate(pos)?;
            layout.place(pos);
        }
        Ok(layout)
    }

    /// Marks `pos` as a mine, returns false if it already was one.
    pub(crate) fn place(&mut self, pos: Pos) -> bool {
        let cell = &mut self.mine_mask[pos.to_nd_index()];
        if *cell {
            return false;
        }
        *cell = true;
        self.mine_positions.push(pos);
        true
    }

    /// Moves the mine at `from` onto the empty cell `to`, rewriting its entry in place.
    pub(crate) fn relocate(&mut self, from: Pos, to: Pos) {
        debug_assert!(self[from] && !self[to]);
        self.mine_mask[from.to_nd_index()] = false;
        self.mine_mask[to.to_nd_index()] = true;
        if let Some(entry) = self.mine_positions.iter_mut().find(|entry| **entry == from) {
            *entry = to;
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.side, self.mine_count())
    }

    pub fn validate(&self, pos: Pos) -> Result<Pos> {
        if pos.is_within(self.side) {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoordinate {
                pos,
                side: self.side,
            })
        }
    }

    pub fn side(&self) -> Coord {
        self.side
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.side, self.side)
    }

    pub fn mine_count(&self) -> CellCount {
        // bounded by total_cells, which fits CellCount
        self.mine_positions.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn contains_mine(&self, pos: Pos) -> bool {
        self[pos]
    }

    /// Mine positions in placement order.
    pub fn mine_positions(&self) -> &[Pos] {
        &self.mine_positions
    }

    pub fn adjacent_mine_count(&self, pos: Pos) -> u8 {
        pos.neighbors(self.side).filter(|&near| self[near]).count() as u8
    }
}

impl Index<Pos> for MineLayout {
    type Output = bool;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.mine_mask[pos.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Safe reveal, `cells` counts every cell opened including the flood fill.
    Revealed { cells: CellCount },
    HitMine,
    Won,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    Flagged,
    Unflagged,
}
