use thiserror::Error;

use crate::{CellCount, Coord, Pos};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates {pos} for a {side}x{side} board")]
    InvalidCoordinate { pos: Pos, side: Coord },
    #[error("Illegal cell operation: {0}")]
    IllegalCellOperation(#[from] IllegalMove),
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Board side must be at least 1")]
    EmptyBoard,
    #[error("Mine count {mines} must be between 1 and {max}")]
    InvalidMineCount { mines: CellCount, max: CellCount },
}

/// Moves that are well-formed but not allowed on the current cell state.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("cell is flagged, unflag it before revealing")]
    RevealFlagged,
    #[error("cell is already revealed")]
    AlreadyRevealed,
    #[error("cannot flag a revealed cell")]
    FlagRevealed,
    #[error("cell is already flagged")]
    AlreadyFlagged,
    #[error("cell is not flagged")]
    NotFlagged,
}

pub type Result<T> = core::result::Result<T, GameError>;
