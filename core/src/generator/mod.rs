use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Source of the true mine layout, asked once when the first cell is revealed.
pub trait MineGenerator {
    fn generate(&mut self, config: GameConfig, first_click: Pos) -> Result<MineLayout>;
}

/// How the first revealed cell is kept free of mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstClick {
    /// Leave the first cell out of the random draw.
    #[default]
    Exclude,
    /// Draw over the whole board, then move a mine under the first cell to the
    /// first empty cell in row-major order.
    Relocate,
}

/// A fixed layout is placed verbatim, whatever the first click is, as long as
/// it has the requested shape.
impl MineGenerator for MineLayout {
    fn generate(&mut self, config: GameConfig, _first_click: Pos) -> Result<MineLayout> {
        if config != self.game_config() {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(self.clone())
    }
}
