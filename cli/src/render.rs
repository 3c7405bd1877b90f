use core::fmt;

use colored::{Color, Colorize};
use sweeper_core::{Board, CellView, Coord, Pos};

/// Text rendering of the player-visible board with row and column indices.
pub struct BoardView<'a, G> {
    board: &'a Board<G>,
    color: bool,
}

impl<'a, G> BoardView<'a, G> {
    pub fn new(board: &'a Board<G>, color: bool) -> Self {
        Self { board, color }
    }

    fn glyph(&self, pos: Pos) -> (char, Option<Color>) {
        match self.board.cell_at(pos) {
            CellView::Hidden => ('-', None),
            CellView::Flagged => ('F', Some(Color::BrightRed)),
            CellView::Revealed(0) => (' ', None),
            CellView::Revealed(count) => (
                char::from(b'0' + count),
                Some(match count {
                    1 => Color::Blue,
                    2 => Color::Green,
                    3 => Color::Red,
                    4 => Color::Magenta,
                    5 => Color::Yellow,
                    6 => Color::Cyan,
                    7 => Color::BrightBlack,
                    _ => Color::White,
                }),
            ),
            CellView::RevealedMine => ('*', Some(Color::BrightWhite)),
        }
    }

    fn write_cell(&self, f: &mut fmt::Formatter<'_>, pos: Pos) -> fmt::Result {
        let (glyph, color) = self.glyph(pos);
        f.write_str("  ")?;
        if !self.color {
            return write!(f, "{}", glyph);
        }

        let styled = glyph.to_string();
        let styled = match color {
            Some(color) => styled.color(color).bold(),
            None => styled.normal(),
        };
        if self.board.triggered_mine() == Some(pos) {
            write!(f, "{}", styled.on_red())
        } else {
            write!(f, "{}", styled)
        }
    }
}

impl<G> fmt::Display for BoardView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side: Coord = self.board.side();

        f.write_str("   ")?;
        for col in 0..side {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;

        for row in 0..side {
            write!(f, "{:>3}", row)?;
            for col in 0..side {
                self.write_cell(f, Pos::new(row, col))?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "Mines: {}  Flags: {}  Moves left: {}",
            self.board.mine_count(),
            self.board.flag_count(),
            self.board.moves_remaining()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::MineLayout;

    fn board() -> Board<MineLayout> {
        let layout = MineLayout::from_mine_coords(2, &[Pos::new(0, 0)]).unwrap();
        Board::with_layout(layout)
    }

    #[test]
    fn renders_hidden_flagged_and_counts() {
        let mut board = board();
        board.reveal(Pos::new(1, 1)).unwrap();
        board.toggle_flag(Pos::new(0, 1)).unwrap();

        let text = BoardView::new(&board, false).to_string();

        assert_eq!(
            text,
            "     0  1\n  0  -  F\n  1  -  1\nMines: 1  Flags: 1  Moves left: 2\n"
        );
    }

    #[test]
    fn renders_mines_and_blank_zeroes_after_win() {
        let layout = MineLayout::from_mine_coords(3, &[Pos::new(0, 0)]).unwrap();
        let mut board = Board::with_layout(layout);
        board.reveal(Pos::new(2, 2)).unwrap();

        let text = BoardView::new(&board, false).to_string();

        assert_eq!(
            text,
            "     0  1  2\n  0  *  1   \n  1  1  1   \n  2         \nMines: 1  Flags: 0  Moves left: 0\n"
        );
    }
}
