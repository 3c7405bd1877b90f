use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No cell revealed yet, mines are not placed.
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game: the true layout once placed, the player's view of it, and the
/// counters derived from both.
#[derive(Clone, Debug)]
pub struct Board<G = RandomMineGenerator> {
    config: GameConfig,
    generator: G,
    mine_layout: Option<MineLayout>,
    cells: Array2<CellView>,
    moves_remaining: CellCount,
    flagged_count: CellCount,
    phase: GamePhase,
    triggered_mine: Option<Pos>,
}

impl<G> Board<G> {
    /// Empty board, mines are placed by `generator` on the first reveal.
    pub fn new(config: GameConfig, generator: G) -> Self {
        let side = usize::from(config.side);
        Self {
            config,
            generator,
            mine_layout: None,
            cells: Array2::default((side, side)),
            moves_remaining: config.safe_cells(),
            flagged_count: 0,
            phase: GamePhase::NotStarted,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn side(&self) -> Coord {
        self.config.side
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn flag_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flagged_count)
    }

    pub fn moves_remaining(&self) -> CellCount {
        self.moves_remaining
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    /// Visible state of an in-bounds cell.
    pub fn cell_at(&self, pos: Pos) -> CellView {
        self.cells[pos.to_nd_index()]
    }

    pub fn cells(&self) -> &Array2<CellView> {
        &self.cells
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Pos> {
        self.triggered_mine
    }

    /// True layout, only available once the first reveal placed the mines.
    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.mine_layout.as_ref()
    }

    pub fn toggle_flag(&mut self, pos: Pos) -> Result<MarkOutcome> {
        match self.checked_cell(pos)? {
            CellView::Flagged => self.unflag(pos),
            _ => self.flag(pos),
        }
    }

    pub fn flag(&mut self, pos: Pos) -> Result<MarkOutcome> {
        match self.checked_cell(pos)? {
            CellView::Hidden => {
                self.cells[pos.to_nd_index()] = CellView::Flagged;
                self.flagged_count += 1;
                Ok(MarkOutcome::Flagged)
            }
            CellView::Flagged => Err(IllegalMove::AlreadyFlagged.into()),
            CellView::Revealed(_) | CellView::RevealedMine => Err(IllegalMove::FlagRevealed.into()),
        }
    }

    pub fn unflag(&mut self, pos: Pos) -> Result<MarkOutcome> {
        match self.checked_cell(pos)? {
            CellView::Flagged => {
                self.cells[pos.to_nd_index()] = CellView::Hidden;
                self.flagged_count -= 1;
                Ok(MarkOutcome::Unflagged)
            }
            _ => Err(IllegalMove::NotFlagged.into()),
        }
    }

    /// Bounds and phase checks shared by every move.
    fn checked_cell(&self, pos: Pos) -> Result<CellView> {
        if !pos.is_within(self.config.side) {
            return Err(GameError::InvalidCoordinate {
                pos,
                side: self.config.side,
            });
        }
        if self.phase.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        Ok(self.cell_at(pos))
    }

    fn reveal_cell(&mut self, layout: &MineLayout, pos: Pos) -> RevealOutcome {
        if layout.contains_mine(pos) {
            self.triggered_mine = Some(pos);
            self.end_game(layout, GamePhase::Lost);
            return RevealOutcome::HitMine;
        }

        let mut opened: CellCount = 0;
        let mut frontier = VecDeque::from([pos]);
        while let Some(visit) = frontier.pop_front() {
            // queued twice, or flagged in the meantime
            if !self.cell_at(visit).is_hidden() {
                continue;
            }

            let adjacent_mines = layout.adjacent_mine_count(visit);
            self.cells[visit.to_nd_index()] = CellView::Revealed(adjacent_mines);
            self.moves_remaining -= 1;
            opened += 1;
            log::trace!("opened {} ({})", visit, adjacent_mines);

            if adjacent_mines == 0 {
                frontier.extend(
                    visit
                        .neighbors(self.config.side)
                        .filter(|&near| self.cell_at(near).is_hidden()),
                );
            }
        }

        if self.moves_remaining == 0 {
            self.end_game(layout, GamePhase::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed { cells: opened }
        }
    }

    fn end_game(&mut self, layout: &MineLayout, phase: GamePhase) {
        debug_assert!(phase.is_finished());
        for &mine in layout.mine_positions() {
            self.cells[mine.to_nd_index()] = CellView::RevealedMine;
        }
        log::debug!("game over: {:?}", phase);
        self.phase = phase;
    }
}

impl<G: MineGenerator> Board<G> {
    pub fn reveal(&mut self, pos: Pos) -> Result<RevealOutcome> {
        match self.checked_cell(pos)? {
            CellView::Hidden => {}
            CellView::Flagged => return Err(IllegalMove::RevealFlagged.into()),
            CellView::Revealed(_) | CellView::RevealedMine => {
                return Err(IllegalMove::AlreadyRevealed.into());
            }
        }

        // taken out for the duration of the reveal so the board can be mutated alongside it
        let layout = match self.mine_layout.take() {
            Some(layout) => layout,
            None => self.place_mines(pos)?,
        };
        let outcome = self.reveal_cell(&layout, pos);
        self.mine_layout = Some(layout);

        log::debug!("reveal {}: {:?}", pos, outcome);
        Ok(outcome)
    }

    fn place_mines(&mut self, first_click: Pos) -> Result<MineLayout> {
        let layout = self.generator.generate(self.config, first_click)?;
        if layout.game_config() != self.config {
            log::warn!(
                "Generated layout {:?} does not match board {:?}",
                layout.game_config(),
                self.config
            );
            return Err(GameError::InvalidBoardShape);
        }
        self.phase = GamePhase::InProgress;
        Ok(layout)
    }
}

impl Board<MineLayout> {
    /// Board over a hand-built layout, placed verbatim on the first reveal.
    pub fn with_layout(layout: MineLayout) -> Self {
        Self::new(layout.game_config(), layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(side: Coord, mines: &[(Coord, Coord)]) -> MineLayout {
        let mines: Vec<Pos> = mines.iter().copied().map(Pos::from).collect();
        MineLayout::from_mine_coords(side, &mines).unwrap()
    }

    fn random_board(side: Coord, mines: CellCount, seed: u64) -> Board {
        let config = GameConfig::new(side, mines).unwrap();
        Board::new(config, RandomMineGenerator::from_seed(seed, FirstClick::Exclude))
    }

    fn revealed_positions<G>(board: &Board<G>) -> Vec<Pos> {
        board
            .cells()
            .indexed_iter()
            .filter(|(_, cell)| matches!(cell, CellView::Revealed(_)))
            .map(|((row, col), _)| Pos::new(row as Coord, col as Coord))
            .collect()
    }

    #[test]
    fn new_board_is_hidden_and_not_started() {
        let board = random_board(9, 10, 1);
        assert_eq!(board.phase(), GamePhase::NotStarted);
        assert!(board.cells().iter().all(|cell| cell.is_hidden()));
        assert!(board.mine_layout().is_none());
        assert_eq!(board.moves_remaining(), 71);
    }

    #[test]
    fn beginner_first_reveal_is_safe() {
        for seed in 0..50 {
            let mut board = random_board(9, 10, seed);
            let outcome = board.reveal(Pos::new(4, 4)).unwrap();

            assert_ne!(outcome, RevealOutcome::HitMine);
            assert_ne!(board.phase(), GamePhase::Lost);
            let layout = board.mine_layout().unwrap();
            assert_eq!(layout.mine_count(), 10);
            assert!(!layout.contains_mine(Pos::new(4, 4)));
        }
    }

    #[test]
    fn relocate_policy_first_reveal_is_safe() {
        for seed in 0..50 {
            let config = GameConfig::new(3, 8).unwrap();
            let generator = RandomMineGenerator::from_seed(seed, FirstClick::Relocate);
            let mut board = Board::new(config, generator);

            assert_eq!(board.reveal(Pos::new(2, 1)).unwrap(), RevealOutcome::Won);
            assert_eq!(board.mine_layout().unwrap().mine_count(), 8);
        }
    }

    #[test]
    fn numbered_cell_does_not_flood() {
        let mut board = Board::with_layout(layout(9, &[(0, 0)]));
        // (8, 8) is far from the mine and floods, so pick a cell touching it
        let outcome = board.reveal(Pos::new(1, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed { cells: 1 });
        assert_eq!(revealed_positions(&board), [Pos::new(1, 1)]);
        assert_eq!(board.cell_at(Pos::new(1, 1)), CellView::Revealed(1));
    }

    #[test]
    fn positive_count_cell_reveals_only_itself() {
        // every cell other than the mine has a count above zero
        let mut board = Board::with_layout(layout(3, &[(0, 0), (2, 2), (0, 2), (2, 0)]));
        let outcome = board.reveal(Pos::new(2, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed { cells: 1 });
        assert_eq!(revealed_positions(&board), [Pos::new(2, 1)]);
        assert_eq!(board.moves_remaining(), 4);
    }

    #[test]
    fn zero_region_floods_to_numbered_frontier() {
        // column 2 is a wall of mines, columns 0 and 1 are the region to open
        let mut board = Board::with_layout(layout(4, &[(0, 2), (1, 2), (2, 2), (3, 2)]));

        let outcome = board.reveal(Pos::new(0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed { cells: 8 });
        for row in 0..4 {
            assert_eq!(board.cell_at(Pos::new(row, 0)), CellView::Revealed(0));
            assert!(matches!(board.cell_at(Pos::new(row, 1)), CellView::Revealed(n) if n >= 2));
            assert_eq!(board.cell_at(Pos::new(row, 2)), CellView::Hidden);
            assert_eq!(board.cell_at(Pos::new(row, 3)), CellView::Hidden);
        }
        assert_eq!(board.moves_remaining(), 4);
        assert_eq!(board.phase(), GamePhase::InProgress);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = Board::with_layout(layout(4, &[(3, 3)]));
        board.toggle_flag(Pos::new(0, 3)).unwrap();

        board.reveal(Pos::new(0, 0)).unwrap();

        assert_eq!(board.cell_at(Pos::new(0, 3)), CellView::Flagged);
        assert_eq!(board.moves_remaining(), 1);
        assert_eq!(board.phase(), GamePhase::InProgress);
    }

    #[test]
    fn hitting_a_mine_reveals_every_mine() {
        let mut board = Board::with_layout(layout(3, &[(0, 0), (2, 2)]));
        board.reveal(Pos::new(0, 2)).unwrap();
        board.flag(Pos::new(2, 2)).unwrap();

        let outcome = board.reveal(Pos::new(0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(board.phase(), GamePhase::Lost);
        assert_eq!(board.triggered_mine(), Some(Pos::new(0, 0)));
        assert_eq!(board.cell_at(Pos::new(0, 0)), CellView::RevealedMine);
        assert_eq!(board.cell_at(Pos::new(2, 2)), CellView::RevealedMine);
    }

    #[test]
    fn safe_reveals_count_down_to_win() {
        let mut board = Board::with_layout(layout(2, &[(0, 0)]));
        assert_eq!(board.moves_remaining(), 3);

        assert_eq!(board.reveal(Pos::new(0, 1)).unwrap(), RevealOutcome::Revealed { cells: 1 });
        assert_eq!(board.moves_remaining(), 2);
        assert_eq!(board.reveal(Pos::new(1, 0)).unwrap(), RevealOutcome::Revealed { cells: 1 });
        assert_eq!(board.moves_remaining(), 1);
        assert_eq!(board.reveal(Pos::new(1, 1)).unwrap(), RevealOutcome::Won);

        assert_eq!(board.moves_remaining(), 0);
        assert_eq!(board.phase(), GamePhase::Won);
        assert_eq!(board.cell_at(Pos::new(0, 0)), CellView::RevealedMine);
        assert_eq!(board.triggered_mine(), None);
    }

    #[test]
    fn flag_round_trip_restores_state() {
        let mut board = random_board(9, 10, 3);
        let pos = Pos::new(5, 5);

        assert_eq!(board.toggle_flag(pos).unwrap(), MarkOutcome::Flagged);
        assert_eq!(board.flag_count(), 1);
        assert_eq!(board.mines_left(), 9);
        assert_eq!(board.toggle_flag(pos).unwrap(), MarkOutcome::Unflagged);
        assert_eq!(board.cell_at(pos), CellView::Hidden);
        assert_eq!(board.flag_count(), 0);
    }

    #[test]
    fn double_flag_is_rejected() {
        let mut board = random_board(9, 10, 3);
        let pos = Pos::new(1, 2);

        board.flag(pos).unwrap();
        assert_eq!(
            board.flag(pos),
            Err(GameError::IllegalCellOperation(IllegalMove::AlreadyFlagged))
        );
        assert_eq!(board.flag_count(), 1);
        assert_eq!(
            board.unflag(Pos::new(0, 0)),
            Err(GameError::IllegalCellOperation(IllegalMove::NotFlagged))
        );
    }

    #[test]
    fn revealing_flagged_cell_is_rejected() {
        let mut board = random_board(9, 10, 5);
        board.toggle_flag(Pos::new(2, 2)).unwrap();

        assert_eq!(
            board.reveal(Pos::new(2, 2)),
            Err(GameError::IllegalCellOperation(IllegalMove::RevealFlagged))
        );
        assert_eq!(board.cell_at(Pos::new(2, 2)), CellView::Flagged);
        // rejected before placement, so the game has not started
        assert_eq!(board.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn revealed_cells_reject_reveal_and_flag() {
        let mut board = Board::with_layout(layout(3, &[(0, 0)]));
        board.reveal(Pos::new(1, 1)).unwrap();

        assert_eq!(
            board.reveal(Pos::new(1, 1)),
            Err(GameError::IllegalCellOperation(IllegalMove::AlreadyRevealed))
        );
        assert_eq!(
            board.toggle_flag(Pos::new(1, 1)),
            Err(GameError::IllegalCellOperation(IllegalMove::FlagRevealed))
        );
        assert_eq!(board.flag_count(), 0);
    }

    #[test]
    fn out_of_bounds_is_reported() {
        let mut board = random_board(9, 10, 0);
        let pos = Pos::new(9, 0);
        let err = GameError::InvalidCoordinate { pos, side: 9 };

        assert_eq!(board.reveal(pos), Err(err));
        assert_eq!(board.toggle_flag(pos), Err(err));
        assert_eq!(board.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn finished_game_rejects_moves() {
        let mut board = Board::with_layout(layout(2, &[(0, 0)]));
        board.reveal(Pos::new(0, 0)).unwrap();

        assert_eq!(board.reveal(Pos::new(1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(board.toggle_flag(Pos::new(1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(board.cell_at(Pos::new(1, 1)), CellView::Hidden);
    }

    #[test]
    fn mismatched_fixed_layout_is_rejected() {
        let config = GameConfig::new(9, 10).unwrap();
        let mut board = Board::new(config, layout(12, &[(0, 0)]));

        assert_eq!(board.reveal(Pos::new(5, 5)), Err(GameError::InvalidBoardShape));
        assert_eq!(board.phase(), GamePhase::NotStarted);
        assert!(board.mine_layout().is_none());
        assert_eq!(
            board.reveal(Pos::new(10, 10)),
            Err(GameError::InvalidCoordinate {
                pos: Pos::new(10, 10),
                side: 9
            })
        );
        assert!(board.cells().iter().all(|cell| cell.is_hidden()));
    }

    #[test]
    fn large_open_board_floods_without_recursion() {
        let mut board = Board::with_layout(layout(255, &[(254, 254)]));

        let outcome = board.reveal(Pos::new(0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(board.moves_remaining(), 0);
    }
}
