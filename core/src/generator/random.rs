use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random placement, drawing distinct cells uniformly without replacement while keeping the first click
/// safe according to its [`FirstClick`] policy.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator<R = SmallRng> {
    rng: R,
    first_click: FirstClick,
}

impl RandomMineGenerator<SmallRng> {
    pub fn from_seed(seed: u64, first_click: FirstClick) -> Self {
        log::debug!("mine generator seed: {}", seed);
        Self::new(SmallRng::seed_from_u64(seed), first_click)
    }
}

impl<R: Rng> RandomMineGenerator<R> {
    pub fn new(rng: R, first_click: FirstClick) -> Self {
        Self { rng, first_click }
    }
}

impl<R: Rng> MineGenerator for RandomMineGenerator<R> {
    fn generate(&mut self, config: GameConfig, first_click: Pos) -> Result<MineLayout> {
        debug_assert!(first_click.is_within(config.side));

        let side = config.side;
        let mut layout = MineLayout::empty(side);
        let mut taken = vec![false; usize::from(config.total_cells())];
        let mut free_cells = taken.len();

        if self.first_click == FirstClick::Exclude {
            taken[flat_index(first_click, side)] = true;
            free_cells -= 1;
        }

        let requested = usize::from(config.mines);
        if requested > free_cells {
            log::warn!(
                "Cannot fit {} mines, only {} cells are free",
                requested,
                free_cells
            );
        }

        for _ in 0..requested.min(free_cells) {
            // index among the cells not taken yet, skipping taken ones while scanning
            let mut place = self.rng.random_range(0..free_cells);
            for (i, cell) in taken.iter_mut().enumerate() {
                if *cell {
                    place += 1;
                }
                if i == place {
                    *cell = true;
                    layout.place(Pos::from_flat_index(i, side));
                    free_cells -= 1;
                    break;
                }
            }
        }

        if self.first_click == FirstClick::Relocate {
            move_mine_off(&mut layout, first_click);
        }

        log::debug!(
            "placed {} mines on {}x{}, first click {}",
            layout.mine_count(),
            side,
            side,
            first_click
        );
        Ok(layout)
    }
}

fn flat_index(pos: Pos, side: Coord) -> usize {
    usize::from(pos.row) * usize::from(side) + usize::from(pos.col)
}

/// Moves a mine sitting on `first_click` to the first empty cell in row-major order.
fn move_mine_off(layout: &mut MineLayout, first_click: Pos) {
    if !layout.contains_mine(first_click) {
        return;
    }

    let side = layout.side();
    let target = (0..usize::from(layout.total_cells()))
        .map(|i| Pos::from_flat_index(i, side))
        .find(|&pos| !layout.contains_mine(pos));

    match target {
        Some(target) => {
            log::debug!("first click {} hit a mine, moved to {}", first_click, target);
            layout.relocate(first_click, target);
        }
        None => log::warn!("Board is full, cannot move the mine off {}", first_click),
    }
}
