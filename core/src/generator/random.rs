use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Purely random generation, reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate(config, &mut rng)
    }
}

/// Generates a board for a config using the given source of randomness.
///
/// Configs asking for every cell or more, empty boards included, come back fully mined without
/// sampling.
pub fn generate<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Board {
    let size = config.size();
    let total_cells = config.total_cells();

    // optimize for full boards
    if config.mines() >= total_cells {
        if config.mines() > total_cells {
            log::warn!(
                "Board already full, generated anyway, requested {} but only fits {}",
                config.mines(),
                total_cells
            );
        }
        return Board::from_mine_mask(Array2::from_elem(size.to_nd_index(), true));
    }

    let board = Board::from_mine_mask(sample_mines(size, config.mines(), rng));
    log::debug!(
        "Generated {}x{} board with {} mines",
        size.rows,
        size.cols,
        board.mine_count()
    );
    board
}

/// Places exactly `mines` mines on distinct cells, uniformly at random.
pub fn place_mines<R: Rng + ?Sized>(
    size: Size,
    mines: CellCount,
    rng: &mut R,
) -> Result<Array2<bool>> {
    let cells = size.total_cells();
    if mines > cells {
        return Err(ConfigError::TooManyMines { mines, cells }.into());
    }
    Ok(sample_mines(size, mines, rng))
}

/// Rejection sampling: draw any cell, redraw when it already holds a mine.
///
/// Callers guarantee `mines < rows * cols` or an empty request.
fn sample_mines<R: Rng + ?Sized>(size: Size, mines: CellCount, rng: &mut R) -> Array2<bool> {
    let mut mask: Array2<bool> = Array2::default(size.to_nd_index());
    let mut placed = 0;
    let mut rejected: u64 = 0;

    while placed < mines {
        let pos = Pos::new(rng.random_range(0..size.rows), rng.random_range(0..size.cols));
        let cell = &mut mask[pos.to_nd_index()];
        if *cell {
            rejected += 1;
            continue;
        }
        *cell = true;
        placed += 1;
    }

    log::trace!("Placed {} mines, {} draws rejected", placed, rejected);
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: Coord, cols: Coord, mines: CellCount) -> GameConfig {
        GameConfig::new(Size::new(rows, cols), mines, BoardLimits::default()).unwrap()
    }

    fn recount(board: &Board, pos: Pos) -> u8 {
        let size = board.size();
        let mut count = 0;
        for row in pos.row.saturating_sub(1)..=pos.row + 1 {
            for col in pos.col.saturating_sub(1)..=pos.col + 1 {
                let other = Pos::new(row, col);
                if other != pos && size.contains(other) && board.is_mine(other) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn places_exact_mine_count_with_correct_counts() {
        for seed in 0..32 {
            let config = config(12, 17, 60);
            let board = RandomBoardGenerator::new(seed).generate(config);

            assert_eq!(board.mine_count(), 60);
            assert_eq!(board.mine_positions().count(), 60);
            for pos in board.size().positions() {
                if !board.is_mine(pos) {
                    assert_eq!(board.adjacent_mine_count(pos), recount(&board, pos), "{pos:?}");
                }
            }
        }
    }

    #[test]
    fn same_seed_same_board() {
        let config = config(16, 30, 99);

        let first = RandomBoardGenerator::new(7).generate(config);
        let second = RandomBoardGenerator::new(7).generate(config);
        let other = RandomBoardGenerator::new(8).generate(config);

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn maximum_ratio_still_terminates() {
        let board = RandomBoardGenerator::new(1).generate(config(10, 10, 33));

        assert_eq!(board.mine_count(), 33);
    }

    #[test]
    fn unchecked_board_config_never_hangs_or_panics() {
        // configs taken from arbitrary fixed boards bypass the ratio bounds
        let tiny = Board::from_mine_coords(Size::new(2, 2), &[Pos::new(0, 0)]).unwrap();
        let board = RandomBoardGenerator::new(0).generate(tiny.game_config());
        assert_eq!(board.mine_count(), 1);

        let empty = Board::from_mine_coords(Size::new(0, 10), &[]).unwrap();
        let board = RandomBoardGenerator::new(0).generate(empty.game_config());
        assert_eq!(board.size(), Size::new(0, 10));
        assert_eq!(board.mine_count(), 0);

        let full = GameConfig::new_unchecked(Size::new(2, 2), 5);
        let board = RandomBoardGenerator::new(0).generate(full);
        assert_eq!(board.mine_count(), 4);
        assert_eq!(board.safe_cell_count(), 0);
    }

    #[test]
    fn place_mines_rejects_overfull_board() {
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(
            place_mines(Size::new(2, 2), 5, &mut rng),
            Err(ConfigError::TooManyMines { mines: 5, cells: 4 }.into())
        );
        let full = place_mines(Size::new(2, 2), 4, &mut rng).unwrap();
        assert!(full.iter().all(|&mine| mine));
    }
}
