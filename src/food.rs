use rand::Rng;

use crate::grid::Grid;
use crate::snake::{Position, Snake};

/// Picks a uniformly random cell not covered by the snake.
///
/// Returns `None` once the snake fills the whole board.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, grid: Grid, snake: &Snake) -> Option<Position> {
    let free_cells = grid.size().total_cells().saturating_sub(snake.len());
    let mut candidates = Vec::with_capacity(free_cells);
    candidates.extend(grid.cells().filter(|position| !snake.occupies(*position)));

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
