use log::debug;

use crate::grid::{Grid, Obstacles};
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Heading returned when every move is blocked. Moving anywhere ends the
/// game on the next collision check, which is the intended outcome.
pub const BOXED_IN_DIRECTION: Direction = Direction::Right;

/// Picks the legal move whose next head lands closest (Euclidean) to `food`.
///
/// When the two closest legal moves are equally close, the one leaving the
/// head farther from the tail wins. With no legal move at all this returns
/// [`BOXED_IN_DIRECTION`].
#[must_use]
pub fn greedy_move(grid: Grid, snake: &Snake, food: Position) -> Direction {
    greedy_move_with(grid, snake, &Obstacles::from_snake(snake), food)
}

/// [`greedy_move`] with obstacles the caller has already captured.
#[must_use]
pub fn greedy_move_with(
    grid: Grid,
    snake: &Snake,
    obstacles: &Obstacles,
    food: Position,
) -> Direction {
    let head = snake.head();
    let tail = snake.tail();

    let mut candidates: Vec<(Direction, u64)> = Direction::ALL
        .into_iter()
        .map(|direction| (direction, head.step(direction).squared_distance(food)))
        .collect();
    // Stable: equal distances keep up, down, left, right order.
    candidates.sort_by_key(|&(_, distance)| distance);

    let legal: Vec<(Direction, u64)> = candidates
        .into_iter()
        .filter(|&(direction, _)| grid.is_legal_step(head, direction, obstacles))
        .collect();

    match legal.as_slice() {
        [] => {
            debug!("greedy: no legal move from {head:?}, defaulting to {BOXED_IN_DIRECTION:?}");
            BOXED_IN_DIRECTION
        }
        [(only, _)] => *only,
        [(first, first_distance), (second, second_distance), ..] => {
            if first_distance != second_distance {
                return *first;
            }

            let first_clearance = head.step(*first).squared_distance(tail);
            let second_clearance = head.step(*second).squared_distance(tail);
            if second_clearance > first_clearance {
                *second
            } else {
                *first
            }
        }
    }
}
