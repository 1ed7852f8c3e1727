use crate::grid::{Grid, Obstacles};
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Length of the input vector fed to a network controller.
pub const VISION_INPUTS: usize = 13;

/// Rays cast per observation.
const RAY_COUNT: usize = 5;

/// What the snake sees along five rays relative to its heading: right,
/// diagonal right, forward, diagonal left, left.
#[derive(Debug, Clone, PartialEq)]
pub struct Vision {
    /// `1 - free_cells / extent` per ray, so a wall right ahead reads `1.0`.
    pub barriers: [f64; RAY_COUNT],
    /// `1.0` on the first ray whose line passes over the food.
    pub food: [f64; RAY_COUNT],
    /// One-hot heading in left, down, right, up order.
    pub heading: [f64; 4],
    /// Free cells crossed by the barrier rays, for overlays.
    pub visible: Vec<Position>,
}

impl Vision {
    /// Casts all rays from the snake's head.
    #[must_use]
    pub fn observe(grid: Grid, snake: &Snake, food: Position) -> Self {
        let obstacles = Obstacles::from_snake(snake);
        let heading = snake.direction();
        let head = snake.head();
        let size = grid.size();
        let extent = match heading {
            Direction::Left | Direction::Right => f64::from(size.width),
            Direction::Up | Direction::Down => f64::from(size.height),
        };

        let mut barriers = [0.0; RAY_COUNT];
        let mut food_seen = [0.0; RAY_COUNT];
        let mut visible = Vec::new();

        for (index, (dx, dy)) in rays(heading).into_iter().enumerate() {
            let mut free_cells = 0_u32;
            let mut cursor = head.offset(dx, dy);
            while grid.contains(cursor) && !obstacles.contains(cursor) {
                visible.push(cursor);
                free_cells += 1;
                cursor = cursor.offset(dx, dy);
            }
            barriers[index] = 1.0 - f64::from(free_cells) / extent;
        }

        if let Some(index) = rays(heading)
            .into_iter()
            .position(|(dx, dy)| ray_hits(grid, head, (dx, dy), food))
        {
            food_seen[index] = 1.0;
        }

        let heading_index = match heading {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        };
        let mut heading_one_hot = [0.0; 4];
        heading_one_hot[heading_index] = 1.0;

        Self {
            barriers,
            food: food_seen,
            heading: heading_one_hot,
            visible,
        }
    }

    /// Flattens into the network input order: barriers, food, heading.
    #[must_use]
    pub fn to_inputs(&self) -> Vec<f64> {
        let mut inputs = Vec::with_capacity(VISION_INPUTS);
        inputs.extend_from_slice(&self.barriers);
        inputs.extend_from_slice(&self.food);
        inputs.extend_from_slice(&self.heading);
        inputs
    }
}

fn rays(heading: Direction) -> [(i32, i32); RAY_COUNT] {
    let forward = heading.delta();
    let right = heading.turn_right().delta();
    let left = heading.turn_left().delta();

    [
        right,
        (forward.0 + right.0, forward.1 + right.1),
        forward,
        (forward.0 + left.0, forward.1 + left.1),
        left,
    ]
}

/// Food sighting ignores the body; only the board edge stops the ray.
fn ray_hits(grid: Grid, head: Position, (dx, dy): (i32, i32), food: Position) -> bool {
    let mut cursor = head.offset(dx, dy);
    while grid.contains(cursor) {
        if cursor == food {
            return true;
        }
        cursor = cursor.offset(dx, dy);
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::grid::Grid;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{Vision, VISION_INPUTS};

    fn grid() -> Grid {
        Grid::new(GridSize {
            width: 10,
            height: 5,
        })
    }

    #[test]
    fn barrier_distances_follow_heading() {
        // Heading left from (4, 2): forward has 4 free cells, right (up) has 2.
        let snake = Snake::from_segments(
            vec![Position::new(4, 2), Position::new(5, 2)],
            Direction::Left,
        );

        let vision = Vision::observe(grid(), &snake, Position::new(9, 4));

        assert_eq!(vision.barriers[2], 1.0 - 4.0 / 10.0);
        assert_eq!(vision.barriers[0], 1.0 - 2.0 / 10.0);
        assert_eq!(vision.barriers[4], 1.0 - 2.0 / 10.0);
        assert_eq!(vision.heading, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(vision.visible.len(), 4 + 2 + 2 + 2 + 2);
    }

    #[test]
    fn body_blocks_barrier_ray() {
        let snake = Snake::from_segments(
            vec![
                Position::new(4, 2),
                Position::new(4, 3),
                Position::new(3, 3),
                Position::new(2, 3),
                Position::new(2, 2),
            ],
            Direction::Up,
        );

        let vision = Vision::observe(grid(), &snake, Position::new(0, 0));

        // Left ray hits (2, 2) after one free cell.
        assert_eq!(vision.barriers[4], 1.0 - 1.0 / 5.0);
    }

    #[test]
    fn only_first_ray_sighting_food_is_flagged() {
        let snake = Snake::from_segments(vec![Position::new(4, 2)], Direction::Up);

        let vision = Vision::observe(grid(), &snake, Position::new(4, 0));

        assert_eq!(vision.food, [0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(vision.to_inputs().len(), VISION_INPUTS);
    }

    #[test]
    fn diagonal_sighting_is_reported() {
        let snake = Snake::from_segments(vec![Position::new(4, 2)], Direction::Up);

        let vision = Vision::observe(grid(), &snake, Position::new(6, 0));

        assert_eq!(vision.food, [0.0, 1.0, 0.0, 0.0, 0.0]);
    }
}
