use std::collections::HashSet;

use crate::config::GridSize;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Cells blocked for one planning step, captured from a snake body.
#[derive(Debug, Clone, Default)]
pub struct Obstacles {
    cells: HashSet<Position>,
}

impl Obstacles {
    /// Captures every segment of `snake`, head and tail included.
    #[must_use]
    pub fn from_snake(snake: &Snake) -> Self {
        snake.segments().copied().collect()
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<Position> for Obstacles {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// The playable board: every integer cell in `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
}

impl Grid {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self { size }
    }

    #[must_use]
    pub fn size(self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.is_within_bounds(self.size)
    }

    /// Iterates every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.size.width);
        let height = i32::from(self.size.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Returns the in-bounds, unoccupied cells adjacent to `cell`.
    ///
    /// Order is fixed (right, left, down, up) so searches expand
    /// deterministically. A fully enclosed cell yields an empty list.
    #[must_use]
    pub fn neighbors(self, cell: Position, obstacles: &Obstacles) -> Vec<Position> {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .map(|(dx, dy)| cell.offset(dx, dy))
            .filter(|next| self.contains(*next) && !obstacles.contains(*next))
            .collect()
    }

    /// One-step lookahead: true when moving `head` in `direction` stays on
    /// the board and lands on a free cell.
    #[must_use]
    pub fn is_legal_step(self, head: Position, direction: Direction, obstacles: &Obstacles) -> bool {
        let next = head.step(direction);
        self.contains(next) && !obstacles.contains(next)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::snake::Position;

    use super::{Grid, Obstacles};

    fn grid(width: u16, height: u16) -> Grid {
        Grid::new(GridSize { width, height })
    }

    #[test]
    fn corner_has_two_neighbors() {
        let neighbors = grid(5, 5).neighbors(Position::new(0, 0), &Obstacles::default());

        assert_eq!(neighbors, vec![Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn body_cells_are_excluded() {
        let obstacles: Obstacles = [Position::new(2, 1), Position::new(1, 2)]
            .into_iter()
            .collect();

        let neighbors = grid(5, 5).neighbors(Position::new(2, 2), &obstacles);

        assert_eq!(neighbors, vec![Position::new(3, 2), Position::new(2, 3)]);
    }

    #[test]
    fn enclosed_cell_has_no_neighbors() {
        let obstacles: Obstacles = [Position::new(1, 0), Position::new(0, 1)]
            .into_iter()
            .collect();

        assert!(grid(3, 3)
            .neighbors(Position::new(0, 0), &obstacles)
            .is_empty());
    }

    #[test]
    fn cells_cover_the_board_once() {
        let cells: Vec<_> = grid(3, 2).cells().collect();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[5], Position::new(2, 1));
    }

    #[test]
    fn legal_step_checks_bounds_and_body() {
        let board = grid(4, 4);
        let obstacles: Obstacles = [Position::new(1, 0)].into_iter().collect();
        let head = Position::new(0, 0);

        assert!(!board.is_legal_step(head, Direction::Up, &obstacles));
        assert!(!board.is_legal_step(head, Direction::Left, &obstacles));
        assert!(!board.is_legal_step(head, Direction::Right, &obstacles));
        assert!(board.is_legal_step(head, Direction::Down, &obstacles));
    }
}
