use std::collections::VecDeque;

use crate::config::{GridSize, INITIAL_SNAKE_LENGTH};
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the position offset by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the adjacent position one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Sum of absolute coordinate differences.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Squared Euclidean distance. Orders positions exactly like the
    /// Euclidean distance without leaving integer arithmetic.
    #[must_use]
    pub fn squared_distance(self, other: Self) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }
}

/// Lifecycle of one snake. `Dead` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SnakeState {
    Active,
    Dead,
}

/// Ordered body, heading, and deferred growth for one snake.
///
/// Eating does not lengthen the snake immediately. Each meal queues a
/// countdown equal to the body length at the moment of eating; the tail is
/// kept on the tick that countdown reaches zero, so the extra segment appears
/// once the meal has travelled the length of the body.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    growth_queue: VecDeque<usize>,
    state: SnakeState,
}

impl Snake {
    /// Creates the standard starting snake: three segments centered on the
    /// board, tail trailing to the right, heading left.
    #[must_use]
    pub fn spawn(bounds: GridSize) -> Self {
        let head = Position::new(i32::from(bounds.width / 2), i32::from(bounds.height / 2));
        let segments = (0..INITIAL_SNAKE_LENGTH)
            .map(|offset| head.offset(offset as i32, 0))
            .collect();

        Self::from_segments(segments, Direction::Left)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// `segments` must not be empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty(), "snake body needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            growth_queue: VecDeque::new(),
            state: SnakeState::Active,
        }
    }

    /// Moves one cell in `direction`: the new head is prepended and the tail
    /// is dropped unless a queued growth countdown expires on this tick.
    ///
    /// Has no effect on a dead snake.
    pub fn advance(&mut self, direction: Direction) {
        if self.state == SnakeState::Dead {
            return;
        }

        self.direction = direction;
        let next_head = self.head().step(direction);
        self.body.push_front(next_head);

        if self.growth_queue.is_empty() {
            let _ = self.body.pop_back();
            return;
        }

        for countdown in &mut self.growth_queue {
            *countdown = countdown.saturating_sub(1);
        }

        if self.growth_queue.front() == Some(&0) {
            let _ = self.growth_queue.pop_front();
        } else {
            let _ = self.body.pop_back();
        }
    }

    /// Queues one segment of growth, staged by the current body length.
    pub fn on_food_eaten(&mut self) {
        self.growth_queue.push_back(self.body.len());
    }

    /// Marks the snake dead; further `advance` calls are ignored.
    pub fn kill(&mut self) {
        self.state = SnakeState::Dead;
    }

    #[must_use]
    pub fn state(&self) -> SnakeState {
        self.state
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.state == SnakeState::Active
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction of the most recent move (or the spawn heading).
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Pending growth countdowns, oldest first.
    pub fn growth_queue(&self) -> impl Iterator<Item = usize> + '_ {
        self.growth_queue.iter().copied()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
