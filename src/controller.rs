use log::trace;

use crate::greedy::greedy_move;
use crate::grid::Grid;
use crate::input::{direction_change_is_valid, Direction};
use crate::network::Network;
use crate::planner::{AStarPlanner, PlanSource};
use crate::snake::{Position, Snake};
use crate::vision::Vision;

/// Read-only view of the board handed to a controller each tick.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub snake: &'a Snake,
    pub food: Position,
    pub grid: Grid,
}

/// Decides the snake's heading once per tick.
pub trait MoveController {
    fn decide(&mut self, board: &BoardView<'_>) -> Direction;

    /// Short label for logs and reports.
    fn name(&self) -> &'static str;

    /// Cells the controller intends to visit, food first. Empty when it has
    /// no plan.
    fn path(&self) -> &[Position] {
        &[]
    }

    /// Ticks on which the controller had to abandon its primary strategy.
    fn fallback_count(&self) -> u64 {
        0
    }
}

/// Steers from directions supplied by the owner (typically key presses).
///
/// A direct reversal of the current heading is ignored. While a turn is
/// already waiting, one more can be queued for the following tick; that
/// second slot is last-input-wins.
#[derive(Debug, Clone)]
pub struct HumanController {
    heading: Direction,
    buffered: Direction,
    next_buffered: Option<Direction>,
}

impl HumanController {
    #[must_use]
    pub fn new(heading: Direction) -> Self {
        Self {
            heading,
            buffered: heading,
            next_buffered: None,
        }
    }

    /// Buffers one direction press.
    pub fn press(&mut self, direction: Direction) {
        if self.buffered == self.heading {
            if direction_change_is_valid(self.heading, direction) {
                self.buffered = direction;
            }
        } else if direction_change_is_valid(self.buffered, direction) {
            self.next_buffered = Some(direction);
        }
    }
}

impl MoveController for HumanController {
    fn decide(&mut self, _board: &BoardView<'_>) -> Direction {
        self.heading = self.buffered;
        if let Some(next) = self.next_buffered.take() {
            self.buffered = next;
        }
        self.heading
    }

    fn name(&self) -> &'static str {
        "human"
    }
}

/// Always takes the greedy Euclidean move.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyController;

impl MoveController for GreedyController {
    fn decide(&mut self, board: &BoardView<'_>) -> Direction {
        greedy_move(board.grid, board.snake, board.food)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Replans a shortest path with A* every tick.
#[derive(Debug, Clone, Default)]
pub struct AStarController {
    path: Vec<Position>,
    last_source: Option<PlanSource>,
    fallbacks: u64,
}

impl AStarController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How the most recent decision was made.
    #[must_use]
    pub fn last_source(&self) -> Option<PlanSource> {
        self.last_source
    }
}

impl MoveController for AStarController {
    fn decide(&mut self, board: &BoardView<'_>) -> Direction {
        let plan = AStarPlanner::new(board.grid).plan_move(board.snake, board.food);
        trace!(
            "a*: {:?} via {:?}, {} expanded",
            plan.direction,
            plan.source,
            plan.expanded_nodes
        );

        if plan.source != PlanSource::Path {
            self.fallbacks += 1;
        }
        self.last_source = Some(plan.source);
        self.path = plan.path;
        plan.direction
    }

    fn name(&self) -> &'static str {
        "astar"
    }

    fn path(&self) -> &[Position] {
        &self.path
    }

    fn fallback_count(&self) -> u64 {
        self.fallbacks
    }
}

/// Steering picked by a network's three outputs.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Steering {
    Right,
    Straight,
    Left,
}

impl Steering {
    /// Reads `[right, straight, left]` outputs. The largest wins; ties go to
    /// right, then left, then straight. Fewer than three outputs steer
    /// straight.
    #[must_use]
    pub fn from_outputs(outputs: &[f64]) -> Self {
        let [right, straight, left] = match outputs {
            [right, straight, left, ..] => [*right, *straight, *left],
            _ => return Self::Straight,
        };
        let best = right.max(straight).max(left);

        if right == best {
            Self::Right
        } else if left == best {
            Self::Left
        } else {
            Self::Straight
        }
    }

    #[must_use]
    pub fn apply(self, heading: Direction) -> Direction {
        match self {
            Self::Right => heading.turn_right(),
            Self::Straight => heading,
            Self::Left => heading.turn_left(),
        }
    }
}

/// Steers with a trained network fed by [`Vision`].
#[derive(Debug, Clone)]
pub struct NeatController<N> {
    network: N,
    last_vision: Option<Vision>,
}

impl<N: Network> NeatController<N> {
    #[must_use]
    pub fn new(network: N) -> Self {
        Self {
            network,
            last_vision: None,
        }
    }

    /// The observation behind the most recent decision.
    #[must_use]
    pub fn last_vision(&self) -> Option<&Vision> {
        self.last_vision.as_ref()
    }
}

impl<N: Network> MoveController for NeatController<N> {
    fn decide(&mut self, board: &BoardView<'_>) -> Direction {
        let vision = Vision::observe(board.grid, board.snake, board.food);
        let outputs = self.network.activate(&vision.to_inputs());
        self.last_vision = Some(vision);

        Steering::from_outputs(&outputs).apply(board.snake.direction())
    }

    fn name(&self) -> &'static str {
        "neat"
    }
}
