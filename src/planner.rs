//! A* search from the snake's head to the food.
//!
//! The board is 4-connected with unit step cost and the snake's current body
//! as obstacles. Manhattan distance is the heuristic, which is admissible and
//! consistent on this graph, so the first time the food is popped its path is
//! a shortest one.
//!
//! Frontier ordering is `(f_score, sequence)` ascending, where `sequence` is
//! a counter stamped on every push. Among equal `f_score` entries the one
//! pushed first is expanded first. Coordinates never take part in the
//! ordering, so the chosen path for a given board is always the same.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::{debug, warn};

use crate::greedy::greedy_move_with;
use crate::grid::{Grid, Obstacles};
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Stand-in for an unvisited cell's path cost.
const UNREACHED: u32 = u32::MAX;

/// How the direction in a [`Plan`] was chosen.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PlanSource {
    /// Following the first step of a shortest path.
    Path,
    /// No path exists; the greedy heuristic picked the move.
    Fallback,
    /// A path was found but its first step was not legal, so the snake keeps
    /// its current heading.
    HeldCourse,
}

/// Result of one planning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub direction: Direction,
    /// Food first, ending with the cell next to the head. Empty unless
    /// `source` is [`PlanSource::Path`] or [`PlanSource::HeldCourse`].
    pub path: Vec<Position>,
    pub source: PlanSource,
    /// Cells popped from the frontier and expanded.
    pub expanded_nodes: usize,
    /// Queued cells re-pushed after a cheaper route to them turned up.
    pub requeued_nodes: usize,
    /// Neighbors skipped because the score tables had no entry for them.
    pub skipped_nodes: usize,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct FrontierEntry {
    f_score: u32,
    sequence: u64,
    g_score: u32,
    cell: Position,
}

impl Ord for FrontierEntry {
    // BinaryHeap is a max-heap; reverse so the smallest (f, sequence) pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
struct SearchOutcome {
    path: Option<Vec<Position>>,
    expanded_nodes: usize,
    requeued_nodes: usize,
    skipped_nodes: usize,
}

/// Manhattan distance heuristic.
#[must_use]
pub fn heuristic(from: Position, to: Position) -> u32 {
    from.manhattan_distance(to)
}

/// Plans moves with a fresh A* search on every call.
#[derive(Debug, Clone, Copy)]
pub struct AStarPlanner {
    grid: Grid,
}

impl AStarPlanner {
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Chooses the next direction for `snake` towards `food`.
    ///
    /// Never fails: an unreachable food falls back to the greedy heuristic,
    /// and a boxed-in snake gets the greedy default heading.
    #[must_use]
    pub fn plan_move(&self, snake: &Snake, food: Position) -> Plan {
        let obstacles = Obstacles::from_snake(snake);
        let head = snake.head();
        let outcome = self.search(head, food, &obstacles);

        let Some(path) = outcome.path.filter(|path| !path.is_empty()) else {
            let direction = greedy_move_with(self.grid, snake, &obstacles, food);
            debug!("a*: no path from {head:?} to {food:?}, greedy chose {direction:?}");
            return Plan {
                direction,
                path: Vec::new(),
                source: PlanSource::Fallback,
                expanded_nodes: outcome.expanded_nodes,
                requeued_nodes: outcome.requeued_nodes,
                skipped_nodes: outcome.skipped_nodes,
            };
        };

        let step = path[path.len() - 1];
        let planned = Direction::from_delta(step.x - head.x, step.y - head.y)
            .filter(|direction| self.grid.is_legal_step(head, *direction, &obstacles));

        let (direction, source) = match planned {
            Some(direction) => (direction, PlanSource::Path),
            None => {
                warn!("a*: first step {step:?} is not legal from {head:?}, holding course");
                (snake.direction(), PlanSource::HeldCourse)
            }
        };

        Plan {
            direction,
            path,
            source,
            expanded_nodes: outcome.expanded_nodes,
            requeued_nodes: outcome.requeued_nodes,
            skipped_nodes: outcome.skipped_nodes,
        }
    }

    /// Shortest path from `head` to `food`, food first and excluding `head`.
    ///
    /// `None` when the frontier runs dry.
    #[must_use]
    pub fn shortest_path(
        &self,
        head: Position,
        food: Position,
        obstacles: &Obstacles,
    ) -> Option<Vec<Position>> {
        self.search(head, food, obstacles).path
    }

    fn search(&self, head: Position, food: Position, obstacles: &Obstacles) -> SearchOutcome {
        let mut g_score: HashMap<Position, u32> =
            self.grid.cells().map(|cell| (cell, UNREACHED)).collect();
        let mut came_from: HashMap<Position, Position> = HashMap::new();
        let mut frontier = BinaryHeap::new();
        let mut in_frontier = HashSet::new();
        let mut sequence = 0_u64;
        let mut outcome = SearchOutcome::default();

        g_score.insert(head, 0);
        frontier.push(FrontierEntry {
            f_score: heuristic(head, food),
            sequence,
            g_score: 0,
            cell: head,
        });
        in_frontier.insert(head);

        while let Some(entry) = frontier.pop() {
            let current = entry.cell;
            let current_g = g_score.get(&current).copied().unwrap_or(UNREACHED);
            // Superseded by a re-keyed push.
            if entry.g_score != current_g {
                continue;
            }
            in_frontier.remove(&current);

            if current == food {
                outcome.path = Some(reconstruct_path(&came_from, food));
                return outcome;
            }

            outcome.expanded_nodes += 1;
            let tentative_g = current_g + 1;

            for neighbor in self.grid.neighbors(current, obstacles) {
                let Some(&known_g) = g_score.get(&neighbor) else {
                    outcome.skipped_nodes += 1;
                    warn!("a*: neighbor {neighbor:?} of {current:?} missing from score table");
                    continue;
                };

                if tentative_g >= known_g {
                    continue;
                }

                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);

                if !in_frontier.insert(neighbor) {
                    // Already queued under a worse key. Re-push so the cheaper
                    // route is not starved; the old entry goes stale.
                    outcome.requeued_nodes += 1;
                }
                sequence += 1;
                frontier.push(FrontierEntry {
                    f_score: tentative_g + heuristic(neighbor, food),
                    sequence,
                    g_score: tentative_g,
                    cell: neighbor,
                });
            }
        }

        outcome
    }
}

/// Walks predecessors back from `food`; the head itself has none and is
/// left out.
fn reconstruct_path(came_from: &HashMap<Position, Position>, food: Position) -> Vec<Position> {
    let mut path = Vec::new();
    let mut current = food;

    while let Some(&previous) = came_from.get(&current) {
        path.push(current);
        current = previous;
    }

    path
}
