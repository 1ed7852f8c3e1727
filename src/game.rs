use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::GridSize;
use crate::controller::{BoardView, MoveController};
use crate::error::SnakeError;
use crate::food::spawn_position;
use crate::grid::Grid;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Victory,
}

/// Why a game ended in [`GameStatus::GameOver`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    Wall,
    SelfCollision,
    Starvation,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    grid: Grid,
    hunger: u64,
    starvation_factor: u32,
    rng: StdRng,
}

impl GameState {
    /// Creates a deterministic game with the standard starting snake.
    ///
    /// Starvation is off; enable it with [`GameState::with_starvation`].
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Result<Self, SnakeError> {
        let grid = Grid::new(bounds);
        let snake = Snake::spawn(bounds);
        if snake.segments().any(|segment| !grid.contains(*segment)) {
            return Err(SnakeError::GridTooSmall {
                width: bounds.width,
                height: bounds.height,
                length: snake.len(),
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let Some(food) = spawn_position(&mut rng, grid, &snake) else {
            return Err(SnakeError::GridTooSmall {
                width: bounds.width,
                height: bounds.height,
                length: snake.len(),
            });
        };

        Ok(Self {
            snake,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::Playing,
            death_reason: None,
            grid,
            hunger: 0,
            starvation_factor: 0,
            rng,
        })
    }

    /// Ends the game once `len * factor` ticks pass without food. `0`
    /// disables starvation.
    #[must_use]
    pub fn with_starvation(mut self, factor: u32) -> Self {
        self.starvation_factor = factor;
        self
    }

    /// Board dimensions.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.grid.size()
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Ticks since the last meal.
    #[must_use]
    pub fn hunger(&self) -> u64 {
        self.hunger
    }

    /// Advances simulation by one gameplay tick: the controller picks a
    /// heading, the snake moves, then collisions and food are resolved.
    pub fn tick(&mut self, controller: &mut dyn MoveController) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.tick_count += 1;
        self.hunger += 1;

        let direction = controller.decide(&BoardView {
            snake: &self.snake,
            food: self.food,
            grid: self.grid,
        });
        self.snake.advance(direction);

        let head = self.snake.head();
        if !self.grid.contains(head) {
            self.end(DeathReason::Wall);
            return;
        }

        if self.snake.head_overlaps_body() {
            self.end(DeathReason::SelfCollision);
            return;
        }

        if head == self.food {
            self.score += 1;
            self.hunger = 0;
            self.snake.on_food_eaten();

            match spawn_position(&mut self.rng, self.grid, &self.snake) {
                Some(food) => self.food = food,
                None => {
                    debug!("{}: board full at score {}", controller.name(), self.score);
                    self.status = GameStatus::Victory;
                }
            }
            return;
        }

        let starvation_limit = self.snake.len() as u64 * u64::from(self.starvation_factor);
        if self.starvation_factor > 0 && self.hunger >= starvation_limit {
            self.end(DeathReason::Starvation);
        }
    }

    fn end(&mut self, reason: DeathReason) {
        debug!(
            "game over after {} ticks: {reason:?} at {:?}, score {}",
            self.tick_count,
            self.snake.head(),
            self.score
        );
        self.snake.kill();
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::controller::{AStarController, GreedyController, HumanController};
    use crate::error::SnakeError;
    use crate::input::Direction;
    use crate::snake::{Position, Snake, SnakeState};

    use super::{DeathReason, GameState, GameStatus};

    fn bounds(width: u16, height: u16) -> GridSize {
        GridSize { width, height }
    }

    #[test]
    fn new_game_spawns_food_off_the_snake() {
        let state = GameState::new_with_seed(bounds(10, 10), 1).expect("board fits snake");

        assert_eq!(state.snake.len(), 3);
        assert!(!state.snake.occupies(state.food));
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn narrow_board_is_rejected() {
        assert!(matches!(
            GameState::new_with_seed(bounds(4, 4), 1),
            Err(SnakeError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = GameState::new_with_seed(bounds(10, 10), 1).expect("board fits snake");
        state.snake = Snake::from_segments(
            vec![Position::new(5, 1), Position::new(6, 1)],
            Direction::Left,
        );
        state.food = Position::new(4, 1);
        let mut human = HumanController::new(Direction::Left);

        state.tick(&mut human);
        assert_eq!(state.score, 1);
        assert_eq!(state.hunger(), 0);
        assert_eq!(state.snake.len(), 2);

        state.tick(&mut human);
        assert_eq!(state.snake.len(), 2);

        state.tick(&mut human);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut state = GameState::new_with_seed(bounds(6, 6), 2).expect("board fits snake");
        state.snake = Snake::from_segments(vec![Position::new(0, 1)], Direction::Left);
        state.food = Position::new(5, 5);

        state.tick(&mut HumanController::new(Direction::Left));

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::Wall));
        assert_eq!(state.snake.state(), SnakeState::Dead);
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        let mut state = GameState::new_with_seed(bounds(6, 6), 3).expect("board fits snake");
        state.snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ],
            Direction::Right,
        );
        state.food = Position::new(5, 5);

        state.tick(&mut HumanController::new(Direction::Down));

        assert_eq!(state.death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn finished_game_ignores_ticks() {
        let mut state = GameState::new_with_seed(bounds(6, 6), 2).expect("board fits snake");
        state.snake = Snake::from_segments(vec![Position::new(0, 1)], Direction::Left);
        state.food = Position::new(5, 5);
        let mut human = HumanController::new(Direction::Left);

        state.tick(&mut human);
        state.tick(&mut human);

        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn hungry_snake_starves() {
        let mut state = GameState::new_with_seed(bounds(20, 20), 4)
            .expect("board fits snake")
            .with_starvation(1);
        state.snake = Snake::from_segments(
            vec![Position::new(10, 10), Position::new(10, 11)],
            Direction::Up,
        );
        state.food = Position::new(0, 0);
        let mut greedy = GreedyController;

        state.tick(&mut greedy);
        assert_eq!(state.status, GameStatus::Playing);

        state.tick(&mut greedy);
        assert_eq!(state.death_reason, Some(DeathReason::Starvation));
    }

    #[test]
    fn filling_the_board_is_a_victory() {
        let mut state = GameState::new_with_seed(bounds(5, 1), 5).expect("board fits snake");
        // Four queued meals land on consecutive ticks, leaving one pending.
        let mut snake = Snake::from_segments(vec![Position::new(4, 0)], Direction::Left);
        for _ in 0..4 {
            snake.on_food_eaten();
        }
        for _ in 0..3 {
            snake.advance(Direction::Left);
        }
        assert_eq!(snake.len(), 4);
        state.snake = snake;
        state.food = Position::new(0, 0);

        state.tick(&mut AStarController::new());

        assert_eq!(state.status, GameStatus::Victory);
        assert_eq!(state.score, 1);
    }
}
