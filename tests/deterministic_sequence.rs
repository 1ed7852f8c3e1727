use snake_pathfinder::config::GridSize;
use snake_pathfinder::controller::{AStarController, HumanController, MoveController};
use snake_pathfinder::game::{DeathReason, GameState, GameStatus};
use snake_pathfinder::input::Direction;
use snake_pathfinder::snake::{Position, Snake};

#[test]
fn astar_walks_the_shortest_route_and_eats() {
    let mut state = GameState::new_with_seed(
        GridSize {
            width: 8,
            height: 6,
        },
        42,
    )
    .expect("board fits snake");
    state.snake = Snake::from_segments(
        vec![
            Position::new(4, 3),
            Position::new(5, 3),
            Position::new(6, 3),
        ],
        Direction::Left,
    );
    state.food = Position::new(1, 1);
    let mut controller = AStarController::new();

    for remaining in (1..=5).rev() {
        state.tick(&mut controller);
        assert_eq!(state.status, GameStatus::Playing);
        if remaining > 1 {
            assert_eq!(
                state.snake.head().manhattan_distance(Position::new(1, 1)),
                remaining - 1
            );
            assert_eq!(controller.path().len() as u32, remaining);
        }
    }

    assert_eq!(state.score, 1);
    assert_eq!(state.snake.head(), Position::new(1, 1));
    assert_ne!(state.food, Position::new(1, 1));
}

#[test]
fn human_into_wall_ends_the_game() {
    let mut state = GameState::new_with_seed(
        GridSize {
            width: 6,
            height: 4,
        },
        7,
    )
    .expect("board fits snake");
    state.snake = Snake::from_segments(vec![Position::new(1, 1)], Direction::Right);
    state.food = Position::new(5, 3);
    let mut human = HumanController::new(Direction::Right);

    human.press(Direction::Up);
    state.tick(&mut human);
    assert_eq!(state.snake.head(), Position::new(1, 0));
    assert_eq!(state.status, GameStatus::Playing);

    state.tick(&mut human);
    assert_eq!(state.status, GameStatus::GameOver);
    assert_eq!(state.death_reason, Some(DeathReason::Wall));
    assert!(human.path().is_empty());
}

#[test]
fn meal_grows_the_body_once_after_len_moves() {
    let mut snake = Snake::from_segments(
        vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(7, 5),
            Position::new(8, 5),
        ],
        Direction::Left,
    );
    let length = snake.len();

    snake.on_food_eaten();
    for step in 1..=length {
        snake.advance(Direction::Left);
        let expected = if step == length { length + 1 } else { length };
        assert_eq!(snake.len(), expected);
    }

    for _ in 0..10 {
        snake.advance(Direction::Up);
        snake.advance(Direction::Left);
        assert_eq!(snake.len(), length + 1);
    }
}
