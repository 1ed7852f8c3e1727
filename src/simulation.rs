//! Headless multi-game runs for comparing controllers.

use clap::ValueEnum;
use log::info;
use serde::Serialize;

use crate::config::SimulationConfig;
use crate::controller::{AStarController, GreedyController, MoveController, NeatController};
use crate::error::SnakeError;
use crate::game::{DeathReason, GameState, GameStatus};
use crate::network::WeightedNetwork;

/// Controllers that can play unattended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    Greedy,
    #[value(name = "astar")]
    #[serde(rename = "astar")]
    AStar,
    Neat,
}

impl ControllerKind {
    /// Only the network controller is subject to hunger. The planners play
    /// until they die, win, or reach the tick cap.
    #[must_use]
    pub fn starves(self) -> bool {
        self == Self::Neat
    }
}

/// How a simulated game stopped.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Died(DeathReason),
    Victory,
    TickLimit,
}

/// Result of one game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub seed: u64,
    pub score: u32,
    pub ticks: u64,
    pub length: usize,
    pub outcome: Outcome,
    pub fallbacks: u64,
}

/// All games for one controller plus score statistics.
#[derive(Debug, Clone, Serialize)]
pub struct TrialSummary {
    pub controller: ControllerKind,
    pub games: Vec<GameRecord>,
    pub min_score: u32,
    pub max_score: u32,
    pub mean_score: f64,
}

impl TrialSummary {
    fn from_games(controller: ControllerKind, games: Vec<GameRecord>) -> Self {
        let scores = games.iter().map(|game| game.score);
        let min_score = scores.clone().min().unwrap_or(0);
        let max_score = scores.clone().max().unwrap_or(0);
        let mean_score = if games.is_empty() {
            0.0
        } else {
            scores.map(f64::from).sum::<f64>() / games.len() as f64
        };

        Self {
            controller,
            games,
            min_score,
            max_score,
            mean_score,
        }
    }

    /// Sum of fallback ticks across all games.
    #[must_use]
    pub fn total_fallbacks(&self) -> u64 {
        self.games.iter().map(|game| game.fallbacks).sum()
    }
}

/// Plays one game to completion (or the tick cap) with a fresh controller.
pub fn play_game(
    config: &SimulationConfig,
    seed: u64,
    controller: &mut dyn MoveController,
) -> Result<GameRecord, SnakeError> {
    let mut state = GameState::new_with_seed(config.grid_size()?, seed)?
        .with_starvation(config.starvation_factor);

    while state.status == GameStatus::Playing && state.tick_count < config.max_ticks {
        state.tick(controller);
    }

    let outcome = match (state.status, state.death_reason) {
        (GameStatus::Victory, _) => Outcome::Victory,
        (GameStatus::GameOver, Some(reason)) => Outcome::Died(reason),
        _ => Outcome::TickLimit,
    };

    Ok(GameRecord {
        seed,
        score: state.score,
        ticks: state.tick_count,
        length: state.snake.len(),
        outcome,
        fallbacks: controller.fallback_count(),
    })
}

/// Plays `config.trials` games with one kind of controller. Game `i` uses
/// seed `config.seed + i`, so every controller faces the same food sequence
/// until their paths diverge.
pub fn run_trials(
    config: &SimulationConfig,
    kind: ControllerKind,
    network: Option<&WeightedNetwork>,
) -> Result<TrialSummary, SnakeError> {
    let config = &SimulationConfig {
        starvation_factor: if kind.starves() {
            config.starvation_factor
        } else {
            0
        },
        ..*config
    };
    let mut games = Vec::with_capacity(config.trials as usize);

    for trial in 0..config.trials {
        let seed = config.seed.wrapping_add(u64::from(trial));
        let mut controller = build_controller(kind, network)?;
        let record = play_game(config, seed, controller.as_mut())?;
        info!(
            "{} game {}: score {} in {} ticks ({:?})",
            controller.name(),
            trial + 1,
            record.score,
            record.ticks,
            record.outcome
        );
        games.push(record);
    }

    Ok(TrialSummary::from_games(kind, games))
}

/// Runs [`run_trials`] for each controller in turn.
pub fn compare(
    config: &SimulationConfig,
    kinds: &[ControllerKind],
    network: Option<&WeightedNetwork>,
) -> Result<Vec<TrialSummary>, SnakeError> {
    kinds
        .iter()
        .map(|kind| run_trials(config, *kind, network))
        .collect()
}

fn build_controller(
    kind: ControllerKind,
    network: Option<&WeightedNetwork>,
) -> Result<Box<dyn MoveController>, SnakeError> {
    Ok(match kind {
        ControllerKind::Greedy => Box::new(GreedyController),
        ControllerKind::AStar => Box::new(AStarController::new()),
        ControllerKind::Neat => {
            let network = network.ok_or(SnakeError::MissingNetwork)?;
            Box::new(NeatController::new(network.clone()))
        }
    })
}
