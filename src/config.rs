use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::SnakeError;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Creates a grid size, rejecting boards with no cells.
    pub fn new(width: u16, height: u16) -> Result<Self, SnakeError> {
        if width == 0 || height == 0 {
            return Err(SnakeError::InvalidGrid { width, height });
        }

        Ok(Self { width, height })
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 50;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 35;

/// Segments in a freshly spawned snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Games played per controller in a comparison run.
pub const DEFAULT_TRIALS: u32 = 30;

/// Hard cap on ticks per game so looping controllers still terminate.
pub const DEFAULT_MAX_TICKS: u64 = 100_000;

/// Ticks without food, per body segment, before a snake starves.
pub const DEFAULT_STARVATION_FACTOR: u32 = 75;

/// Tunables for headless simulation runs.
///
/// Every field is optional in the JSON file; missing fields take the
/// defaults above.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub width: u16,
    pub height: u16,
    pub trials: u32,
    pub seed: u64,
    pub max_ticks: u64,
    /// `0` disables starvation. Applies to network-driven games only.
    pub starvation_factor: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            trials: DEFAULT_TRIALS,
            seed: 0,
            max_ticks: DEFAULT_MAX_TICKS,
            starvation_factor: DEFAULT_STARVATION_FACTOR,
        }
    }
}

impl SimulationConfig {
    /// Loads a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SnakeError> {
        let raw = fs::read_to_string(path).map_err(|source| SnakeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw).map_err(|error| match error {
            SnakeError::Json { source, .. } => SnakeError::Json {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// Parses and validates a config from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, SnakeError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| SnakeError::Json { path: None, source })?;
        config.grid_size()?;
        Ok(config)
    }

    /// Returns the validated board dimensions.
    pub fn grid_size(&self) -> Result<GridSize, SnakeError> {
        GridSize::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::{GridSize, SimulationConfig, DEFAULT_STARVATION_FACTOR};
    use crate::error::SnakeError;

    #[test]
    fn total_cells_multiplies_dimensions() {
        let size = GridSize::new(50, 35).expect("non-empty grid");
        assert_eq!(size.total_cells(), 1750);
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert!(matches!(
            GridSize::new(0, 4),
            Err(SnakeError::InvalidGrid {
                width: 0,
                height: 4
            })
        ));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SimulationConfig::from_json(r#"{ "width": 10, "trials": 3 }"#)
            .expect("partial config should parse");

        assert_eq!(config.width, 10);
        assert_eq!(config.height, 35);
        assert_eq!(config.trials, 3);
        assert_eq!(config.starvation_factor, DEFAULT_STARVATION_FACTOR);
    }

    #[test]
    fn unknown_field_is_an_error() {
        assert!(SimulationConfig::from_json(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn zero_height_in_json_is_an_error() {
        assert!(matches!(
            SimulationConfig::from_json(r#"{ "height": 0 }"#),
            Err(SnakeError::InvalidGrid { .. })
        ));
    }
}
