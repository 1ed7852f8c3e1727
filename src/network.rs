use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SnakeError;
use crate::vision::VISION_INPUTS;

/// Outputs a steering network must produce: turn right, straight, turn left.
pub const STEERING_OUTPUTS: usize = 3;

/// Anything that maps an input vector to an output vector.
///
/// Training lives elsewhere; the controller only activates a finished
/// network.
pub trait Network {
    fn activate(&self, inputs: &[f64]) -> Vec<f64>;
}

/// Single fully-connected layer with `tanh` activation, loaded from JSON.
///
/// ```json
/// { "weights": [[...13 values...], [...], [...]], "biases": [0.0, 0.0, 0.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedNetwork {
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
}

impl WeightedNetwork {
    /// Builds a steering network, checking it has one row per output and one
    /// column per vision input.
    pub fn new(weights: Vec<Vec<f64>>, biases: Vec<f64>) -> Result<Self, SnakeError> {
        let network = Self { weights, biases };
        network.validate()?;
        Ok(network)
    }

    /// Loads and validates a network from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SnakeError> {
        let raw = fs::read_to_string(path).map_err(|source| SnakeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let network: Self = serde_json::from_str(&raw).map_err(|source| SnakeError::Json {
            path: Some(path.to_path_buf()),
            source,
        })?;
        network.validate()?;
        Ok(network)
    }

    fn validate(&self) -> Result<(), SnakeError> {
        if self.weights.len() != STEERING_OUTPUTS {
            return Err(SnakeError::NetworkShape {
                what: "weight rows",
                expected: STEERING_OUTPUTS,
                actual: self.weights.len(),
            });
        }

        if self.biases.len() != STEERING_OUTPUTS {
            return Err(SnakeError::NetworkShape {
                what: "biases",
                expected: STEERING_OUTPUTS,
                actual: self.biases.len(),
            });
        }

        if let Some(row) = self.weights.iter().find(|row| row.len() != VISION_INPUTS) {
            return Err(SnakeError::NetworkShape {
                what: "weights per row",
                expected: VISION_INPUTS,
                actual: row.len(),
            });
        }

        Ok(())
    }
}

impl Network for WeightedNetwork {
    fn activate(&self, inputs: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                let sum: f64 = row.iter().zip(inputs).map(|(w, x)| w * x).sum();
                (sum + bias).tanh()
            })
            .collect()
    }
}
