use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the movement core: config files, network weights,
/// and board setup.
#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON{}: {source}", location(.path))]
    Json {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("grid must have at least one cell, got {width}x{height}")]
    InvalidGrid { width: u16, height: u16 },

    #[error("grid {width}x{height} is too small for a {length}-segment snake")]
    GridTooSmall {
        width: u16,
        height: u16,
        length: usize,
    },

    #[error("the neat controller needs a network file")]
    MissingNetwork,

    #[error("network expects {expected} {what}, got {actual}")]
    NetworkShape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" in {}", path.display()))
        .unwrap_or_default()
}
