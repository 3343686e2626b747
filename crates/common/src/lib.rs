//! Common types shared across Golem Knight crates.

/// Simple 2D coordinate in pixels. Also used for per-tick velocities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new [`Point`].
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0, y: 0 };
}

/// Size of the playable rectangle anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

/// Requests produced by the user interface and consumed by the game state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Leave the game.
    Quit,
    /// Start a new round with a fresh enemy wave.
    Restart,
}

/// Unified error type for game startup.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("missing asset `{0}`")]
    MissingAsset(String),
    #[error("invalid asset `{name}`: {reason}")]
    InvalidAsset { name: String, reason: String },
    #[error("font face `{name}` could not be constructed: {reason}")]
    FontFace { name: String, reason: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
