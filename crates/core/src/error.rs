use thiserror::Error;

/// Configuration mistakes caught before any stage is generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid sides must be between 5 and 4096 cells, got {width}x{height}")]
    InvalidGridSize { width: usize, height: usize },

    #[error("tile size must be positive")]
    InvalidTileSize,

    #[error("room bounds {min_width}..={max_width} x {min_height}..={max_height} cannot fit: {reason}")]
    InvalidRoomBounds {
        min_width: usize,
        max_width: usize,
        min_height: usize,
        max_height: usize,
        reason: &'static str,
    },

    #[error("enemy configuration is invalid: {reason}")]
    InvalidEnemySettings { reason: &'static str },

    #[error("motion durations must be positive")]
    InvalidMotionTiming,

    #[error("question catalog is empty")]
    EmptyCatalog,

    #[error("question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },
}
