pub mod config;
pub mod content;
pub mod error;
pub mod game;
pub mod journal;
pub mod mapgen;
pub mod pixel;
pub mod random;
pub mod replay;
pub mod state;
pub mod types;

pub use config::{EnemyConfig, RoomConfig, SessionConfig};
pub use content::{Question, QuestionCatalog};
pub use error::ConfigError;
pub use game::{
    LifeLossCause, Overlap, ProgressionEvent, Session, Stage, StageId, StepOutcome, stage_diagram,
};
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use mapgen::{StageGenerator, StageLayout};
pub use pixel::{PixelPos, grid_to_pixel, pixel_to_grid};
pub use random::RandomSource;
pub use replay::{ReplayError, ReplayResult, replay_to_end};
pub use state::{Grid, ProgressState};
pub use types::*;
