//! Procedural stage generation split into coherent submodules.

pub mod model;

mod generator;
mod maze;
mod repair;
mod rooms;
mod spawns;

pub use generator::{MAX_LAYOUT_ATTEMPTS, StageGenerator};
pub use maze::generate_maze;
pub use model::{Room, StageLayout};
pub use repair::{PROBE_LENGTH, connect_regions, repair};
pub use rooms::place_rooms;
pub use spawns::{Exclusion, ScatterRequest, pick_separated_floor_cells};
