//! Stage generation and motion parameters, validated before any stage is built.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest extent that still leaves an interior around the start cell.
pub const MIN_GRID_EXTENT: usize = 5;
/// Largest extent per axis; keeps cells addressable as `i32` and the tile buffer small.
pub const MAX_GRID_EXTENT: usize = 4096;
/// Rooms need a non-corner perimeter cell on every side for the door.
pub const MIN_ROOM_EXTENT: usize = 3;
/// Left/top offset plus right/bottom margin a room keeps from the grid edge.
const ROOM_EDGE_MARGIN: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub count: usize,
    pub min_width: usize,
    pub max_width: usize,
    pub min_height: usize,
    pub max_height: usize,
    pub attempts: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self { count: 4, min_width: 5, max_width: 8, min_height: 4, max_height: 6, attempts: 1200 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub count: usize,
    pub min_separation: u32,
    pub start_clearance: u32,
    pub attempts: usize,
    pub step_ms: u32,
    pub step_jitter_ms: u32,
    /// Contact distance as a fraction of the tile size.
    pub contact_radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            count: 4,
            min_separation: 6,
            start_clearance: 8,
            attempts: 3000,
            step_ms: 300,
            step_jitter_ms: 200,
            contact_radius: 0.6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub tile_size: u32,
    pub player_step_ms: u32,
    pub rooms: RoomConfig,
    pub enemies: EnemyConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_width: 26,
            grid_height: 16,
            tile_size: 60,
            player_step_ms: 200,
            rooms: RoomConfig::default(),
            enemies: EnemyConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extent = MIN_GRID_EXTENT..=MAX_GRID_EXTENT;
        if !extent.contains(&self.grid_width) || !extent.contains(&self.grid_height) {
            return Err(ConfigError::InvalidGridSize {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.tile_size == 0 {
            return Err(ConfigError::InvalidTileSize);
        }
        if self.player_step_ms == 0 || self.enemies.step_ms == 0 {
            return Err(ConfigError::InvalidMotionTiming);
        }
        self.validate_rooms()?;
        self.validate_enemies()
    }

    fn validate_rooms(&self) -> Result<(), ConfigError> {
        let rooms = &self.rooms;
        let reason = if rooms.min_width > rooms.max_width || rooms.min_height > rooms.max_height {
            Some("minimum exceeds maximum")
        } else if rooms.min_width < MIN_ROOM_EXTENT || rooms.min_height < MIN_ROOM_EXTENT {
            Some("rooms must be at least 3x3 to hold a door")
        } else if rooms.max_width + ROOM_EDGE_MARGIN > self.grid_width
            || rooms.max_height + ROOM_EDGE_MARGIN > self.grid_height
        {
            Some("largest room leaves no margin to the grid border")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ConfigError::InvalidRoomBounds {
                min_width: rooms.min_width,
                max_width: rooms.max_width,
                min_height: rooms.min_height,
                max_height: rooms.max_height,
                reason,
            }),
            None => Ok(()),
        }
    }

    fn validate_enemies(&self) -> Result<(), ConfigError> {
        let enemies = &self.enemies;
        if enemies.count > 0 && enemies.min_separation == 0 {
            return Err(ConfigError::InvalidEnemySettings {
                reason: "enemies need a positive mutual separation",
            });
        }
        if !(enemies.contact_radius.is_finite() && enemies.contact_radius > 0.0) {
            return Err(ConfigError::InvalidEnemySettings {
                reason: "contact radius must be a positive fraction of a tile",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_size_grid_is_rejected() {
        let config = SessionConfig { grid_width: 0, grid_height: 0, ..SessionConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidGridSize { width: 0, height: 0 })
        );
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocation() {
        let config = SessionConfig { grid_width: usize::MAX / 2, ..SessionConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidGridSize { width: usize::MAX / 2, height: 16 })
        );

        let config =
            SessionConfig { grid_height: MAX_GRID_EXTENT + 1, ..SessionConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidGridSize { .. })));

        let config = SessionConfig { grid_width: MAX_GRID_EXTENT, ..SessionConfig::default() };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_tile_size_is_rejected() {
        let config = SessionConfig { tile_size: 0, ..SessionConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTileSize));
    }

    #[test]
    fn rooms_that_cannot_fit_are_rejected() {
        let mut config = SessionConfig::default();
        config.rooms.max_width = config.grid_width;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRoomBounds { .. })));

        let mut config = SessionConfig::default();
        config.rooms.min_height = 2;
        config.rooms.max_height = 2;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRoomBounds { .. })));

        let mut config = SessionConfig::default();
        config.rooms.min_width = 7;
        config.rooms.max_width = 6;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRoomBounds { .. })));
    }

    #[test]
    fn non_positive_contact_radius_is_rejected() {
        let mut config = SessionConfig::default();
        config.enemies.contact_radius = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidEnemySettings { .. })));
    }
}
