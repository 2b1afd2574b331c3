//! Stage layout orchestration: maze, rooms, region joining, pads and enemies.

use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::random::RandomSource;
use crate::types::{START_CELL, TileKind};

use super::maze::generate_maze;
use super::model::StageLayout;
use super::repair::connect_regions;
use super::rooms::place_rooms;
use super::spawns::{place_answer_pads, place_enemies, seat_loose_pads_on_spurs};

/// Layouts built before loose pads are moved onto carved dead ends.
pub const MAX_LAYOUT_ATTEMPTS: usize = 8;

#[derive(Clone, Debug)]
pub struct StageGenerator {
    config: SessionConfig,
}

impl StageGenerator {
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Builds a layout with `pad_count` answer pads, each reachable from the start cell
    /// without crossing another pad.
    ///
    /// Rejected layouts are rebuilt; once [`MAX_LAYOUT_ATTEMPTS`] is spent, the last
    /// layout keeps its room-center pads and the rest are seated on carved dead ends.
    pub fn generate<R: RandomSource>(&self, pad_count: usize, rng: &mut R) -> StageLayout {
        let mut layout = self.build_layout(pad_count, rng);
        let mut attempt = 1;
        while !is_playable(&layout, pad_count) {
            if attempt == MAX_LAYOUT_ATTEMPTS {
                warn!(attempt, "layout budget spent; seating loose answer pads on dead ends");
                seat_loose_pads_on_spurs(&mut layout, pad_count, rng);
                break;
            }
            warn!(attempt, "answer pads missing or cut off from the start; regenerating layout");
            layout = self.build_layout(pad_count, rng);
            attempt += 1;
        }
        layout
    }

    fn build_layout<R: RandomSource>(&self, pad_count: usize, rng: &mut R) -> StageLayout {
        let mut grid = generate_maze(self.config.grid_width, self.config.grid_height, rng);
        let rooms = place_rooms(&mut grid, &self.config.rooms, rng);
        grid.set_tile(START_CELL, TileKind::Floor);
        let corridors = connect_regions(&mut grid, START_CELL, &rooms);

        let pad_cells = place_answer_pads(&grid, &rooms, pad_count, rng);
        let enemy_cells = place_enemies(&grid, &self.config.enemies, &[], rng);

        debug!(
            rooms = rooms.len(),
            corridors,
            pads = pad_cells.len(),
            enemies = enemy_cells.len(),
            floor = grid.floor_count(),
            "generated stage layout"
        );
        StageLayout { grid, rooms, pad_cells, enemy_cells, start: START_CELL }
    }
}

fn is_playable(layout: &StageLayout, pad_count: usize) -> bool {
    layout.pad_cells.len() == pad_count && layout.pads_reachable()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::config::RoomConfig;
    use crate::types::Cell;

    fn layout_for(seed: u64) -> StageLayout {
        let generator =
            StageGenerator::new(SessionConfig::default()).expect("default config is valid");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generator.generate(3, &mut rng)
    }

    #[test]
    fn invalid_config_is_rejected_before_generation() {
        let config = SessionConfig { grid_width: 4, ..SessionConfig::default() };
        assert_eq!(
            StageGenerator::new(config).unwrap_err(),
            ConfigError::InvalidGridSize { width: 4, height: 16 }
        );
    }

    #[test]
    fn same_seed_gives_same_layout() {
        assert_eq!(layout_for(99), layout_for(99));
        assert_ne!(layout_for(99).grid, layout_for(100).grid);
    }

    #[test]
    fn pads_prefer_room_centers() {
        for seed in 0..10 {
            let layout = layout_for(seed);
            assert_eq!(layout.pad_cells.len(), 3, "seed={seed}");
            assert!(!layout.rooms.is_empty(), "seed={seed}");
            let in_rooms = layout
                .pad_cells
                .iter()
                .filter(|&&pad| layout.rooms.iter().any(|room| room.center() == pad))
                .count();
            assert_eq!(in_rooms, layout.rooms.len().min(3), "seed={seed}");
            assert!(layout.pad_cells.iter().all(|&pad| layout.grid.is_floor(pad)));
        }
    }

    #[test]
    fn roomless_config_still_gets_reachable_pads() {
        let config = SessionConfig {
            rooms: RoomConfig { count: 0, ..RoomConfig::default() },
            ..SessionConfig::default()
        };
        let generator = StageGenerator::new(config).expect("config is valid");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let layout = generator.generate(3, &mut rng);

        assert!(layout.rooms.is_empty());
        assert_eq!(layout.pad_cells.len(), 3);
        assert!(layout.pads_reachable());
    }

    #[test]
    fn small_grids_never_hide_a_pad_behind_another() {
        for width in 8..=14 {
            for height in 8..=14 {
                let config = SessionConfig {
                    grid_width: width,
                    grid_height: height,
                    rooms: RoomConfig {
                        count: 4,
                        min_width: 3,
                        max_width: 3,
                        min_height: 3,
                        max_height: 3,
                        ..RoomConfig::default()
                    },
                    ..SessionConfig::default()
                };
                let generator = StageGenerator::new(config).expect("small config is valid");
                for seed in 0..40 {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    let layout = generator.generate(3, &mut rng);
                    let context = format!("{width}x{height} seed={seed}");

                    assert_eq!(layout.pad_cells.len(), 3, "{context}");
                    assert!(layout.pads_reachable(), "{context}");
                    assert_eq!(
                        layout.grid.reachable_from(START_CELL).len(),
                        layout.grid.floor_count(),
                        "{context}"
                    );
                    for room in &layout.rooms {
                        let open: Vec<Cell> = room
                            .perimeter_cells()
                            .into_iter()
                            .filter(|&cell| layout.grid.is_floor(cell))
                            .collect();
                        assert_eq!(open, room.door.into_iter().collect::<Vec<_>>(), "{context}");
                    }
                    for cell in layout.grid.cells() {
                        if !layout.grid.is_interior(cell) {
                            assert_eq!(layout.grid.tile_at(cell), TileKind::Wall, "{context}");
                        }
                    }
                }
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn generated_stages_are_fully_connected(seed in any::<u64>()) {
            let layout = layout_for(seed);
            let reachable = layout.grid.reachable_from(START_CELL);

            prop_assert!(layout.grid.is_floor(START_CELL));
            prop_assert_eq!(reachable.len(), layout.grid.floor_count());
            prop_assert!(layout.pads_reachable());
        }

        #[test]
        fn room_shells_keep_a_single_door(seed in any::<u64>()) {
            let layout = layout_for(seed);
            for room in &layout.rooms {
                let open: Vec<Cell> = room
                    .perimeter_cells()
                    .into_iter()
                    .filter(|&cell| layout.grid.is_floor(cell))
                    .collect();
                prop_assert_eq!(open.len(), 1);
                prop_assert_eq!(Some(open[0]), room.door);
            }
            for (index, left) in layout.rooms.iter().enumerate() {
                for right in &layout.rooms[index + 1..] {
                    prop_assert!(!left.intersects(right));
                }
            }
        }

        #[test]
        fn border_ring_survives_the_whole_pipeline(seed in any::<u64>()) {
            let layout = layout_for(seed);
            for cell in layout.grid.cells() {
                if !layout.grid.is_interior(cell) {
                    prop_assert_eq!(layout.grid.tile_at(cell), TileKind::Wall);
                }
            }
        }

        #[test]
        fn enemies_keep_their_distance(seed in any::<u64>()) {
            let layout = layout_for(seed);
            let enemies = &SessionConfig::default().enemies;
            for (index, enemy) in layout.enemy_cells.iter().enumerate() {
                prop_assert!(layout.grid.is_floor(*enemy));
                prop_assert!(enemy.manhattan(START_CELL) >= enemies.start_clearance);
                for other in &layout.enemy_cells[index + 1..] {
                    prop_assert!(enemy.manhattan(*other) >= enemies.min_separation);
                }
            }
        }
    }
}
