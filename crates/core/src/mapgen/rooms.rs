//! Room placement: rejection-sampled rectangles carved as closed shells with one door.

use tracing::{debug, warn};

use crate::config::RoomConfig;
use crate::random::RandomSource;
use crate::state::Grid;
use crate::types::{Cell, TileKind};

use super::model::Room;
use super::repair::link_room_door;

/// Offset of the earliest room corner from the grid origin.
const ROOM_ORIGIN_OFFSET: i32 = 2;
/// Cells kept free between a room's far edge and the grid edge.
const ROOM_FAR_MARGIN: i32 = 3;

/// Carves up to `settings.count` rooms into `grid`, linking each door to the maze.
///
/// Exhausting the attempt budget returns fewer rooms; that is a poorer stage, not
/// an error.
pub fn place_rooms<R: RandomSource>(
    grid: &mut Grid,
    settings: &RoomConfig,
    rng: &mut R,
) -> Vec<Room> {
    let mut rooms: Vec<Room> = Vec::with_capacity(settings.count);

    for _ in 0..settings.attempts {
        if rooms.len() >= settings.count {
            break;
        }
        let Some(candidate) = sample_room(grid, settings, rng) else {
            continue;
        };
        let candidate_with_margin = candidate.expanded(1);
        if rooms.iter().any(|existing| existing.expanded(1).intersects(&candidate_with_margin)) {
            continue;
        }

        carve_shell(grid, &candidate);
        let door = pick_door(&candidate, rng);
        grid.set_tile(door, TileKind::Floor);
        let room = Room { door: Some(door), ..candidate };
        let linked = link_room_door(grid, &room, &rooms);
        debug!(
            x = room.x,
            y = room.y,
            width = room.width,
            height = room.height,
            ?door,
            linked,
            "placed room"
        );
        rooms.push(room);
    }

    if rooms.len() < settings.count {
        warn!(
            placed = rooms.len(),
            requested = settings.count,
            "room attempt budget exhausted; stage has fewer rooms"
        );
    }
    rooms
}

fn sample_room<R: RandomSource>(grid: &Grid, settings: &RoomConfig, rng: &mut R) -> Option<Room> {
    let width = rng.range_inclusive(settings.min_width as i32, settings.max_width as i32);
    let height = rng.range_inclusive(settings.min_height as i32, settings.max_height as i32);
    let max_x = grid.width() as i32 - width - ROOM_FAR_MARGIN;
    let max_y = grid.height() as i32 - height - ROOM_FAR_MARGIN;
    if max_x < ROOM_ORIGIN_OFFSET || max_y < ROOM_ORIGIN_OFFSET {
        return None;
    }

    let x = rng.range_inclusive(ROOM_ORIGIN_OFFSET, max_x);
    let y = rng.range_inclusive(ROOM_ORIGIN_OFFSET, max_y);
    Some(Room { x, y, width, height, door: None })
}

/// Floor interior inside a wall perimeter.
fn carve_shell(grid: &mut Grid, room: &Room) {
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            let cell = Cell { x, y };
            let tile = if room.is_perimeter(cell) { TileKind::Wall } else { TileKind::Floor };
            grid.set_tile(cell, tile);
        }
    }
}

/// Uniform side, then a non-corner cell along it.
fn pick_door<R: RandomSource>(room: &Room, rng: &mut R) -> Cell {
    match rng.index(4) {
        0 => Cell { x: rng.range_inclusive(room.x + 1, room.right() - 1), y: room.y },
        1 => Cell { x: room.right(), y: rng.range_inclusive(room.y + 1, room.bottom() - 1) },
        2 => Cell { x: rng.range_inclusive(room.x + 1, room.right() - 1), y: room.bottom() },
        _ => Cell { x: room.x, y: rng.range_inclusive(room.y + 1, room.bottom() - 1) },
    }
}
