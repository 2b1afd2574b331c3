//! Connectivity repair: shortest-corridor carving from isolated floor to the existing maze.
//! This module exists so every room door and every stray floor fragment ends up linked
//! to the start cell. It does not decide where rooms go.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::{debug, warn};

use crate::state::Grid;
use crate::types::{Cell, Direction, TileKind};

use super::model::Room;

/// Length cap of each fallback probe corridor.
pub const PROBE_LENGTH: usize = 40;

/// Links `from` to the nearest other floor cell by carving the shortest corridor.
///
/// Returns `false` when no floor existed anywhere else and fallback probes were
/// carved instead. The border ring is never carved.
pub fn repair(grid: &mut Grid, from: Cell) -> bool {
    link_or_probe(grid, from, |_| true)
}

/// Door variant of [`repair`]: the search never re-enters `room`, never breaks another
/// room's shell, and so always links the door to floor outside the room.
pub(super) fn link_room_door(grid: &mut Grid, room: &Room, placed: &[Room]) -> bool {
    let Some(door) = room.door else {
        return false;
    };
    link_or_probe(grid, door, |cell| {
        !room.contains(cell) && !placed.iter().any(|other| other.is_shell_wall(cell))
    })
}

/// Joins every floor region unreachable from `start` to the start region.
/// Returns the number of corridors carved.
pub fn connect_regions(grid: &mut Grid, start: Cell, rooms: &[Room]) -> usize {
    grid.set_tile(start, TileKind::Floor);
    let mut reachable = grid.reachable_from(start);
    let mut corridors = 0;

    loop {
        let stray = grid.floor_cells().find(|cell| !reachable.contains(cell));
        let Some(stray) = stray else {
            break;
        };
        let joined = carve_to_nearest(
            grid,
            stray,
            |cell| !rooms.iter().any(|room| room.is_shell_wall(cell)),
            |_, cell| reachable.contains(&cell),
        )
        .or_else(|| carve_to_nearest(grid, stray, |_| true, |_, cell| reachable.contains(&cell)));

        match joined {
            Some(path) => {
                debug!(from = ?stray, length = path.len(), "joined stray floor region");
                corridors += 1;
            }
            None => {
                warn!(cell = ?stray, "stray floor cell cannot reach start; sealing it");
                grid.set_tile(stray, TileKind::Wall);
            }
        }
        reachable = grid.reachable_from(start);
    }
    corridors
}

fn link_or_probe(grid: &mut Grid, origin: Cell, passable: impl Fn(Cell) -> bool) -> bool {
    grid.set_tile(origin, TileKind::Floor);
    if let Some(path) = carve_to_nearest(grid, origin, &passable, |grid, cell| grid.is_floor(cell))
    {
        debug!(?origin, length = path.len(), "carved repair corridor");
        return true;
    }

    warn!(?origin, "no existing floor found; carving fallback probes");
    carve_probes(grid, origin, &passable);
    false
}

/// Breadth-first search from `origin` through interior `passable` cells; on reaching a
/// goal cell, forces every cell on the parent chain to floor and returns that chain.
fn carve_to_nearest(
    grid: &mut Grid,
    origin: Cell,
    passable: impl Fn(Cell) -> bool,
    is_goal: impl Fn(&Grid, Cell) -> bool,
) -> Option<Vec<Cell>> {
    let mut parents: BTreeMap<Cell, Cell> = BTreeMap::new();
    let mut visited = BTreeSet::from([origin]);
    let mut queue = VecDeque::from([origin]);
    let mut found = None;

    while let Some(current) = queue.pop_front() {
        if current != origin && is_goal(grid, current) {
            found = Some(current);
            break;
        }
        for next in current.neighbors() {
            if !grid.is_interior(next) || !passable(next) || !visited.insert(next) {
                continue;
            }
            parents.insert(next, current);
            queue.push_back(next);
        }
    }

    let mut cursor = found?;
    let mut path = Vec::new();
    while cursor != origin {
        grid.set_tile(cursor, TileKind::Floor);
        path.push(cursor);
        cursor = parents[&cursor];
    }
    path.reverse();
    Some(path)
}

fn carve_probes(grid: &mut Grid, origin: Cell, passable: impl Fn(Cell) -> bool) {
    for direction in Direction::ALL {
        let mut cursor = origin;
        for _ in 0..PROBE_LENGTH {
            cursor = cursor.step(direction);
            if !grid.is_interior(cursor) || !passable(cursor) {
                break;
            }
            grid.set_tile(cursor, TileKind::Floor);
        }
    }
    grid.set_tile(origin, TileKind::Floor);
}
