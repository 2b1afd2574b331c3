//! Answer-pad and enemy spawn placement under Manhattan separation constraints.

use tracing::warn;

use crate::config::EnemyConfig;
use crate::random::RandomSource;
use crate::state::Grid;
use crate::types::{Cell, START_CELL, TileKind};

use super::model::{Room, StageLayout};

/// Separation used when pads have to be scattered outside rooms.
const LOOSE_PAD_SEPARATION: u32 = 4;
const LOOSE_PAD_ATTEMPTS: usize = 1000;

/// Cells closer than `radius` to `center` are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exclusion {
    pub center: Cell,
    pub radius: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScatterRequest<'a> {
    pub count: usize,
    pub min_separation: u32,
    pub exclusion: Option<Exclusion>,
    pub attempts: usize,
    /// Cells already taken: kept at `min_separation` but never returned.
    pub occupied: &'a [Cell],
}

/// Rejection-samples floor cells at least two cells in from the border. Returns fewer
/// than `count` cells when the attempt budget runs out; callers treat that as a thinner
/// stage.
pub fn pick_separated_floor_cells<R: RandomSource>(
    grid: &Grid,
    request: &ScatterRequest<'_>,
    rng: &mut R,
) -> Vec<Cell> {
    let mut picks: Vec<Cell> = Vec::with_capacity(request.count);
    let max_x = grid.width() as i32 - 3;
    let max_y = grid.height() as i32 - 3;
    if max_x < 2 || max_y < 2 {
        return picks;
    }

    for _ in 0..request.attempts {
        if picks.len() >= request.count {
            break;
        }
        let candidate = Cell { x: rng.range_inclusive(2, max_x), y: rng.range_inclusive(2, max_y) };
        if !grid.is_floor(candidate) {
            continue;
        }
        if request
            .exclusion
            .is_some_and(|exclusion| candidate.manhattan(exclusion.center) < exclusion.radius)
        {
            continue;
        }
        if picks
            .iter()
            .chain(request.occupied)
            .any(|&taken| candidate.manhattan(taken) < request.min_separation)
        {
            continue;
        }
        picks.push(candidate);
    }
    picks
}

/// One pad per room center, drawn from shuffled rooms; scattered floor cells make up
/// any shortfall so every displayed option gets a pad.
pub(super) fn place_answer_pads<R: RandomSource>(
    grid: &Grid,
    rooms: &[Room],
    count: usize,
    rng: &mut R,
) -> Vec<Cell> {
    let mut order: Vec<usize> = (0..rooms.len()).collect();
    rng.shuffle(&mut order);
    let mut pads: Vec<Cell> =
        order.into_iter().take(count).map(|index| rooms[index].center()).collect();
    if pads.len() >= count {
        return pads;
    }

    warn!(rooms = rooms.len(), pads = count, "too few rooms for answer pads; scattering the rest");
    let loose = pick_separated_floor_cells(
        grid,
        &ScatterRequest {
            count: count - pads.len(),
            min_separation: LOOSE_PAD_SEPARATION,
            exclusion: Some(Exclusion { center: START_CELL, radius: LOOSE_PAD_SEPARATION }),
            attempts: LOOSE_PAD_ATTEMPTS,
            occupied: &pads,
        },
        rng,
    );
    pads.extend(loose);

    if pads.len() < count {
        let fill: Vec<Cell> = grid
            .floor_cells()
            .filter(|&cell| cell != START_CELL && !pads.contains(&cell))
            .take(count - pads.len())
            .collect();
        pads.extend(fill);
    }
    pads
}

/// Keeps room-center pads and moves every other pad onto a newly carved dead end: an
/// interior wall cell outside all rooms that touches corridor floor. The floor graph
/// without the new cells is the connected layout itself, so no pad ever stands on the
/// only route to another.
pub(super) fn seat_loose_pads_on_spurs<R: RandomSource>(
    layout: &mut StageLayout,
    count: usize,
    rng: &mut R,
) {
    let centers: Vec<Cell> = layout.rooms.iter().map(Room::center).collect();
    let mut pads: Vec<Cell> =
        layout.pad_cells.iter().copied().filter(|pad| centers.contains(pad)).take(count).collect();

    let mut candidates = spur_candidates(&layout.grid, &layout.rooms);
    rng.shuffle(&mut candidates);
    candidates.sort_by_key(|cell| cell.manhattan(START_CELL) < LOOSE_PAD_SEPARATION);

    let mut spurs: Vec<Cell> = Vec::new();
    for &cell in &candidates {
        if pads.len() + spurs.len() >= count {
            break;
        }
        if spurs.iter().all(|spur| spur.manhattan(cell) >= LOOSE_PAD_SEPARATION) {
            spurs.push(cell);
        }
    }
    for &cell in &candidates {
        if pads.len() + spurs.len() >= count {
            break;
        }
        if !spurs.contains(&cell) {
            spurs.push(cell);
        }
    }

    for &spur in &spurs {
        layout.grid.set_tile(spur, TileKind::Floor);
    }
    pads.extend(spurs);
    if pads.len() < count {
        warn!(placed = pads.len(), requested = count, "no wall left to carve for answer pads");
    }
    layout.pad_cells = pads;
}

fn spur_candidates(grid: &Grid, rooms: &[Room]) -> Vec<Cell> {
    let in_room = |cell: Cell| rooms.iter().any(|room| room.contains(cell));
    grid.cells()
        .filter(|&cell| grid.is_interior(cell) && !grid.is_floor(cell) && !in_room(cell))
        .filter(|&cell| {
            cell.neighbors().into_iter().any(|anchor| grid.is_floor(anchor) && !in_room(anchor))
        })
        .collect()
}

pub(super) fn place_enemies<R: RandomSource>(
    grid: &Grid,
    settings: &EnemyConfig,
    occupied: &[Cell],
    rng: &mut R,
) -> Vec<Cell> {
    let enemies = pick_separated_floor_cells(
        grid,
        &ScatterRequest {
            count: settings.count,
            min_separation: settings.min_separation,
            exclusion: Some(Exclusion { center: START_CELL, radius: settings.start_clearance }),
            attempts: settings.attempts,
            occupied,
        },
        rng,
    );
    if enemies.len() < settings.count {
        warn!(
            placed = enemies.len(),
            requested = settings.count,
            "enemy attempt budget exhausted; stage has fewer enemies"
        );
    }
    enemies
}
