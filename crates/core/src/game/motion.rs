//! Discrete tile-to-tile motion shared by the player and enemies.
//! This module exists to keep step validation and in-flight interpolation in one state machine.
//! It does not decide what an overlap at the destination means.

use crate::pixel::{PixelPos, grid_to_pixel};
use crate::random::RandomSource;
use crate::state::Grid;
use crate::types::{Cell, Direction};

/// True iff the neighbor of `cell` in `direction` is in bounds and floor.
pub fn can_step(grid: &Grid, cell: Cell, direction: Direction) -> bool {
    grid.is_floor(cell.step(direction))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    Idle,
    Moving { target: Cell, elapsed_ms: u32, duration_ms: u32 },
}

/// An actor that occupies `cell` until an in-flight move completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mover {
    cell: Cell,
    motion: Motion,
}

impl Mover {
    pub fn at(cell: Cell) -> Self {
        Self { cell, motion: Motion::Idle }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.motion, Motion::Moving { .. })
    }

    /// Commits a move when idle and the step is valid; returns the destination.
    pub fn begin_step(
        &mut self,
        grid: &Grid,
        direction: Direction,
        duration_ms: u32,
    ) -> Option<Cell> {
        if self.is_moving() || !can_step(grid, self.cell, direction) {
            return None;
        }
        let target = self.cell.step(direction);
        self.motion = Motion::Moving { target, elapsed_ms: 0, duration_ms: duration_ms.max(1) };
        Some(target)
    }

    /// Runs an in-flight move forward. Returns the new cell when the move lands;
    /// time left over after landing is dropped, so each call completes at most one step.
    pub fn advance(&mut self, dt_ms: u32) -> Option<Cell> {
        let Motion::Moving { target, elapsed_ms, duration_ms } = self.motion else {
            return None;
        };
        let elapsed_ms = elapsed_ms.saturating_add(dt_ms);
        if elapsed_ms < duration_ms {
            self.motion = Motion::Moving { target, elapsed_ms, duration_ms };
            return None;
        }
        self.cell = target;
        self.motion = Motion::Idle;
        Some(target)
    }

    /// Teleport with motion cleared.
    pub fn reset_to(&mut self, cell: Cell) {
        *self = Self::at(cell);
    }

    pub fn pixel_position(&self, tile_size: u32) -> PixelPos {
        let origin = grid_to_pixel(self.cell, tile_size);
        match self.motion {
            Motion::Idle => origin,
            Motion::Moving { target, elapsed_ms, duration_ms } => origin
                .lerp(grid_to_pixel(target, tile_size), elapsed_ms as f32 / duration_ms as f32),
        }
    }
}

/// Picks a valid wander direction, avoiding an immediate reversal of `facing`
/// whenever another valid direction exists. `None` when the actor is boxed in.
pub fn choose_wander_direction<R: RandomSource>(
    grid: &Grid,
    cell: Cell,
    facing: Option<Direction>,
    rng: &mut R,
) -> Option<Direction> {
    let mut options: Vec<Direction> =
        Direction::ALL.into_iter().filter(|&direction| can_step(grid, cell, direction)).collect();
    if let Some(facing) = facing
        && options.len() > 1
    {
        options.retain(|&direction| direction != facing.reverse());
    }
    if options.is_empty() {
        return None;
    }
    Some(options[rng.index(options.len())])
}

/// Step duration with uniform jitter in `0..=jitter_ms`.
pub fn jittered_duration<R: RandomSource>(base_ms: u32, jitter_ms: u32, rng: &mut R) -> u32 {
    if jitter_ms == 0 {
        return base_ms;
    }
    base_ms + rng.index(jitter_ms as usize + 1) as u32
}
