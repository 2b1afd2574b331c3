//! Grid-to-pixel coordinate mapping shared with the rendering collaborator.

use crate::types::Cell;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn lerp(self, target: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self { x: self.x + (target.x - self.x) * t, y: self.y + (target.y - self.y) * t }
    }
}

/// Center of the tile at `cell`.
pub fn grid_to_pixel(cell: Cell, tile_size: u32) -> PixelPos {
    let tile = tile_size as f32;
    PixelPos { x: cell.x as f32 * tile + tile / 2.0, y: cell.y as f32 * tile + tile / 2.0 }
}

pub fn pixel_to_grid(pos: PixelPos, tile_size: u32) -> Cell {
    let tile = tile_size as f32;
    Cell { x: (pos.x / tile).floor() as i32, y: (pos.y / tile).floor() as i32 }
}
