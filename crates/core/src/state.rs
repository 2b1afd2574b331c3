use std::collections::{BTreeSet, VecDeque};

use crate::types::*;

pub const STARTING_LIVES: u8 = 3;
pub const STARTING_STAGE: u32 = 1;

/// Tile buffer for one stage. Out-of-bounds queries read as `Wall`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    /// True for cells that are in bounds and not on the outer border ring.
    pub fn is_interior(&self, cell: Cell) -> bool {
        cell.x > 0
            && cell.y > 0
            && (cell.x as usize) < self.width.saturating_sub(1)
            && (cell.y as usize) < self.height.saturating_sub(1)
    }

    pub fn tile_at(&self, cell: Cell) -> TileKind {
        if !self.in_bounds(cell) {
            return TileKind::Wall;
        }
        self.tiles[self.index(cell)]
    }

    pub fn is_floor(&self, cell: Cell) -> bool {
        self.tile_at(cell) == TileKind::Floor
    }

    pub fn set_tile(&mut self, cell: Cell, tile: TileKind) {
        if !self.in_bounds(cell) {
            return;
        }
        let idx = self.index(cell);
        self.tiles[idx] = tile;
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Cell::new(x as i32, y as i32)))
    }

    pub fn floor_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(|&cell| self.is_floor(cell))
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|&&tile| tile == TileKind::Floor).count()
    }

    /// Floor cells 4-connected to `start`; empty when `start` itself is not floor.
    pub fn reachable_from(&self, start: Cell) -> BTreeSet<Cell> {
        let mut visited = BTreeSet::new();
        if !self.is_floor(start) {
            return visited;
        }

        let mut queue = VecDeque::from([start]);
        visited.insert(start);
        while let Some(current) = queue.pop_front() {
            for neighbor in current.neighbors() {
                if self.is_floor(neighbor) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        visited
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.tiles.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.tiles.iter().map(|tile| match tile {
            TileKind::Wall => 0_u8,
            TileKind::Floor => 1_u8,
        }));
        bytes
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.y as usize) * self.width + (cell.x as usize)
    }
}

/// Session-wide score, lives, and stage counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressState {
    pub score: u32,
    pub lives: u8,
    pub stage: u32,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self { score: 0, lives: STARTING_LIVES, stage: STARTING_STAGE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_as_wall_and_writes_are_ignored() {
        let mut grid = Grid::filled(4, 3, TileKind::Floor);
        assert_eq!(grid.tile_at(Cell::new(-1, 0)), TileKind::Wall);
        assert_eq!(grid.tile_at(Cell::new(4, 0)), TileKind::Wall);
        assert_eq!(grid.tile_at(Cell::new(0, 3)), TileKind::Wall);

        grid.set_tile(Cell::new(9, 9), TileKind::Wall);
        assert_eq!(grid.floor_count(), 12);
    }

    #[test]
    fn interior_excludes_the_border_ring() {
        let grid = Grid::filled(5, 5, TileKind::Wall);
        assert!(grid.is_interior(Cell::new(1, 1)));
        assert!(grid.is_interior(Cell::new(3, 3)));
        assert!(!grid.is_interior(Cell::new(0, 2)));
        assert!(!grid.is_interior(Cell::new(4, 2)));
        assert!(!grid.is_interior(Cell::new(2, 4)));
    }

    #[test]
    fn reachable_from_stops_at_walls() {
        let mut grid = Grid::filled(7, 3, TileKind::Wall);
        for x in 1..=2 {
            grid.set_tile(Cell::new(x, 1), TileKind::Floor);
        }
        grid.set_tile(Cell::new(5, 1), TileKind::Floor);

        let reachable = grid.reachable_from(Cell::new(1, 1));
        assert_eq!(reachable, BTreeSet::from([Cell::new(1, 1), Cell::new(2, 1)]));
        assert!(grid.reachable_from(Cell::new(3, 1)).is_empty());
    }

    #[test]
    fn default_progress_matches_session_start() {
        let progress = ProgressState::default();
        assert_eq!(progress, ProgressState { score: 0, lives: 3, stage: 1 });
    }
}
