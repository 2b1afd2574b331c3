//! Public data models for generated stages and the rooms carved into them.

use crate::state::Grid;
use crate::types::{Cell, TileKind};

/// Axis-aligned room rectangle with at most one door on its perimeter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub door: Option<Cell>,
}

impl Room {
    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn center(&self) -> Cell {
        Cell { x: self.x + self.width / 2, y: self.y + self.height / 2 }
    }

    pub fn expanded(&self, margin: i32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2 * margin,
            height: self.height + 2 * margin,
            door: None,
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x && cell.x <= self.right() && cell.y >= self.y && cell.y <= self.bottom()
    }

    pub fn is_perimeter(&self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.x == self.x
                || cell.x == self.right()
                || cell.y == self.y
                || cell.y == self.bottom())
    }

    /// Perimeter cell that must stay closed: everything but the door.
    pub fn is_shell_wall(&self, cell: Cell) -> bool {
        self.is_perimeter(cell) && self.door != Some(cell)
    }

    pub fn perimeter_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity((2 * (self.width + self.height)) as usize);
        for y in self.y..=self.bottom() {
            for x in self.x..=self.right() {
                let cell = Cell { x, y };
                if self.is_perimeter(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }
}

/// Everything the generation pipeline produces for one stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageLayout {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    /// Pad `i` carries option `i` of the stage question.
    pub pad_cells: Vec<Cell>,
    pub enemy_cells: Vec<Cell>,
    pub start: Cell,
}

impl StageLayout {
    /// Every pad can be reached from the start without stepping on another pad.
    pub fn pads_reachable(&self) -> bool {
        self.pad_cells.iter().enumerate().all(|(index, pad)| {
            let mut grid = self.grid.clone();
            for (other_index, &other) in self.pad_cells.iter().enumerate() {
                if other_index != index {
                    grid.set_tile(other, TileKind::Wall);
                }
            }
            grid.reachable_from(self.start).contains(pad)
        })
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = self.grid.canonical_bytes();
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.x.to_le_bytes());
            bytes.extend(room.y.to_le_bytes());
            bytes.extend(room.width.to_le_bytes());
            bytes.extend(room.height.to_le_bytes());
        }
        for cells in [&self.pad_cells, &self.enemy_cells] {
            bytes.extend((cells.len() as u32).to_le_bytes());
            for cell in cells {
                bytes.extend(cell.x.to_le_bytes());
                bytes.extend(cell.y.to_le_bytes());
            }
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(x: i32, y: i32, width: i32, height: i32) -> Room {
        Room { x, y, width, height, door: None }
    }

    #[test]
    fn expanded_rooms_two_cells_apart_still_touch() {
        let left = room(2, 2, 4, 4);
        let right = room(7, 2, 4, 4);
        assert!(!left.intersects(&right));
        assert!(left.expanded(1).intersects(&right.expanded(1)));

        let spaced = room(8, 2, 4, 4);
        assert!(!left.expanded(1).intersects(&spaced.expanded(1)));
    }

    #[test]
    fn perimeter_has_expected_cell_count() {
        let shell = room(3, 4, 5, 4);
        assert_eq!(shell.perimeter_cells().len(), 2 * 5 + 2 * 4 - 4);
        assert!(!shell.is_perimeter(shell.center()));
    }

    #[test]
    fn pad_blocking_the_only_corridor_makes_layout_unreachable() {
        let mut grid = Grid::filled(8, 3, TileKind::Wall);
        for x in 1..7 {
            grid.set_tile(Cell::new(x, 1), TileKind::Floor);
        }
        let mut layout = StageLayout {
            grid,
            rooms: Vec::new(),
            pad_cells: vec![Cell::new(3, 1), Cell::new(6, 1)],
            enemy_cells: Vec::new(),
            start: Cell::new(1, 1),
        };
        assert!(!layout.pads_reachable(), "pad 0 sits between the start and pad 1");

        layout.pad_cells = vec![Cell::new(6, 1), Cell::new(3, 1)];
        assert!(!layout.pads_reachable(), "order does not matter");

        layout.pad_cells = vec![Cell::new(6, 1)];
        assert!(layout.pads_reachable());
    }

    #[test]
    fn door_is_not_a_shell_wall() {
        let door = Cell::new(3, 5);
        let shell = Room { door: Some(door), ..room(3, 4, 5, 4) };
        assert!(shell.is_perimeter(door));
        assert!(!shell.is_shell_wall(door));
        assert!(shell.is_shell_wall(Cell::new(3, 4)));
    }
}
