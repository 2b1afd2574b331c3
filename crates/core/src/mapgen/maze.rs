//! Perfect-maze carving by randomized depth-first backtracking on a two-cell stride.

use crate::random::RandomSource;
use crate::state::Grid;
use crate::types::{Cell, Direction, START_CELL, TileKind};

struct Frame {
    cell: Cell,
    order: [Direction; 4],
    next: usize,
}

impl Frame {
    fn new<R: RandomSource>(cell: Cell, rng: &mut R) -> Self {
        let mut order = Direction::ALL;
        rng.shuffle(&mut order);
        Self { cell, order, next: 0 }
    }
}

/// Builds a wall-filled grid and carves a spanning-tree maze from the start cell.
pub fn generate_maze<R: RandomSource>(width: usize, height: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::filled(width, height, TileKind::Wall);
    if grid.is_interior(START_CELL) {
        carve_from(&mut grid, START_CELL, rng);
    }
    grid
}

fn carve_from<R: RandomSource>(grid: &mut Grid, start: Cell, rng: &mut R) {
    grid.set_tile(start, TileKind::Floor);
    let mut stack = vec![Frame::new(start, rng)];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.order.len() {
            stack.pop();
            continue;
        }
        let direction = frame.order[frame.next];
        frame.next += 1;

        let between = frame.cell.step(direction);
        let target = between.step(direction);
        if grid.is_interior(target) && grid.tile_at(target) == TileKind::Wall {
            grid.set_tile(between, TileKind::Floor);
            grid.set_tile(target, TileKind::Floor);
            stack.push(Frame::new(target, rng));
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    fn floor_edge_count(grid: &Grid) -> usize {
        grid.floor_cells()
            .map(|cell| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|&direction| grid.is_floor(cell.step(direction)))
                    .count()
            })
            .sum()
    }

    #[test]
    fn maze_on_odd_grid_visits_every_odd_cell() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let grid = generate_maze(21, 15, &mut rng);
        for y in (1..14).step_by(2) {
            for x in (1..20).step_by(2) {
                assert!(grid.is_floor(Cell::new(x, y)), "odd cell ({x}, {y}) should be carved");
            }
        }
    }

    #[test]
    fn even_lattice_cells_stay_wall() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = generate_maze(26, 16, &mut rng);
        for cell in grid.cells() {
            if cell.x % 2 == 0 && cell.y % 2 == 0 {
                assert!(!grid.is_floor(cell), "lattice post {cell:?} must remain wall");
            }
        }
    }

    #[test]
    fn border_ring_is_never_carved() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let grid = generate_maze(26, 16, &mut rng);
        for cell in grid.cells() {
            if !grid.is_interior(cell) {
                assert_eq!(grid.tile_at(cell), TileKind::Wall, "border {cell:?} was carved");
            }
        }
    }

    #[test]
    fn tiny_grid_leaves_only_walls() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = generate_maze(2, 2, &mut rng);
        assert_eq!(grid.floor_count(), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]
        #[test]
        fn carved_region_is_a_spanning_tree(
            seed in any::<u64>(),
            width in 5_usize..40,
            height in 5_usize..30
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let grid = generate_maze(width, height, &mut rng);
            let floor = grid.floor_count();

            prop_assert!(grid.is_floor(START_CELL));
            prop_assert_eq!(grid.reachable_from(START_CELL).len(), floor);
            prop_assert_eq!(floor_edge_count(&grid), floor - 1, "a connected tree has V - 1 edges");
        }
    }
}
