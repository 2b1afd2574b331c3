//! ASCII rendering of a stage for tests and headless tools.

use crate::types::{Cell, TileKind};

use super::stage::Stage;

/// `#` wall, `.` floor, `D` door, `0`..`2` answer pads, `E` enemy, `@` player.
pub fn stage_diagram(stage: &Stage, player: Cell) -> String {
    let grid = stage.grid();
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            out.push(symbol_at(stage, Cell { x, y }, player));
        }
        out.push('\n');
    }
    out
}

fn symbol_at(stage: &Stage, cell: Cell, player: Cell) -> char {
    if cell == player {
        return '@';
    }
    if stage.enemies().any(|(_, enemy)| enemy.mover.cell() == cell) {
        return 'E';
    }
    if let Some(pad) = stage.pad_at(cell).and_then(|id| stage.pad(id)) {
        return char::from_digit(pad.option_index as u32, 10).unwrap_or('?');
    }
    if stage.rooms().iter().any(|room| room.door == Some(cell)) {
        return 'D';
    }
    match stage.grid().tile_at(cell) {
        TileKind::Wall => '#',
        TileKind::Floor => '.',
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{EnemyConfig, SessionConfig};
    use crate::content::QuestionCatalog;
    use crate::game::Session;

    use super::*;

    #[test]
    fn diagram_marks_every_entity_once() {
        let config = SessionConfig {
            enemies: EnemyConfig { count: 0, ..EnemyConfig::default() },
            ..SessionConfig::default()
        };
        let session = Session::new(config, QuestionCatalog::default(), 77)
            .expect("enemy-free session is valid");
        let diagram = stage_diagram(session.stage(), session.player_cell());
        let lines: Vec<&str> = diagram.lines().collect();

        assert_eq!(lines.len(), 16);
        assert!(lines.iter().all(|line| line.chars().count() == 26));
        assert_eq!(diagram.matches('@').count(), 1);
        assert_eq!(lines[1].chars().nth(1), Some('@'));
        for digit in ['0', '1', '2'] {
            assert_eq!(diagram.matches(digit).count(), 1, "pad {digit}");
        }
        assert_eq!(diagram.matches('D').count(), session.stage().rooms().len());
        assert!(lines[0].chars().all(|symbol| symbol == '#'));
        assert_eq!(diagram.matches('E').count(), 0);
    }
}
