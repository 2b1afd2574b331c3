//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from session control code.
//! It does not own replay execution or journal persistence policies.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::Session;
use super::motion::{Motion, Mover};

impl Session {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.elapsed_ms);
        hasher.write_u64(self.inputs_applied);
        hasher.write_u32(self.progress.score);
        hasher.write_u8(self.progress.lives);
        hasher.write_u32(self.progress.stage);
        hasher.write_u64(self.stage.id.0);
        hasher.write_u64(self.stage.question_index as u64);
        hasher.write(&self.stage.grid.canonical_bytes());
        for pad in self.stage.pads.values() {
            hasher.write_i32(pad.cell.x);
            hasher.write_i32(pad.cell.y);
            hasher.write_u64(pad.option_index as u64);
        }
        for enemy in self.stage.enemies.values() {
            write_mover(&mut hasher, &enemy.mover);
        }
        write_mover(&mut hasher, &self.player);
        hasher.finish()
    }
}

fn write_mover(hasher: &mut Xxh3, mover: &Mover) {
    hasher.write_i32(mover.cell().x);
    hasher.write_i32(mover.cell().y);
    if let Motion::Moving { target, elapsed_ms, duration_ms } = mover.motion() {
        hasher.write_i32(target.x);
        hasher.write_i32(target.y);
        hasher.write_u32(elapsed_ms);
        hasher.write_u32(duration_ms);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SessionConfig;
    use crate::content::QuestionCatalog;
    use crate::game::Session;
    use crate::types::Direction;

    fn session(seed: u64) -> Session {
        Session::new(SessionConfig::default(), QuestionCatalog::default(), seed)
            .expect("default session is valid")
    }

    #[test]
    fn identical_sessions_hash_identically() {
        assert_eq!(session(10).snapshot_hash(), session(10).snapshot_hash());
        assert_ne!(session(10).snapshot_hash(), session(11).snapshot_hash());
    }

    #[test]
    fn ticks_and_steps_change_the_hash() {
        let mut session = session(12);
        let fresh = session.snapshot_hash();
        session.tick(16);
        let ticked = session.snapshot_hash();
        assert_ne!(fresh, ticked);

        let moved =
            Direction::ALL.into_iter().any(|direction| session.on_player_step(direction).accepted);
        assert!(moved);
        assert_ne!(session.snapshot_hash(), ticked);
    }
}
