//! Score, lives and stage transitions triggered by overlap reports.
//! This module exists to keep the progression state machine apart from motion and rendering.
//! It does not own stage generation; it only asks the session for a replacement stage.

use tracing::{debug, info};

use crate::state::ProgressState;
use crate::types::PadId;

use super::events::{LifeLossCause, Overlap, ProgressionEvent};
use super::Session;

pub const POINTS_PER_CORRECT_ANSWER: u32 = 10;

impl Session {
    /// Applies one overlap report. Reports for pads or enemies outside the active stage,
    /// including pads already answered wrong, are ignored.
    pub fn on_overlap(&mut self, overlap: Overlap) -> ProgressionEvent {
        match overlap {
            Overlap::Pad(pad) => self.answer(pad),
            Overlap::Enemy(enemy) if self.stage.enemies.contains_key(enemy) => {
                self.lose_life(LifeLossCause::EnemyContact)
            }
            Overlap::Enemy(enemy) => {
                debug!(?enemy, "ignoring contact with an enemy outside the active stage");
                ProgressionEvent::Ignored
            }
        }
    }

    fn answer(&mut self, pad: PadId) -> ProgressionEvent {
        let Some(option_index) = self.stage.pads.get(pad).map(|pad| pad.option_index) else {
            debug!(?pad, "ignoring overlap with a pad outside the active stage");
            return ProgressionEvent::Ignored;
        };

        if self.stage.question.is_correct(option_index) {
            self.progress.score += POINTS_PER_CORRECT_ANSWER;
            self.progress.stage += 1;
            self.install_next_stage();
            info!(
                stage = self.progress.stage,
                score = self.progress.score,
                "correct answer; stage advanced"
            );
            return ProgressionEvent::StageAdvanced {
                stage: self.progress.stage,
                score: self.progress.score,
                stage_id: self.stage.id,
            };
        }

        self.stage.pads.remove(pad);
        self.lose_life(LifeLossCause::WrongAnswer)
    }

    fn lose_life(&mut self, cause: LifeLossCause) -> ProgressionEvent {
        self.progress.lives = self.progress.lives.saturating_sub(1);
        if self.progress.lives == 0 {
            self.progress = ProgressState::default();
            self.install_next_stage();
            info!(?cause, "lives exhausted; session reset");
            return ProgressionEvent::SessionReset { cause, stage_id: self.stage.id };
        }

        self.player.reset_to(self.stage.player_start);
        info!(?cause, lives = self.progress.lives, "life lost");
        ProgressionEvent::LifeLost { cause, lives: self.progress.lives }
    }
}
