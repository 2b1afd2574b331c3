use thiserror::Error;

use crate::config::SessionConfig;
use crate::content::QuestionCatalog;
use crate::error::ConfigError;
use crate::game::{ProgressionEvent, Session, StageId};
use crate::journal::{InputJournal, JOURNAL_FORMAT_VERSION};
use crate::state::ProgressState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error(
        "journal format version {found} is not supported (expected {expected})",
        expected = JOURNAL_FORMAT_VERSION
    )]
    UnsupportedFormat { found: u16 },

    #[error("journal record {index} carries seq {found}")]
    OutOfOrder { index: usize, found: u64 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_progress: ProgressState,
    pub final_stage_id: StageId,
    pub final_snapshot_hash: u64,
    pub elapsed_ms: u64,
    pub stages_advanced: u32,
    pub lives_lost: u32,
    pub resets: u32,
}

/// Rebuilds a session from `journal.seed` and feeds it every recorded input in order.
pub fn replay_to_end(
    config: &SessionConfig,
    catalog: &QuestionCatalog,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormat { found: journal.format_version });
    }

    let mut session = Session::new(config.clone(), catalog.clone(), journal.seed)?;
    let mut stages_advanced = 0;
    let mut lives_lost = 0;
    let mut resets = 0;

    for (index, record) in journal.inputs.iter().enumerate() {
        if record.seq != index as u64 {
            return Err(ReplayError::OutOfOrder { index, found: record.seq });
        }
        for event in session.apply_input(&record.payload) {
            match event {
                ProgressionEvent::StageAdvanced { .. } => stages_advanced += 1,
                ProgressionEvent::LifeLost { .. } => lives_lost += 1,
                ProgressionEvent::SessionReset { .. } => {
                    lives_lost += 1;
                    resets += 1;
                }
                ProgressionEvent::Ignored => {}
            }
        }
    }

    Ok(ReplayResult {
        final_progress: session.progress(),
        final_stage_id: session.stage().id(),
        final_snapshot_hash: session.snapshot_hash(),
        elapsed_ms: session.elapsed_ms(),
        stages_advanced,
        lives_lost,
        resets,
    })
}
