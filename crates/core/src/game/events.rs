use crate::types::{Cell, EnemyId, PadId};

use super::stage::StageId;

/// Result of a directional input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub accepted: bool,
    pub new_cell: Option<Cell>,
}

impl StepOutcome {
    pub(crate) fn rejected() -> Self {
        Self { accepted: false, new_cell: None }
    }

    pub(crate) fn moving_to(cell: Cell) -> Self {
        Self { accepted: true, new_cell: Some(cell) }
    }
}

/// Collision report from the overlap detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlap {
    Pad(PadId),
    Enemy(EnemyId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeLossCause {
    WrongAnswer,
    EnemyContact,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressionEvent {
    StageAdvanced { stage: u32, score: u32, stage_id: StageId },
    LifeLost { cause: LifeLossCause, lives: u8 },
    /// Lives ran out: progress is back to its initial values on a fresh stage.
    SessionReset { cause: LifeLossCause, stage_id: StageId },
    /// The overlap named a pad or enemy that is not part of the active stage.
    Ignored,
}

impl ProgressionEvent {
    /// True when the active stage was replaced.
    pub fn replaced_stage(&self) -> bool {
        matches!(self, Self::StageAdvanced { .. } | Self::SessionReset { .. })
    }
}
