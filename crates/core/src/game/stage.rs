use std::mem;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tracing::debug;

use crate::content::{Question, QuestionCatalog};
use crate::mapgen::{Room, StageGenerator};
use crate::random::RandomSource;
use crate::state::Grid;
use crate::types::{Cell, Direction, EnemyId, PadId};

use super::motion::Mover;

/// Session-unique stage identity; every regeneration gets a fresh one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StageId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerPad {
    pub cell: Cell,
    pub option_index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub mover: Mover,
    /// Direction of the last committed move.
    pub facing: Option<Direction>,
}

/// Pad and enemy storage carried from stage to stage. Clearing invalidates every key,
/// so ids handed out for a replaced stage never resolve in its successor.
#[derive(Clone, Debug, Default)]
pub struct StageSlots {
    pads: SlotMap<PadId, AnswerPad>,
    enemies: SlotMap<EnemyId, Enemy>,
}

/// Everything the rendering collaborator needs to draw one stage.
#[derive(Clone, Debug)]
pub struct Stage {
    pub(crate) id: StageId,
    pub(crate) number: u32,
    pub(crate) grid: Grid,
    pub(crate) rooms: Vec<Room>,
    pub(crate) question_index: usize,
    pub(crate) question: Question,
    pub(crate) pads: SlotMap<PadId, AnswerPad>,
    pub(crate) enemies: SlotMap<EnemyId, Enemy>,
    pub(crate) player_start: Cell,
}

impl Stage {
    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Catalog position of the active question.
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn pads(&self) -> impl Iterator<Item = (PadId, &AnswerPad)> + '_ {
        self.pads.iter()
    }

    pub fn pad(&self, id: PadId) -> Option<&AnswerPad> {
        self.pads.get(id)
    }

    pub fn pad_at(&self, cell: Cell) -> Option<PadId> {
        self.pads.iter().find(|(_, pad)| pad.cell == cell).map(|(id, _)| id)
    }

    /// Label shown next to a pad.
    pub fn pad_label(&self, id: PadId) -> Option<&str> {
        let pad = self.pads.get(id)?;
        self.question.options.get(pad.option_index).map(String::as_str)
    }

    pub fn enemies(&self) -> impl Iterator<Item = (EnemyId, &Enemy)> + '_ {
        self.enemies.iter()
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(id)
    }

    pub fn player_start(&self) -> Cell {
        self.player_start
    }

    /// Hands pad and enemy storage over to the next stage, leaving this one empty.
    pub fn take_slots(&mut self) -> StageSlots {
        StageSlots { pads: mem::take(&mut self.pads), enemies: mem::take(&mut self.enemies) }
    }
}

/// Picks a question, generates a layout for its displayed options, and binds pad `i`
/// to option `i`.
pub fn new_stage<R: RandomSource>(
    id: StageId,
    number: u32,
    generator: &StageGenerator,
    catalog: &QuestionCatalog,
    slots: StageSlots,
    rng: &mut R,
) -> Stage {
    let (question_index, question) = catalog.pick(rng);
    let layout = generator.generate(question.displayed_option_count(), rng);

    let StageSlots { mut pads, mut enemies } = slots;
    pads.clear();
    enemies.clear();
    for (option_index, &cell) in layout.pad_cells.iter().enumerate() {
        pads.insert(AnswerPad { cell, option_index });
    }
    for &cell in &layout.enemy_cells {
        enemies.insert(Enemy { mover: Mover::at(cell), facing: None });
    }

    debug!(
        stage_id = id.0,
        number,
        question_index,
        pads = pads.len(),
        enemies = enemies.len(),
        "stage ready"
    );
    Stage {
        id,
        number,
        grid: layout.grid,
        rooms: layout.rooms,
        question_index,
        question: question.clone(),
        pads,
        enemies,
        player_start: layout.start,
    }
}
