//! Play session: the object the rendering collaborator drives.
//!
//! A [`Session`] owns the active stage, the player's motion state and the seeded random
//! source. Input arrives as directional steps, elapsed-time ticks and overlap reports;
//! every stage change goes through the progression rules in `progression`.

pub mod diagram;

mod events;
mod hash;
mod motion;
mod progression;
mod stage;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing::info;

use crate::config::SessionConfig;
use crate::content::QuestionCatalog;
use crate::error::ConfigError;
use crate::journal::InputPayload;
use crate::mapgen::StageGenerator;
use crate::pixel::{PixelPos, pixel_to_grid};
use crate::state::ProgressState;
use crate::types::{Cell, Direction};

pub use diagram::stage_diagram;
pub use events::{LifeLossCause, Overlap, ProgressionEvent, StepOutcome};
pub use motion::{Motion, Mover, can_step, choose_wander_direction, jittered_duration};
pub use progression::POINTS_PER_CORRECT_ANSWER;
pub use stage::{AnswerPad, Enemy, Stage, StageId, StageSlots, new_stage};

pub struct Session {
    seed: u64,
    generator: StageGenerator,
    catalog: QuestionCatalog,
    rng: ChaCha8Rng,
    progress: ProgressState,
    stage: Stage,
    player: Mover,
    next_stage_id: u64,
    elapsed_ms: u64,
    inputs_applied: u64,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        catalog: QuestionCatalog,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let generator = StageGenerator::new(config)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let progress = ProgressState::default();
        let stage = new_stage(
            StageId(0),
            progress.stage,
            &generator,
            &catalog,
            StageSlots::default(),
            &mut rng,
        );
        let player = Mover::at(stage.player_start());
        info!(seed, "session started");

        Ok(Self {
            seed,
            generator,
            catalog,
            rng,
            progress,
            stage,
            player,
            next_stage_id: 1,
            elapsed_ms: 0,
            inputs_applied: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SessionConfig {
        self.generator.config()
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn player(&self) -> &Mover {
        &self.player
    }

    /// Logical player cell; it changes when a move lands, not when it starts.
    pub fn player_cell(&self) -> Cell {
        self.player.cell()
    }

    pub fn player_pixel(&self) -> PixelPos {
        self.player.pixel_position(self.config().tile_size)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Inputs fed through [`Session::apply_input`] so far.
    pub fn inputs_applied(&self) -> u64 {
        self.inputs_applied
    }

    /// Directional input edge. Ignored while a move is in flight; there is no queue.
    pub fn on_player_step(&mut self, direction: Direction) -> StepOutcome {
        let duration_ms = self.config().player_step_ms;
        match self.player.begin_step(&self.stage.grid, direction, duration_ms) {
            Some(target) => StepOutcome::moving_to(target),
            None => StepOutcome::rejected(),
        }
    }

    /// One update pass: player motion, enemy motion in spawn order, then pad overlap
    /// and enemy contact. A pad event that replaces the stage ends the pass.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<ProgressionEvent> {
        self.elapsed_ms += u64::from(dt_ms);
        self.player.advance(dt_ms);
        self.move_enemies(dt_ms);
        self.detect_overlaps()
    }

    pub fn apply_input(&mut self, payload: &InputPayload) -> Vec<ProgressionEvent> {
        self.inputs_applied += 1;
        match *payload {
            InputPayload::Step { direction } => {
                self.on_player_step(direction);
                Vec::new()
            }
            InputPayload::Tick { dt_ms } => self.tick(dt_ms),
        }
    }

    fn move_enemies(&mut self, dt_ms: u32) {
        let settings = &self.generator.config().enemies;
        let grid = &self.stage.grid;
        for enemy in self.stage.enemies.values_mut() {
            enemy.mover.advance(dt_ms);
            if enemy.mover.is_moving() {
                continue;
            }
            let Some(direction) =
                choose_wander_direction(grid, enemy.mover.cell(), enemy.facing, &mut self.rng)
            else {
                continue;
            };
            let duration_ms =
                jittered_duration(settings.step_ms, settings.step_jitter_ms, &mut self.rng);
            if enemy.mover.begin_step(grid, direction, duration_ms).is_some() {
                enemy.facing = Some(direction);
            }
        }
    }

    fn detect_overlaps(&mut self) -> Vec<ProgressionEvent> {
        let mut events = Vec::new();
        let tile_size = self.config().tile_size;

        let standing_on = pixel_to_grid(self.player_pixel(), tile_size);
        if let Some(pad) = self.stage.pad_at(standing_on) {
            let event = self.on_overlap(Overlap::Pad(pad));
            events.push(event);
            if event.replaced_stage() {
                return events;
            }
        }

        let player = self.player_pixel();
        let reach = self.config().enemies.contact_radius * tile_size as f32;
        let touching = self
            .stage
            .enemies()
            .find(|(_, enemy)| enemy.mover.pixel_position(tile_size).distance(player) < reach)
            .map(|(id, _)| id);
        if let Some(enemy) = touching {
            events.push(self.on_overlap(Overlap::Enemy(enemy)));
        }
        events
    }

    /// Replaces the active stage with a freshly generated one for the current progress
    /// and puts the player back on its start cell with motion cleared.
    fn install_next_stage(&mut self) {
        let id = StageId(self.next_stage_id);
        self.next_stage_id += 1;
        self.stage = new_stage(
            id,
            self.progress.stage,
            &self.generator,
            &self.catalog,
            self.stage.take_slots(),
            &mut self.rng,
        );
        self.player.reset_to(self.stage.player_start());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyConfig;
    use crate::types::START_CELL;

    fn quiet_session(seed: u64) -> Session {
        let config = SessionConfig {
            enemies: EnemyConfig { count: 0, ..EnemyConfig::default() },
            ..SessionConfig::default()
        };
        Session::new(config, QuestionCatalog::default(), seed).expect("config is valid")
    }

    fn open_direction(session: &Session) -> Direction {
        Direction::ALL
            .into_iter()
            .find(|&direction| can_step(session.stage().grid(), session.player_cell(), direction))
            .expect("the start cell always has a floor neighbor")
    }

    #[test]
    fn invalid_config_refuses_to_start() {
        let config = SessionConfig { tile_size: 0, ..SessionConfig::default() };
        let result = Session::new(config, QuestionCatalog::default(), 1);
        assert!(matches!(result, Err(ConfigError::InvalidTileSize)));
    }

    #[test]
    fn session_starts_on_stage_one_at_the_start_cell() {
        let session = quiet_session(1);
        assert_eq!(session.progress(), ProgressState::default());
        assert_eq!(session.stage().number(), 1);
        assert_eq!(session.stage().id(), StageId(0));
        assert_eq!(session.player_cell(), START_CELL);
    }

    #[test]
    fn step_lands_after_the_configured_duration() {
        let mut session = quiet_session(2);
        let direction = open_direction(&session);
        let outcome = session.on_player_step(direction);
        let target = START_CELL.step(direction);
        assert_eq!(outcome, StepOutcome { accepted: true, new_cell: Some(target) });

        assert!(session.tick(100).is_empty());
        assert_eq!(session.player_cell(), START_CELL);
        assert_eq!(session.on_player_step(direction), StepOutcome::rejected());

        session.tick(100);
        assert_eq!(session.player_cell(), target);
        assert!(!session.player().is_moving());
        assert_eq!(session.elapsed_ms(), 200);
    }

    #[test]
    fn step_into_a_wall_is_rejected() {
        let mut session = quiet_session(3);
        assert_eq!(session.on_player_step(Direction::Up), StepOutcome::rejected());
        assert_eq!(session.on_player_step(Direction::Left), StepOutcome::rejected());
        assert!(!session.player().is_moving());
    }

    #[test]
    fn enemies_roam_without_entering_walls() {
        let mut session =
            Session::new(SessionConfig::default(), QuestionCatalog::default(), 4)
                .expect("default config is valid");
        let spawns: Vec<Cell> =
            session.stage().enemies().map(|(_, enemy)| enemy.mover.cell()).collect();
        let stage_id = session.stage().id();

        for _ in 0..40 {
            session.tick(50);
            if session.stage().id() != stage_id {
                return;
            }
            for (_, enemy) in session.stage().enemies() {
                assert!(session.stage().grid().is_floor(enemy.mover.cell()));
            }
        }
        let now: Vec<Cell> =
            session.stage().enemies().map(|(_, enemy)| enemy.mover.cell()).collect();
        assert_ne!(spawns, now, "two seconds of wandering moves at least one enemy");
    }

    #[test]
    fn apply_input_routes_steps_and_ticks() {
        let mut session = quiet_session(5);
        let direction = open_direction(&session);
        assert!(session.apply_input(&InputPayload::Step { direction }).is_empty());
        session.apply_input(&InputPayload::Tick { dt_ms: 250 });
        assert_eq!(session.player_cell(), START_CELL.step(direction));
        assert_eq!(session.inputs_applied(), 2);
    }
}
