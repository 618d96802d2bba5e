use crate::api::error::EngineError;
use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::{events_as_floats, GameEvent, SoundEvent};
use crate::core::time::FixedTimestep;
use crate::input::queue::{InputEvent, InputQueue};

/// Generic game runner that wires up the engine loop without a renderer.
///
/// Each fixed step runs `Game::update` and then `EngineContext::step_motion`.
/// Queued input is delivered to exactly one update.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    steps: u64,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Result<Self, EngineError> {
        let config = game.config();
        let ctx = EngineContext::from_config(&config)?;
        Ok(Self {
            game,
            ctx,
            input: InputQueue::new(),
            timestep: FixedTimestep::from_config(&config),
            config,
            initialized: false,
            steps: 0,
        })
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        log::debug!("game initialized with {} entities", self.ctx.scene.len());
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame of `frame_dt` seconds. Returns the number of fixed steps run.
    pub fn tick(&mut self, frame_dt: f64) -> u32 {
        if !self.initialized {
            return 0;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            self.input.drain();
            self.ctx.step_motion();
        }
        self.steps += u64::from(steps);
        steps
    }

    /// Run `frames` frames of exactly one fixed step each.
    pub fn run_frames(&mut self, frames: u32) -> u32 {
        let dt = self.timestep.dt();
        (0..frames).map(|_| self.tick(dt)).sum()
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Frame time discarded because a frame asked for too many steps.
    pub fn dropped_time(&self) -> f64 {
        self.timestep.dropped()
    }

    /// Fixed steps run since construction.
    pub fn total_steps(&self) -> u64 {
        self.steps
    }

    /// Sound events of the last frame.
    pub fn sound_events(&self) -> &[SoundEvent] {
        &self.ctx.sounds
    }

    /// Game events of the last frame.
    pub fn game_events(&self) -> &[GameEvent] {
        &self.ctx.events
    }

    /// Game events of the last frame as a flat float array.
    pub fn game_events_floats(&self) -> &[f32] {
        events_as_floats(&self.ctx.events)
    }

    pub fn world_width(&self) -> f64 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f64 {
        self.config.world_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::entity::Entity;
    use lina::{Point2, Vec2};

    /// Launches its ball on a key press and reports every update.
    struct Launcher {
        ball: Option<EntityId>,
        updates: u32,
        launches: u32,
    }

    impl Game for Launcher {
        fn config(&self) -> GameConfig {
            GameConfig {
                fixed_dt: 0.5,
                ..GameConfig::default()
            }
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.spawn(Entity::new(id).with_circle(1.0));
            self.ball = Some(id);
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            if let (true, Some(ball)) = (input.key_pressed(32), self.ball) {
                ctx.set_velocity(ball, Vec2::new(2.0, 0.0));
                ctx.emit_sound(SoundEvent(1));
                ctx.emit_event(GameEvent::new(1.0, 2.0, 0.0, 0.0));
                self.launches += 1;
            }
        }
    }

    fn runner() -> GameRunner<Launcher> {
        let mut runner = GameRunner::new(Launcher {
            ball: None,
            updates: 0,
            launches: 0,
        })
        .unwrap();
        runner.init();
        runner
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Launcher {
            ball: None,
            updates: 0,
            launches: 0,
        })
        .unwrap();
        assert_eq!(runner.tick(1.0), 0);
        assert_eq!(runner.game().updates, 0);
    }

    #[test]
    fn input_reaches_one_update() {
        let mut runner = runner();
        runner.push_input(InputEvent::Key { code: 32, pressed: true });
        assert_eq!(runner.tick(1.0), 2);
        assert_eq!(runner.game().updates, 2);
        assert_eq!(runner.game().launches, 1);
        assert_eq!(runner.sound_events(), &[SoundEvent(1)]);
        assert_eq!(runner.game_events_floats(), &[1.0, 2.0, 0.0, 0.0]);

        // Launched in the first step, moved by both.
        let ball = runner.game().ball.unwrap();
        let pos = runner.ctx().scene.get(ball).unwrap().pos();
        assert_eq!(pos, Point2::new(2.0, 0.0));
    }

    #[test]
    fn frame_data_is_cleared_each_tick() {
        let mut runner = runner();
        runner.push_input(InputEvent::Key { code: 32, pressed: true });
        runner.tick(0.5);
        assert_eq!(runner.sound_events().len(), 1);
        runner.tick(0.5);
        assert!(runner.sound_events().is_empty());
        assert!(runner.game_events().is_empty());
    }

    #[test]
    fn stalled_frame_runs_capped_steps() {
        let mut runner = runner();
        assert_eq!(runner.tick(100.0), 10);
        assert!((runner.dropped_time() - 95.0).abs() < 1e-9);
        assert_eq!(runner.tick(0.5), 1);
    }

    #[test]
    fn run_frames_counts_steps() {
        let mut runner = runner();
        assert_eq!(runner.run_frames(4), 4);
        assert_eq!(runner.total_steps(), 4);
    }
}
