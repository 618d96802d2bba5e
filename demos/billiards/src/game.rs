//! Billiards table with swept ball and cushion collisions.
//! Pocketed balls leave the table; the cue ball comes back once play stops.

use arcade::{
    BoundingShape, ContactKind, EngineContext, Entity, EntityId, Game, GameConfig, GameEvent,
    InputQueue, PointerPhase, SoundEvent,
};
use lina::{Point2, Polygon2, Vec2};

use crate::balls::{rack_positions, BALLS};

// Table dimensions
const TABLE_W: f64 = 1000.0;
const TABLE_H: f64 = 500.0;

// Margin around the table for the cue drag area
const TABLE_MARGIN: f64 = 80.0;

const WORLD_W: f64 = TABLE_W + 2.0 * TABLE_MARGIN; // 1160
const WORLD_H: f64 = TABLE_H + 2.0 * TABLE_MARGIN; // 660

const CUSHION: f64 = 35.0;

// Play area (inside the cushions), y up
const PLAY_LEFT: f64 = TABLE_MARGIN + CUSHION;
const PLAY_RIGHT: f64 = TABLE_MARGIN + TABLE_W - CUSHION;
const PLAY_BOTTOM: f64 = TABLE_MARGIN + CUSHION;
const PLAY_TOP: f64 = TABLE_MARGIN + TABLE_H - CUSHION;
const PLAY_MID_X: f64 = (PLAY_LEFT + PLAY_RIGHT) / 2.0;
const PLAY_MID_Y: f64 = (PLAY_BOTTOM + PLAY_TOP) / 2.0;

const BALL_RADIUS: f64 = 12.0;

/// A ball whose center comes this close to a pocket drops in.
const POCKET_RADIUS: f64 = 22.0;

const CUE_START: Point2 = Point2::new(TABLE_MARGIN + 250.0, PLAY_MID_Y);
const RACK_APEX: Point2 = Point2::new(TABLE_MARGIN + 700.0, PLAY_MID_Y);

// Felt friction: v *= 1 / (1 + dt * damping) each step
const FELT_DAMPING: f64 = 1.75;
const STOP_SPEED: f64 = 5.0;

const MAX_SHOT_SPEED: f64 = 3000.0;
const SHOT_SCALE: f64 = 8.0;
const MIN_SHOT_SPEED: f64 = 20.0;

/// Solver tolerance digits used for every contact on the table.
const TOLERANCE_DIGITS: u32 = 5;

/// Command kinds from the UI
pub mod events {
    pub const RESET: u32 = 1;
}

/// Game event kinds to the UI
pub mod game_events {
    /// a = balls left on the table
    pub const BALLS_REMAINING: f32 = 1.0;
    /// a = ball number, b = pocket index, c = score
    pub const POCKETED: f32 = 2.0;
    /// a = fouls so far
    pub const FOUL: f32 = 3.0;
}

/// Sound ids for the audio layer
pub mod sounds {
    use arcade::SoundEvent;

    pub const BALL_CLICK: SoundEvent = SoundEvent(1);
    pub const CUSHION: SoundEvent = SoundEvent(2);
    pub const POCKET: SoundEvent = SoundEvent(3);
}

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Aiming,
    BallsMoving,
}

/// Ball entity tracking
struct BallEntity {
    entity_id: EntityId,
    ball_number: u8,
    pocketed: bool,
}

pub struct BilliardsGame {
    state: GameState,
    aiming: bool,
    aim_current: Point2,
    cue_ball_id: Option<EntityId>,
    balls: Vec<BallEntity>,
    cushion_id: Option<EntityId>,
    score: u32,
    fouls: u32,
}

impl BilliardsGame {
    pub fn new() -> Self {
        Self {
            state: GameState::Aiming,
            aiming: false,
            aim_current: Point2::ORIGIN,
            cue_ball_id: None,
            balls: Vec::with_capacity(16),
            cushion_id: None,
            score: 0,
            fouls: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn fouls(&self) -> u32 {
        self.fouls
    }

    pub fn cue_ball(&self) -> Option<EntityId> {
        self.cue_ball_id
    }

    pub fn cushion(&self) -> Option<EntityId> {
        self.cushion_id
    }

    /// Ids of balls still on the table, cue ball included.
    pub fn balls_on_table(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.balls.iter().filter(|b| !b.pocketed).map(|b| b.entity_id)
    }

    /// Count remaining balls (excluding cue ball)
    pub fn balls_remaining(&self) -> u32 {
        self.balls
            .iter()
            .filter(|b| !b.pocketed && b.ball_number > 0)
            .count() as u32
    }

    /// Pocket centers: four corners, then the two side pockets.
    pub fn pocket_positions() -> [Point2; 6] {
        [
            Point2::new(PLAY_LEFT, PLAY_BOTTOM),
            Point2::new(PLAY_RIGHT, PLAY_BOTTOM),
            Point2::new(PLAY_LEFT, PLAY_TOP),
            Point2::new(PLAY_RIGHT, PLAY_TOP),
            Point2::new(PLAY_MID_X, PLAY_BOTTOM),
            Point2::new(PLAY_MID_X, PLAY_TOP),
        ]
    }

    /// Counter-clockwise cushion outline in its own frame, centered on the table.
    fn cushion_outline() -> Option<Polygon2> {
        let hw = (PLAY_RIGHT - PLAY_LEFT) / 2.0;
        let hh = (PLAY_TOP - PLAY_BOTTOM) / 2.0;
        Polygon2::rect(Point2::new(-hw, -hh), Point2::new(hw, hh)).ok()
    }

    fn build_cushion(&mut self, ctx: &mut EngineContext) {
        let Some(outline) = Self::cushion_outline() else {
            log::error!("cushion outline is degenerate");
            return;
        };
        let id = ctx.next_id();
        let cushion = Entity::new(id)
            .with_kind("cushion")
            .with_shape(BoundingShape::Polygon(outline))
            .with_motion(Point2::new(PLAY_MID_X, PLAY_MID_Y), Vec2::ZERO);
        match cushion {
            Ok(entity) => {
                ctx.spawn(entity);
                self.cushion_id = Some(id);
            }
            Err(err) => log::error!("cushion not built: {}", err),
        }
    }

    fn spawn_ball(ctx: &mut EngineContext, kind: &str, pos: Point2) -> Option<EntityId> {
        let id = ctx.next_id();
        let ball = Entity::new(id)
            .with_kind(kind)
            .with_circle(BALL_RADIUS)
            .with_motion(pos, Vec2::ZERO);
        match ball {
            Ok(entity) => Some(ctx.spawn(entity)),
            Err(err) => {
                log::error!("ball not spawned at {:?}: {}", pos, err);
                None
            }
        }
    }

    /// Place the cue ball on its spot, or the nearest free spot left of it.
    fn spawn_cue_ball(&mut self, ctx: &mut EngineContext) {
        let step = 2.0 * BALL_RADIUS + 1.0;
        let mut pos = CUE_START;
        while pos.x - BALL_RADIUS > PLAY_LEFT && !Self::spot_is_free(ctx, pos) {
            pos.x -= step;
        }
        let Some(id) = Self::spawn_ball(ctx, "cue", pos) else {
            return;
        };
        self.cue_ball_id = Some(id);

        if let Some(cue_entry) = self.balls.iter_mut().find(|b| b.ball_number == 0) {
            cue_entry.entity_id = id;
            cue_entry.pocketed = false;
            log::info!("Cue ball respawned at {:?}", pos);
        } else {
            self.balls.push(BallEntity {
                entity_id: id,
                ball_number: 0,
                pocketed: false,
            });
        }
    }

    fn spot_is_free(ctx: &EngineContext, pos: Point2) -> bool {
        ctx.scene.within("ball", pos, 2.0 * BALL_RADIUS + 1.0).is_empty()
    }

    /// Spawn racked balls (1-15)
    fn spawn_rack(&mut self, ctx: &mut EngineContext) {
        let positions = rack_positions(RACK_APEX, BALL_RADIUS);
        for (i, &pos) in positions.iter().enumerate() {
            let ball_def = &BALLS[i + 1];
            if let Some(id) = Self::spawn_ball(ctx, "ball", pos) {
                self.balls.push(BallEntity {
                    entity_id: id,
                    ball_number: ball_def.number,
                    pocketed: false,
                });
            }
        }
    }

    /// Reset the game
    fn reset(&mut self, ctx: &mut EngineContext) {
        for ball in &self.balls {
            ctx.despawn(ball.entity_id);
        }
        self.balls.clear();
        self.cue_ball_id = None;
        self.state = GameState::Aiming;
        self.aiming = false;
        self.score = 0;
        self.fouls = 0;

        self.spawn_cue_ball(ctx);
        self.spawn_rack(ctx);
        log::info!("table reset");
    }

    /// Check if all balls have stopped moving
    fn all_balls_stopped(&self, ctx: &EngineContext) -> bool {
        self.balls_on_table().all(|id| ctx.velocity(id).is_zero())
    }

    /// Felt friction, with a hard stop at low speed.
    fn apply_felt(&self, ctx: &mut EngineContext) {
        let factor = 1.0 / (1.0 + ctx.dt() * FELT_DAMPING);
        for id in self.balls_on_table() {
            let vel = ctx.velocity(id) * factor;
            let vel = if vel.length() < STOP_SPEED { Vec2::ZERO } else { vel };
            ctx.set_velocity(id, vel);
        }
    }

    fn play_contact_sounds(ctx: &mut EngineContext) {
        let sounds: Vec<SoundEvent> = ctx
            .collisions()
            .iter()
            .map(|c| match c.kind {
                ContactKind::Circles => sounds::BALL_CLICK,
                ContactKind::Wall(_) => sounds::CUSHION,
            })
            .collect();
        for sound in sounds {
            ctx.emit_sound(sound);
        }
    }

    fn check_pockets(&mut self, ctx: &mut EngineContext) {
        let pockets = Self::pocket_positions();
        for ball in self.balls.iter_mut().filter(|b| !b.pocketed) {
            let Some(pos) = ctx.scene.get(ball.entity_id).map(|e| e.pos()) else {
                continue;
            };
            let Some(pocket_idx) = pockets
                .iter()
                .position(|p| p.distance_to(pos) < POCKET_RADIUS)
            else {
                continue;
            };

            ctx.despawn(ball.entity_id);
            ball.pocketed = true;
            ctx.emit_sound(sounds::POCKET);

            if ball.ball_number == 0 {
                log::info!("Cue ball pocketed - foul");
                self.cue_ball_id = None;
                self.fouls += 1;
                ctx.emit_event(GameEvent::new(game_events::FOUL, self.fouls as f32, 0.0, 0.0));
            } else {
                self.score += 1;
                log::info!("Ball {} pocketed into pocket {}", ball.ball_number, pocket_idx);
                ctx.emit_event(GameEvent::new(
                    game_events::POCKETED,
                    ball.ball_number as f32,
                    pocket_idx as f32,
                    self.score as f32,
                ));
            }
        }
    }

    /// Shoot away from the drag point; speed grows with drag distance.
    fn shoot(&mut self, ctx: &mut EngineContext) {
        let Some(cue_id) = self.cue_ball_id else {
            return;
        };
        let Some(cue_pos) = ctx.scene.get(cue_id).map(|e| e.pos()) else {
            return;
        };
        let pull = cue_pos - self.aim_current;
        let speed = (pull.length() * SHOT_SCALE).min(MAX_SHOT_SPEED);
        if speed > MIN_SHOT_SPEED {
            let velocity = pull.normalized() * speed;
            log::info!("Shot: {:?}", velocity);
            ctx.set_velocity(cue_id, velocity);
            self.state = GameState::BallsMoving;
        }
    }
}

impl Default for BilliardsGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for BilliardsGame {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig {
            fixed_dt: 1.0 / 60.0,
            world_width: WORLD_W,
            world_height: WORLD_H,
            canvas_width: WORLD_W,
            canvas_height: WORLD_H,
            max_entities: 64,
            ..GameConfig::default()
        };
        config.collision.tolerance_digits = TOLERANCE_DIGITS;
        config
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.build_cushion(ctx);
        self.spawn_cue_ball(ctx);
        self.spawn_rack(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if input.command(events::RESET).is_some() {
            self.reset(ctx);
            return;
        }
        for sample in input.pointer_samples(ctx.viewport()) {
            match sample.phase {
                PointerPhase::Down if self.state == GameState::Aiming => {
                    self.aiming = true;
                    self.aim_current = sample.world;
                }
                PointerPhase::Move if self.aiming => self.aim_current = sample.world,
                PointerPhase::Up if self.aiming => {
                    self.aiming = false;
                    self.aim_current = sample.world;
                    self.shoot(ctx);
                }
                _ => {}
            }
        }

        Self::play_contact_sounds(ctx);
        self.check_pockets(ctx);
        self.apply_felt(ctx);

        if self.state == GameState::BallsMoving && self.all_balls_stopped(ctx) {
            self.state = GameState::Aiming;
            log::info!("Balls stopped, score {}", self.score);
        }
        if self.cue_ball_id.is_none() && self.state == GameState::Aiming {
            self.spawn_cue_ball(ctx);
        }

        ctx.emit_event(GameEvent::new(
            game_events::BALLS_REMAINING,
            self.balls_remaining() as f32,
            0.0,
            0.0,
        ));
    }
}
