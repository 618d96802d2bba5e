//! Collision sandbox: circles of different sizes bounce around a notched
//! room and off a diamond obstacle. Masses grow with area.

use arcade::{
    BoundingShape, ContactKind, EngineContext, Entity, EntityId, Game, GameConfig, GameEvent,
    InputQueue, PointerPhase, Rng, SoundEvent,
};
use lina::{GeometryError, Point2, Vec2};

use crate::arena::{
    arena_outline, obstacle_outline, Layout, OBSTACLE_ANGLE, OBSTACLE_CENTER, OBSTACLE_HALF,
    WORLD_H, WORLD_W,
};

/// Placement attempts per circle before giving up.
const MAX_ATTEMPTS: u32 = 200;

/// Command kinds from the UI
pub mod events {
    pub const RESET: u32 = 1;
}

/// Game event kinds to the UI
pub mod game_events {
    /// a = circle contacts so far, b = wall contacts so far, c = kinetic energy
    pub const CONTACTS: f32 = 1.0;
}

pub mod sounds {
    use arcade::SoundEvent;

    pub const CLICK: SoundEvent = SoundEvent(1);
    pub const BOUNCE: SoundEvent = SoundEvent(2);
}

/// Seed and ranges for the random circles.
#[derive(Debug, Clone, PartialEq)]
pub struct SandboxConfig {
    pub seed: u64,
    pub circles: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_speed: f64,
    pub max_speed: f64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            circles: 12,
            min_radius: 8.0,
            max_radius: 20.0,
            min_speed: 100.0,
            max_speed: 300.0,
        }
    }
}

pub struct Sandbox {
    config: SandboxConfig,
    rng: Rng,
    layout: Option<Layout>,
    circles: Vec<EntityId>,
    circle_contacts: u64,
    wall_contacts: u64,
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Self {
        let rng = Rng::new(config.seed);
        Self {
            config,
            rng,
            layout: None,
            circles: Vec::new(),
            circle_contacts: 0,
            wall_contacts: 0,
        }
    }

    pub fn circles(&self) -> &[EntityId] {
        &self.circles
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn circle_contacts(&self) -> u64 {
        self.circle_contacts
    }

    pub fn wall_contacts(&self) -> u64 {
        self.wall_contacts
    }

    /// Sum of `m v² / 2` over all circles.
    pub fn kinetic_energy(&self, ctx: &EngineContext) -> f64 {
        self.circles
            .iter()
            .filter_map(|&id| ctx.scene.get(id))
            .map(|e| 0.5 * e.mass * e.vel().length_sq())
            .sum()
    }

    fn build_walls(&mut self, ctx: &mut EngineContext) -> Result<(), GeometryError> {
        let arena = Entity::new(ctx.next_id())
            .with_kind("wall")
            .with_shape(BoundingShape::Polygon(arena_outline()?));
        ctx.spawn(arena);

        let mut obstacle = Entity::new(ctx.next_id())
            .with_kind("wall")
            .with_shape(BoundingShape::Polygon(obstacle_outline(OBSTACLE_HALF)?))
            .with_motion(OBSTACLE_CENTER, Vec2::ZERO)?;
        obstacle.kinetic.orientation = OBSTACLE_ANGLE;
        ctx.spawn(obstacle);

        self.layout = Some(Layout::standard()?);
        Ok(())
    }

    fn spawn_circle(
        &mut self,
        ctx: &mut EngineContext,
        pos: Point2,
        radius: f64,
        vel: Vec2,
    ) -> Result<EntityId, GeometryError> {
        let circle = Entity::new(ctx.next_id())
            .with_kind("circle")
            .with_circle(radius)
            .with_mass(radius * radius)
            .with_motion(pos, vel)?;
        let id = ctx.spawn(circle);
        self.circles.push(id);
        Ok(id)
    }

    fn is_open_spot(&self, ctx: &EngineContext, pos: Point2, radius: f64) -> bool {
        let Some(layout) = &self.layout else {
            return false;
        };
        layout.fits(pos, radius + 1.0)
            && ctx
                .scene
                .within("circle", pos, radius + self.config.max_radius + 1.0)
                .is_empty()
    }

    fn random_velocity(&mut self) -> Vec2 {
        self.rng.heading(self.config.min_speed, self.config.max_speed)
    }

    /// Drop one circle at a random open spot.
    fn spawn_random(&mut self, ctx: &mut EngineContext) -> Option<EntityId> {
        let bounds = self.layout.as_ref()?.arena().bounding_box();
        for _ in 0..MAX_ATTEMPTS {
            let radius = self.rng.range(self.config.min_radius, self.config.max_radius);
            let pos = self.rng.point_in(&bounds);
            if !self.is_open_spot(ctx, pos, radius) {
                continue;
            }
            let vel = self.random_velocity();
            match self.spawn_circle(ctx, pos, radius, vel) {
                Ok(id) => return Some(id),
                Err(err) => log::warn!("circle at {:?} rejected: {}", pos, err),
            }
        }
        log::warn!("no open spot after {} attempts", MAX_ATTEMPTS);
        None
    }

    fn populate(&mut self, ctx: &mut EngineContext) {
        for _ in 0..self.config.circles {
            self.spawn_random(ctx);
        }
        log::info!(
            "{} circles placed, energy {:.1}",
            self.circles.len(),
            self.kinetic_energy(ctx)
        );
    }

    fn reset(&mut self, ctx: &mut EngineContext) {
        for id in self.circles.drain(..) {
            ctx.despawn(id);
        }
        self.rng = Rng::new(self.config.seed);
        self.circle_contacts = 0;
        self.wall_contacts = 0;
        self.populate(ctx);
    }

    /// Spawn a circle under the pointer if there is room.
    fn drop_at(&mut self, ctx: &mut EngineContext, pos: Point2) {
        let radius = (self.config.min_radius + self.config.max_radius) / 2.0;
        if !self.is_open_spot(ctx, pos, radius) {
            log::debug!("no room at {:?}", pos);
            return;
        }
        let vel = self.random_velocity();
        if let Err(err) = self.spawn_circle(ctx, pos, radius, vel) {
            log::warn!("circle at {:?} rejected: {}", pos, err);
        }
    }

    fn tally_contacts(&mut self, ctx: &mut EngineContext) {
        let mut queued: Vec<SoundEvent> = Vec::new();
        for contact in ctx.collisions() {
            match contact.kind {
                ContactKind::Circles => {
                    self.circle_contacts += 1;
                    queued.push(sounds::CLICK);
                }
                ContactKind::Wall(_) => {
                    self.wall_contacts += 1;
                    queued.push(sounds::BOUNCE);
                }
            }
        }
        for sound in queued {
            ctx.emit_sound(sound);
        }
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new(SandboxConfig::default())
    }
}

impl Game for Sandbox {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_W,
            world_height: WORLD_H,
            canvas_width: WORLD_W,
            canvas_height: WORLD_H,
            max_entities: 128,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if let Err(err) = self.build_walls(ctx) {
            log::error!("sandbox walls not built: {}", err);
            return;
        }
        self.populate(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if input.command(events::RESET).is_some() {
            self.reset(ctx);
            return;
        }
        for sample in input.pointer_samples(ctx.viewport()) {
            if sample.phase == PointerPhase::Down {
                self.drop_at(ctx, sample.world);
            }
        }

        self.tally_contacts(ctx);

        ctx.emit_event(GameEvent::new(
            game_events::CONTACTS,
            self.circle_contacts as f32,
            self.wall_contacts as f32,
            self.kinetic_energy(ctx) as f32,
        ));
    }
}
