use std::collections::HashSet;

use lina::{BiTransform, Point2, Tolerance, Vec2};
use serde::{Deserialize, Serialize};

use crate::api::error::EngineError;
use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::systems::collision::{resolve_collisions, CollisionEvent};
use crate::systems::motion::integrate;

/// Configuration for the engine, provided by the game.
/// Every field has a default; JSON may name any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f64,
    /// Most fixed steps a single frame may run (default: 10).
    pub max_steps_per_frame: u32,
    /// World width in game units.
    pub world_width: f64,
    /// World height in game units.
    pub world_height: f64,
    /// Canvas width in pixels, used to map pointer input into the world.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
    /// Initial entity capacity (default: 512).
    pub max_entities: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    pub collision: CollisionConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            world_width: 800.0,
            world_height: 600.0,
            canvas_width: 800.0,
            canvas_height: 600.0,
            max_entities: 512,
            max_sounds: 32,
            max_events: 32,
            collision: CollisionConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.fixed_dt > 0.0 && self.fixed_dt.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        if self.max_steps_per_frame == 0 {
            return Err(EngineError::InvalidConfig(
                "max_steps_per_frame must be at least 1".into(),
            ));
        }
        if self.collision.tolerance_digits > 15 {
            return Err(EngineError::InvalidConfig(format!(
                "tolerance_digits must be at most 15, got {}",
                self.collision.tolerance_digits
            )));
        }
        Ok(())
    }
}

/// Collision stepping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Run the swept collision pass before integration.
    pub enabled: bool,
    /// Solver tolerance as decimal digits: 5 means `1e-5`.
    pub tolerance_digits: u32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance_digits: 9,
        }
    }
}

impl CollisionConfig {
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::from_digits(self.tolerance_digits)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. React to input and the last step's collisions,
    /// check win conditions, spawn/despawn entities.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    next_id: u32,
    dt: f64,
    max_sounds: usize,
    max_events: usize,
    collision: CollisionConfig,
    collision_events: Vec<CollisionEvent>,
    viewport: BiTransform,
}

impl EngineContext {
    /// Context with default settings and an identity viewport.
    pub fn new() -> Self {
        let config = GameConfig::default();
        Self {
            scene: Scene::with_capacity(config.max_entities),
            sounds: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            dt: config.fixed_dt,
            max_sounds: config.max_sounds,
            max_events: config.max_events,
            collision: config.collision,
            collision_events: Vec::new(),
            viewport: BiTransform::identity(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let viewport = BiTransform::viewport(
            config.world_width,
            config.world_height,
            config.canvas_width,
            config.canvas_height,
        )?;
        Ok(Self {
            scene: Scene::with_capacity(config.max_entities),
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
            dt: config.fixed_dt,
            max_sounds: config.max_sounds,
            max_events: config.max_events,
            collision: config.collision.clone(),
            viewport,
            ..Self::new()
        })
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity to the scene and return its id.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.scene.despawn(id)
    }

    /// Emit a sound event for the audio layer. Dropped past the per-frame cap.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        if self.sounds.len() >= self.max_sounds {
            log::debug!("sound {:?} dropped, frame cap {} reached", event, self.max_sounds);
            return;
        }
        self.sounds.push(event);
    }

    /// Emit a game event for the UI layer. Dropped past the per-frame cap.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::debug!("event {:?} dropped, frame cap {} reached", event, self.max_events);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    /// Set the velocity of an entity, in world units per second.
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if !vel.is_finite() {
            log::warn!("ignoring non-finite velocity for {:?}", id);
            return;
        }
        if let Some(entity) = self.scene.get_mut(id) {
            entity.kinetic.vel = vel;
        }
    }

    /// Velocity of an entity; zero when it does not exist.
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene.get(id).map(|e| e.vel()).unwrap_or(Vec2::ZERO)
    }

    /// Contacts applied by the most recent `step_motion`.
    pub fn collisions(&self) -> &[CollisionEvent] {
        &self.collision_events
    }

    /// World → canvas mapping.
    pub fn viewport(&self) -> &BiTransform {
        &self.viewport
    }

    /// Map canvas coordinates (as carried by pointer input) into the world.
    pub fn to_world(&self, x: f64, y: f64) -> Point2 {
        self.viewport.inverse_point(Point2::new(x, y))
    }

    pub fn to_canvas(&self, p: Point2) -> Point2 {
        self.viewport.transform_point(p)
    }

    /// The fixed step length in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Advance the world by one fixed step: swept collisions against the
    /// pre-step state, integration of everything not placed by a contact,
    /// then removal of expired entities.
    /// Called automatically by the game runner after `Game::update()`.
    pub fn step_motion(&mut self) {
        self.collision_events.clear();
        let placed = if self.collision.enabled {
            resolve_collisions(
                &mut self.scene,
                self.dt,
                self.collision.tolerance(),
                &mut self.collision_events,
            )
        } else {
            HashSet::new()
        };
        for id in integrate(&mut self.scene, self.dt, &placed) {
            log::trace!("{:?} expired", id);
            self.scene.despawn(id);
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::BoundingShape;
    use lina::Polygon2;

    fn boxed_context(dt: f64) -> EngineContext {
        let config = GameConfig {
            fixed_dt: dt,
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::from_config(&config).unwrap();
        let id = ctx.next_id();
        let square = Polygon2::rect(Point2::new(-10.0, -10.0), Point2::new(10.0, 10.0)).unwrap();
        ctx.spawn(
            Entity::new(id)
                .with_kind("wall")
                .with_shape(BoundingShape::Polygon(square)),
        );
        ctx
    }

    #[test]
    fn config_from_partial_json() {
        let config =
            GameConfig::from_json(r#"{ "fixed_dt": 0.01, "collision": { "tolerance_digits": 5 } }"#)
                .unwrap();
        assert_eq!(config.fixed_dt, 0.01);
        assert_eq!(config.world_width, 800.0);
        assert!(config.collision.enabled);
        assert_eq!(config.collision.tolerance(), Tolerance::from_digits(5));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            fixed_dt: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            EngineContext::from_config(&config),
            Err(EngineError::InvalidConfig(_))
        ));
        let config = GameConfig {
            world_width: 0.0,
            ..GameConfig::default()
        };
        assert!(EngineContext::from_config(&config).is_err());
        let config = GameConfig {
            max_steps_per_frame: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn pointer_maps_into_world() {
        let config = GameConfig {
            canvas_width: 400.0,
            canvas_height: 300.0,
            ..GameConfig::default()
        };
        let ctx = EngineContext::from_config(&config).unwrap();
        let top_left = ctx.to_world(0.0, 0.0);
        assert!(top_left.distance_to(Point2::new(0.0, 600.0)) < 1e-9);
        let middle = ctx.to_world(200.0, 150.0);
        assert!(middle.distance_to(Point2::new(400.0, 300.0)) < 1e-9);
        assert!(ctx.to_canvas(middle).distance_to(Point2::new(200.0, 150.0)) < 1e-9);
    }

    #[test]
    fn step_motion_bounces_and_integrates() {
        let mut ctx = boxed_context(1.0);
        let ball = ctx.next_id();
        ctx.spawn(
            Entity::new(ball)
                .with_circle(1.0)
                .with_motion(Point2::new(0.0, -8.5), Vec2::new(0.0, -1.0))
                .unwrap(),
        );
        ctx.step_motion();
        assert_eq!(ctx.collisions().len(), 1);
        assert_eq!(ctx.velocity(ball), Vec2::new(0.0, 1.0));

        ctx.step_motion();
        assert!(ctx.collisions().is_empty());
        let y = ctx.scene.get(ball).unwrap().pos().y;
        assert!((y + 8.0).abs() < 1e-12, "y = {y}");
    }

    #[test]
    fn disabled_collision_passes_through() {
        let mut config = GameConfig {
            fixed_dt: 1.0,
            ..GameConfig::default()
        };
        config.collision.enabled = false;
        let mut ctx = EngineContext::from_config(&config).unwrap();
        let a = ctx.spawn(
            Entity::new(EntityId(1))
                .with_circle(1.0)
                .with_motion(Point2::ORIGIN, Vec2::new(1.0, 0.0))
                .unwrap(),
        );
        ctx.spawn(
            Entity::new(EntityId(2))
                .with_circle(1.0)
                .with_motion(Point2::new(3.0, 0.0), Vec2::new(-1.0, 0.0))
                .unwrap(),
        );
        ctx.step_motion();
        assert!(ctx.collisions().is_empty());
        assert_eq!(ctx.scene.get(a).unwrap().pos(), Point2::new(1.0, 0.0));
    }

    #[test]
    fn expired_entities_are_removed() {
        let mut ctx = boxed_context(0.5);
        let spark = ctx.next_id();
        ctx.spawn(Entity::new(spark).with_ttl(0.75));
        ctx.step_motion();
        assert!(ctx.scene.get(spark).is_some());
        ctx.step_motion();
        assert!(ctx.scene.get(spark).is_none());
    }

    #[test]
    fn frame_caps_drop_extra_events() {
        let config = GameConfig {
            max_sounds: 2,
            max_events: 1,
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::from_config(&config).unwrap();
        for i in 0..3 {
            ctx.emit_sound(SoundEvent(i));
            ctx.emit_event(GameEvent::new(i as f32, 0.0, 0.0, 0.0));
        }
        assert_eq!(ctx.sounds, vec![SoundEvent(0), SoundEvent(1)]);
        assert_eq!(ctx.events.len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty() && ctx.events.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
    }
}
