use crate::api::types::EntityId;
use lina::{GeometryError, Matrix3, Point2, Polygon2, Vec2};

/// Kinetic state shared by every movable object.
///
/// Velocity and spin are per second.
#[derive(Debug, Clone, PartialEq)]
pub struct Kinetic {
    pub pos: Point2,
    pub vel: Vec2,
    /// Rotation in radians.
    pub orientation: f64,
    /// Angular velocity in radians per second.
    pub spin: f64,
    /// Uniform scale applied to the bounding shape.
    pub scale: f64,
    /// Seconds left before the entity expires; `None` lives forever.
    pub ttl: Option<f64>,
}

impl Kinetic {
    /// Validated constructor: position and velocity must be finite.
    pub fn new(pos: Point2, vel: Vec2) -> Result<Self, GeometryError> {
        check_motion(pos, vel)?;
        Ok(Self {
            pos,
            vel,
            ..Self::default()
        })
    }

    /// Advance position by a full `dt`.
    pub fn advance(&mut self, dt: f64) {
        self.pos.translate_by(self.vel * dt);
    }

    /// Advance rotation and time-to-live by `dt`.
    pub fn age(&mut self, dt: f64) {
        self.orientation += self.spin * dt;
        if let Some(ttl) = self.ttl.as_mut() {
            *ttl -= dt;
        }
    }

    pub fn expired(&self) -> bool {
        self.ttl.is_some_and(|t| t <= 0.0)
    }

    /// Move and redirect in place, keeping orientation, spin, scale and TTL.
    pub fn set_motion(&mut self, pos: Point2, vel: Vec2) -> Result<(), GeometryError> {
        check_motion(pos, vel)?;
        self.pos = pos;
        self.vel = vel;
        Ok(())
    }

    /// Local → world: scale, then rotate, then move to `pos`.
    pub fn local_to_world(&self) -> Matrix3 {
        let mut m = Matrix3::identity();
        m.scale(self.scale, self.scale)
            .rotate(self.orientation)
            .translate(self.pos.x, self.pos.y);
        m
    }
}

fn check_motion(pos: Point2, vel: Vec2) -> Result<(), GeometryError> {
    if !pos.is_finite() {
        return Err(GeometryError::NonFinite { what: "entity position" });
    }
    if !vel.is_finite() {
        return Err(GeometryError::NonFinite { what: "entity velocity" });
    }
    Ok(())
}

impl Default for Kinetic {
    fn default() -> Self {
        Self {
            pos: Point2::ORIGIN,
            vel: Vec2::ZERO,
            orientation: 0.0,
            spin: 0.0,
            scale: 1.0,
            ttl: None,
        }
    }
}

/// Collision geometry in local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundingShape {
    /// A moving circle centered on the entity position.
    Circle { radius: f64 },
    /// A static outline. Counter-clockwise keeps circles inside,
    /// clockwise keeps them out.
    Polygon(Polygon2),
}

/// Bounding shape placed in the world.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldShape {
    Circle { center: Point2, radius: f64 },
    Polygon(Polygon2),
}

/// Fat entity: one struct with optional collision geometry.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    kind: String,
    /// Inactive entities are neither moved nor collided.
    pub active: bool,
    pub kinetic: Kinetic,
    pub shape: Option<BoundingShape>,
    /// Relative mass for circle–circle impacts.
    pub mass: f64,
}

impl Entity {
    /// Create a new entity with the given ID at rest at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            kind: String::new(),
            active: true,
            kinetic: Kinetic::default(),
            shape: None,
            mass: 1.0,
        }
    }

    /// Type name used by the scene's kind index. Fixed once spawned.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn pos(&self) -> Point2 {
        self.kinetic.pos
    }

    pub fn vel(&self) -> Vec2 {
        self.kinetic.vel
    }

    // -- Builder pattern --

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Position and velocity in one validated step.
    pub fn with_motion(mut self, pos: Point2, vel: Vec2) -> Result<Self, GeometryError> {
        self.kinetic.set_motion(pos, vel)?;
        Ok(self)
    }

    pub fn with_shape(mut self, shape: BoundingShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_circle(self, radius: f64) -> Self {
        self.with_shape(BoundingShape::Circle { radius })
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_ttl(mut self, seconds: f64) -> Self {
        self.kinetic.ttl = Some(seconds);
        self
    }

    pub fn with_spin(mut self, spin: f64) -> Self {
        self.kinetic.spin = spin;
        self
    }

    /// Bounding shape transformed into world coordinates.
    pub fn world_shape(&self) -> Option<WorldShape> {
        match self.shape.as_ref()? {
            BoundingShape::Circle { radius } => Some(WorldShape::Circle {
                center: self.kinetic.pos,
                radius: radius * self.kinetic.scale.abs(),
            }),
            BoundingShape::Polygon(poly) => {
                Some(WorldShape::Polygon(poly.transformed(&self.kinetic.local_to_world())))
            }
        }
    }
}
