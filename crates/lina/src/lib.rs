//! 2D math for arcade games: points, vectors, affine matrices, polygons,
//! and swept circle collision on top of them.
//!
//! All values are `f64`. The collision functions are pure: they read their
//! inputs and return corrected positions and velocities without mutating
//! anything, so a simulation can evaluate many pairs against one snapshot.

pub mod collision;
pub mod error;
pub mod matrix;
pub mod point;
pub mod polygon;
pub mod transform;
pub mod vector;

pub use collision::{
    intersect_moving_circles, reflect, CircleContact, ContactFeature, MovingCircle,
    PolygonContact, Tolerance,
};
pub use error::{CollisionError, GeometryError};
pub use matrix::Matrix3;
pub use point::Point2;
pub use polygon::{BoundingBox, BoundingCircle, Edge, Polygon2};
pub use transform::BiTransform;
pub use vector::{Polar2, Vec2};

impl From<Vec2> for glam::DVec2 {
    fn from(v: Vec2) -> Self {
        glam::DVec2::new(v.dx, v.dy)
    }
}

impl From<glam::DVec2> for Vec2 {
    fn from(v: glam::DVec2) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<Point2> for glam::DVec2 {
    fn from(p: Point2) -> Self {
        glam::DVec2::new(p.x, p.y)
    }
}

impl From<glam::DVec2> for Point2 {
    fn from(p: glam::DVec2) -> Self {
        Point2::new(p.x, p.y)
    }
}

/// Narrowing conversion for `f32` renderers.
impl From<Point2> for glam::Vec2 {
    fn from(p: Point2) -> Self {
        glam::Vec2::new(p.x as f32, p.y as f32)
    }
}
