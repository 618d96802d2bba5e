use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::vector::Vec2;

/// A cartesian position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Construct a point, rejecting NaN or infinite components.
    pub fn try_new(x: f64, y: f64) -> Result<Self, GeometryError> {
        let p = Self { x, y };
        if p.is_finite() {
            Ok(p)
        } else {
            Err(GeometryError::NonFinite { what: "point" })
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Move in place by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.x += dx;
        self.y += dy;
        self
    }

    /// Move in place by a displacement vector.
    pub fn translate_by(&mut self, v: Vec2) -> &mut Self {
        self.translate(v.dx, v.dy)
    }

    pub fn distance_to(&self, other: Point2) -> f64 {
        (other - *self).length()
    }

    pub fn distance_sq_to(&self, other: Point2) -> f64 {
        (other - *self).length_sq()
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: Point2, t: f64) -> Point2 {
        Point2::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    /// Displacement from the origin to this point.
    pub fn to_vec(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Sub for Point2 {
    type Output = Vec2;

    fn sub(self, rhs: Point2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vec2> for Point2 {
    type Output = Point2;

    fn add(self, rhs: Vec2) -> Point2 {
        Point2::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub<Vec2> for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Vec2) -> Point2 {
        Point2::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Point2::new(x, y)
    }
}
