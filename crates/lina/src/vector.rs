use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A cartesian displacement or velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub dx: f64,
    pub dy: f64,
}

/// Polar form of a non-zero vector: angle `a` in radians, radius `r`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polar2 {
    a: f64,
    r: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn try_new(dx: f64, dy: f64) -> Result<Self, GeometryError> {
        let v = Self { dx, dy };
        if v.is_finite() {
            Ok(v)
        } else {
            Err(GeometryError::NonFinite { what: "vector" })
        }
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Euclidean norm. Zero for the zero vector.
    pub fn length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    pub fn length_sq(&self) -> f64 {
        self.dx * self.dx + self.dy * self.dy
    }

    pub fn dot(&self, other: Vec2) -> f64 {
        self.dx * other.dx + self.dy * other.dy
    }

    /// z component of the 3D cross product.
    pub fn cross(&self, other: Vec2) -> f64 {
        self.dx * other.dy - self.dy * other.dx
    }

    /// Left-hand perpendicular (rotated +90°).
    pub fn perp(&self) -> Vec2 {
        Vec2::new(-self.dy, self.dx)
    }

    /// Scale to unit length in place. No-op on the zero vector.
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            self.dx /= len;
            self.dy /= len;
        }
        self
    }

    pub fn normalized(mut self) -> Vec2 {
        self.normalize();
        self
    }

    /// Rescale to exactly `len`. Fails on the zero vector, whose direction is undefined.
    pub fn set_length(&mut self, len: f64) -> Result<&mut Self, GeometryError> {
        let cur = self.length();
        if cur == 0.0 {
            return Err(GeometryError::ZeroLength);
        }
        let f = len / cur;
        self.dx *= f;
        self.dy *= f;
        Ok(self)
    }

    pub fn scale(&mut self, f: f64) -> &mut Self {
        self.dx *= f;
        self.dy *= f;
        self
    }

    pub fn scaled(self, f: f64) -> Vec2 {
        Vec2::new(self.dx * f, self.dy * f)
    }

    /// Rotate counter-clockwise by `angle` radians about the origin.
    ///
    /// Row-vector form `v · [cos, sin; -sin, cos]`, the same convention as
    /// [`Matrix3::rotation`](crate::Matrix3::rotation).
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        let (s, c) = angle.sin_cos();
        let dx = self.dx * c - self.dy * s;
        let dy = self.dx * s + self.dy * c;
        self.dx = dx;
        self.dy = dy;
        self
    }

    pub fn rotated(mut self, angle: f64) -> Vec2 {
        self.rotate(angle);
        self
    }

    /// Angle of the vector in radians, in `(-π, π]`.
    pub fn angle(&self) -> f64 {
        self.dy.atan2(self.dx)
    }
}

impl From<Polar2> for Vec2 {
    fn from(p: Polar2) -> Self {
        let (s, c) = p.a.sin_cos();
        Vec2::new(p.r * c, p.r * s)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.dx -= rhs.dx;
        self.dy -= rhs.dy;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.dx, -self.dy)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        self.scaled(rhs)
    }
}

impl Polar2 {
    /// Angle is undefined for a zero radius, so it is rejected.
    pub fn new(a: f64, r: f64) -> Result<Self, GeometryError> {
        if !a.is_finite() || !r.is_finite() {
            return Err(GeometryError::NonFinite { what: "polar" });
        }
        if r == 0.0 {
            return Err(GeometryError::ZeroRadius);
        }
        Ok(Self { a, r })
    }

    pub fn angle(&self) -> f64 {
        self.a
    }

    pub fn radius(&self) -> f64 {
        self.r
    }
}

impl TryFrom<Vec2> for Polar2 {
    type Error = GeometryError;

    fn try_from(v: Vec2) -> Result<Self, Self::Error> {
        Polar2::new(v.angle(), v.length())
    }
}
