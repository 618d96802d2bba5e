//! Swept (continuous) collision detection and response.
//!
//! Every test here is a pure function of its inputs. Velocities are
//! displacements per simulation step, so a time of impact `t` is a fraction
//! of the step. Contacts carry corrected values; inputs are never mutated.
//!
//! Accepted contact times lie in `[-1, 1]`. A negative `t` means the shapes
//! already overlap at the start of the step (numerical drift from a previous
//! correction) and are still closing; the reported centers are backed up to
//! the touching position.

mod circles;
mod wall;

pub use circles::{intersect_moving_circles, CircleContact};
pub use wall::{ContactFeature, PolygonContact};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::point::Point2;
use crate::vector::Vec2;

/// Solver tolerance shared by the swept tests.
///
/// Relative speeds at or below `epsilon` count as no motion, and contact
/// times closer than `epsilon` count as simultaneous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    epsilon: f64,
}

impl Tolerance {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon: epsilon.abs().max(f64::EPSILON),
        }
    }

    /// `10^-digits`; `from_digits(5)` is `1e-5`.
    pub fn from_digits(digits: u32) -> Self {
        Self::new(10f64.powi(-(digits.min(15) as i32)))
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::from_digits(9)
    }
}

/// One object's circle, position and per-step velocity for a single step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingCircle {
    pub center: Point2,
    pub velocity: Vec2,
    pub radius: f64,
    pub mass: f64,
}

impl MovingCircle {
    pub fn new(center: Point2, radius: f64, velocity: Vec2) -> Result<Self, GeometryError> {
        if !center.is_finite() {
            return Err(GeometryError::NonFinite { what: "circle center" });
        }
        if !velocity.is_finite() {
            return Err(GeometryError::NonFinite { what: "circle velocity" });
        }
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::NonPositive {
                what: "radius",
                value: radius,
            });
        }
        Ok(Self {
            center,
            velocity,
            radius,
            mass: 1.0,
        })
    }

    /// Shorthand for the `{x, y, vx, vy, r}` record.
    pub fn from_xyvr(x: f64, y: f64, vx: f64, vy: f64, r: f64) -> Result<Self, GeometryError> {
        Self::new(Point2::new(x, y), r, Vec2::new(vx, vy))
    }

    pub fn with_mass(mut self, mass: f64) -> Result<Self, GeometryError> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(GeometryError::NonPositive {
                what: "mass",
                value: mass,
            });
        }
        self.mass = mass;
        Ok(self)
    }

    /// Center after moving for `t` steps.
    pub fn center_at(&self, t: f64) -> Point2 {
        self.center + self.velocity * t
    }
}

/// Reflect `v` about the line with unit normal `n`: `v − 2(v·n)n`.
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - n * (2.0 * v.dot(n))
}

/// Smaller and larger real roots of `a·t² + b·t + c`, `a > 0`.
///
/// Uses the cancellation-free form so nearly tangent sweeps stay accurate.
pub(crate) fn quadratic_roots(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    if q == 0.0 {
        return Some((0.0, 0.0));
    }
    let r1 = q / a;
    let r2 = c / q;
    Some(if r1 <= r2 { (r1, r2) } else { (r2, r1) })
}
