use crate::error::GeometryError;
use crate::matrix::Matrix3;
use crate::point::Point2;
use crate::vector::Vec2;

/// A forward transform paired with its exact inverse.
///
/// Typical use is world ↔ canvas mapping: forward for drawing, inverse for
/// turning pointer coordinates back into world positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiTransform {
    forward: Matrix3,
    inverse: Matrix3,
}

impl BiTransform {
    pub fn new(forward: Matrix3) -> Result<Self, GeometryError> {
        let inverse = forward.inverse()?;
        Ok(Self { forward, inverse })
    }

    pub fn identity() -> Self {
        Self {
            forward: Matrix3::IDENTITY,
            inverse: Matrix3::IDENTITY,
        }
    }

    /// Map the rectangle `(0, 0)..(world_w, world_h)` onto `(0, 0)..(canvas_w, canvas_h)`,
    /// flipping y so world "up" is canvas "up".
    pub fn viewport(
        world_w: f64,
        world_h: f64,
        canvas_w: f64,
        canvas_h: f64,
    ) -> Result<Self, GeometryError> {
        let mut m = Matrix3::identity();
        m.scale(canvas_w / world_w, -canvas_h / world_h)
            .translate(0.0, canvas_h);
        Self::new(m)
    }

    pub fn forward(&self) -> &Matrix3 {
        &self.forward
    }

    pub fn inverse(&self) -> &Matrix3 {
        &self.inverse
    }

    pub fn transform_point(&self, p: Point2) -> Point2 {
        self.forward.transform_point(p.x, p.y)
    }

    pub fn inverse_point(&self, p: Point2) -> Point2 {
        self.inverse.transform_point(p.x, p.y)
    }

    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        self.forward.transform_vector(v)
    }

    pub fn inverse_vector(&self, v: Vec2) -> Vec2 {
        self.inverse.transform_vector(v)
    }

    /// The same pair with directions swapped.
    pub fn flipped(&self) -> Self {
        Self {
            forward: self.inverse,
            inverse: self.forward,
        }
    }
}

impl Default for BiTransform {
    fn default() -> Self {
        Self::identity()
    }
}
