use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::point::Point2;
use crate::vector::Vec2;

/// Singular threshold for `|det|`, relative to the product of the row
/// lengths (the largest determinant rows of those lengths can have).
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// 3×3 homogeneous matrix for 2D affine transforms.
///
/// Stored as a flat row-major buffer and applied to row vectors:
/// `[x', y', 1] = [x, y, 1] · M`, so translation lives in the bottom row
/// (`m[6]`, `m[7]`) and the last column stays `[0, 0, 1]`.
///
/// The in-place operations (`translate`, `scale`, `rotate`) post-multiply,
/// meaning each call is applied *after* everything already accumulated.
/// Reading a chain left to right gives the order points are transformed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3 {
    m: [f64; 9],
}

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3 {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    pub const fn from_row_major(m: [f64; 9]) -> Self {
        Self { m }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, dx, dy, 1.0],
        }
    }

    pub fn scaling(fx: f64, fy: f64) -> Self {
        Self {
            m: [fx, 0.0, 0.0, 0.0, fy, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Counter-clockwise rotation by `angle` radians about the origin.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn as_slice(&self) -> &[f64; 9] {
        &self.m
    }

    /// `self · other`: apply `self`, then `other`.
    pub fn mult(&self, other: &Matrix3) -> Matrix3 {
        let a = &self.m;
        let b = &other.m;
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Matrix3 { m: out }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        *self = self.mult(&Matrix3::translation(dx, dy));
        self
    }

    pub fn scale(&mut self, fx: f64, fy: f64) -> &mut Self {
        *self = self.mult(&Matrix3::scaling(fx, fy));
        self
    }

    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        *self = self.mult(&Matrix3::rotation(angle));
        self
    }

    /// Rotate about `pivot`: move the pivot to the origin, rotate, move it back.
    pub fn rotate_about(&mut self, angle: f64, pivot: Point2) -> &mut Self {
        self.translate(-pivot.x, -pivot.y)
            .rotate(angle)
            .translate(pivot.x, pivot.y)
    }

    pub fn transform_point(&self, x: f64, y: f64) -> Point2 {
        let m = &self.m;
        Point2::new(x * m[0] + y * m[3] + m[6], x * m[1] + y * m[4] + m[7])
    }

    /// Apply the linear part only; vectors are not translated.
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        let m = &self.m;
        Vec2::new(v.dx * m[0] + v.dy * m[3], v.dx * m[1] + v.dy * m[4])
    }

    pub fn determinant(&self) -> f64 {
        let [a, b, c, d, e, f, g, h, i] = self.m;
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    /// General 3×3 inverse via the adjugate.
    pub fn inverse(&self) -> Result<Matrix3, GeometryError> {
        let [a, b, c, d, e, f, g, h, i] = self.m;

        let c00 = e * i - f * h;
        let c01 = -(d * i - f * g);
        let c02 = d * h - e * g;
        let det = a * c00 + b * c01 + c * c02;
        let bound = [[a, b, c], [d, e, f], [g, h, i]]
            .iter()
            .map(|[x, y, z]| (x * x + y * y + z * z).sqrt())
            .product::<f64>();
        if !det.is_finite() || det.abs() <= SINGULAR_EPSILON * bound {
            return Err(GeometryError::SingularMatrix { det });
        }

        let c10 = -(b * i - c * h);
        let c11 = a * i - c * g;
        let c12 = -(a * h - b * g);
        let c20 = b * f - c * e;
        let c21 = -(a * f - c * d);
        let c22 = a * e - b * d;

        let k = 1.0 / det;
        Ok(Matrix3 {
            m: [
                c00 * k, c10 * k, c20 * k,
                c01 * k, c11 * k, c21 * k,
                c02 * k, c12 * k, c22 * k,
            ],
        })
    }

    /// Replace `self` with its inverse. Leaves `self` untouched on error.
    pub fn invert(&mut self) -> Result<&mut Self, GeometryError> {
        *self = self.inverse()?;
        Ok(self)
    }

    pub fn approx_eq(&self, other: &Matrix3, eps: f64) -> bool {
        self.m.iter().zip(other.m.iter()).all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// glam uses column vectors with column-major storage. Our row-vector matrix is
// the transpose of the column-vector one, so the flat buffers coincide.
impl From<Matrix3> for glam::DMat3 {
    fn from(m: Matrix3) -> Self {
        glam::DMat3::from_cols_array(&m.m)
    }
}

impl From<glam::DMat3> for Matrix3 {
    fn from(m: glam::DMat3) -> Self {
        Matrix3 { m: m.to_cols_array() }
    }
}
