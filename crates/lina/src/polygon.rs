use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::matrix::Matrix3;
use crate::point::Point2;
use crate::vector::Vec2;

/// Closed polygon stored as a flat `[x0, y0, x1, y1, ...]` vertex list.
///
/// The last vertex implicitly connects back to the first. Orientation
/// carries meaning for collisions: each directed edge collides on its left
/// side, which for a counter-clockwise polygon is the interior. A CCW
/// polygon therefore works as a wall enclosing a play area, and a reverted
/// (clockwise) one as a solid obstacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polygon2 {
    xy: Vec<f64>,
}

/// One directed edge, from vertex `index` to vertex `index + 1` (wrapping).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub index: usize,
    pub a: Point2,
    pub b: Point2,
}

impl Edge {
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Unit left-hand normal; zero for a degenerate edge.
    pub fn normal(&self) -> Vec2 {
        self.direction().perp().normalized()
    }

    /// Point of the segment nearest to `p`.
    pub fn closest_point(&self, p: Point2) -> Point2 {
        let d = self.direction();
        let len_sq = d.length_sq();
        if len_sq == 0.0 {
            return self.a;
        }
        let t = ((p - self.a).dot(d) / len_sq).clamp(0.0, 1.0);
        self.a + d * t
    }

    pub fn distance_to(&self, p: Point2) -> f64 {
        self.closest_point(p).distance_to(p)
    }
}

/// Axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2 {
        self.min.lerp(self.max, 0.5)
    }

    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// A circle enclosing every vertex. Not necessarily the minimal one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingCircle {
    pub center: Point2,
    pub radius: f64,
}

impl Polygon2 {
    /// Build from flat `x, y` pairs.
    pub fn new(xy: &[f64]) -> Result<Self, GeometryError> {
        Self::from_flat(xy.to_vec())
    }

    pub fn from_points(points: &[Point2]) -> Result<Self, GeometryError> {
        Self::from_flat(points.iter().flat_map(|p| [p.x, p.y]).collect())
    }

    fn from_flat(xy: Vec<f64>) -> Result<Self, GeometryError> {
        if xy.len() % 2 != 0 {
            return Err(GeometryError::OddCoordinateCount { len: xy.len() });
        }
        if xy.len() < 6 {
            return Err(GeometryError::TooFewVertices { count: xy.len() / 2 });
        }
        if xy.iter().any(|c| !c.is_finite()) {
            return Err(GeometryError::NonFinite { what: "polygon" });
        }
        Ok(Self { xy })
    }

    /// Axis-aligned rectangle, counter-clockwise.
    pub fn rect(min: Point2, max: Point2) -> Result<Self, GeometryError> {
        Self::new(&[min.x, min.y, max.x, min.y, max.x, max.y, min.x, max.y])
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.xy.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.xy.is_empty()
    }

    pub fn as_flat(&self) -> &[f64] {
        &self.xy
    }

    /// Vertex `i`, wrapping around.
    pub fn vertex(&self, i: usize) -> Point2 {
        let i = i % self.len();
        Point2::new(self.xy[2 * i], self.xy[2 * i + 1])
    }

    pub fn vertices(&self) -> impl Iterator<Item = Point2> + '_ {
        self.xy.chunks_exact(2).map(|c| Point2::new(c[0], c[1]))
    }

    pub fn edge(&self, i: usize) -> Edge {
        let i = i % self.len();
        Edge {
            index: i,
            a: self.vertex(i),
            b: self.vertex(i + 1),
        }
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.len()).map(|i| self.edge(i))
    }

    /// Apply `m` to every vertex in place.
    pub fn transform(&mut self, m: &Matrix3) -> &mut Self {
        for c in self.xy.chunks_exact_mut(2) {
            let p = m.transform_point(c[0], c[1]);
            c[0] = p.x;
            c[1] = p.y;
        }
        self
    }

    pub fn transformed(&self, m: &Matrix3) -> Polygon2 {
        let mut out = self.clone();
        out.transform(m);
        out
    }

    pub fn translated(&self, v: Vec2) -> Polygon2 {
        self.transformed(&Matrix3::translation(v.dx, v.dy))
    }

    /// Reverse vertex order in place, flipping the orientation.
    pub fn revert(&mut self) -> &mut Self {
        let n = self.len();
        for i in 0..n / 2 {
            let j = n - 1 - i;
            self.xy.swap(2 * i, 2 * j);
            self.xy.swap(2 * i + 1, 2 * j + 1);
        }
        self
    }

    /// Shoelace sum halved; positive for counter-clockwise order.
    pub fn signed_area(&self) -> f64 {
        self.edges()
            .map(|e| e.a.to_vec().cross(e.b.to_vec()))
            .sum::<f64>()
            * 0.5
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Area centroid. Falls back to the vertex average for zero-area input.
    pub fn centroid(&self) -> Point2 {
        let a = self.signed_area();
        if a == 0.0 {
            let n = self.len() as f64;
            let (sx, sy) = self.vertices().fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
            return Point2::new(sx / n, sy / n);
        }
        let (cx, cy) = self.edges().fold((0.0, 0.0), |(x, y), e| {
            let w = e.a.to_vec().cross(e.b.to_vec());
            (x + (e.a.x + e.b.x) * w, y + (e.a.y + e.b.y) * w)
        });
        Point2::new(cx / (6.0 * a), cy / (6.0 * a))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let first = self.vertex(0);
        let (min, max) = self.vertices().fold((first, first), |(lo, hi), p| {
            (
                Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });
        BoundingBox { min, max }
    }

    /// Circle around the bounding-box center reaching the farthest vertex.
    pub fn bounding_circle(&self) -> BoundingCircle {
        let center = self.bounding_box().center();
        let radius = self
            .vertices()
            .map(|p| center.distance_to(p))
            .fold(0.0, f64::max);
        BoundingCircle { center, radius }
    }

    /// Distance from `p` to the nearest point of the outline.
    pub fn distance_to_boundary(&self, p: Point2) -> f64 {
        self.edges()
            .map(|e| e.distance_to(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Even-odd ray casting towards +x.
    ///
    /// Edges are half-open in y (lower endpoint included, upper excluded) and
    /// a crossing counts only strictly to the right of `p`. Points exactly on
    /// the boundary are classified deterministically but without a
    /// geometric guarantee either way. Orientation does not matter.
    pub fn contains_point(&self, p: Point2) -> bool {
        let mut inside = false;
        for e in self.edges() {
            if (e.a.y > p.y) != (e.b.y > p.y) {
                let x = e.a.x + (p.y - e.a.y) * (e.b.x - e.a.x) / (e.b.y - e.a.y);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// True if the outlines cross or touch, or one polygon lies inside the other.
    pub fn intersects(&self, other: &Polygon2) -> bool {
        let (ba, bb) = (self.bounding_box(), other.bounding_box());
        if ba.max.x < bb.min.x || bb.max.x < ba.min.x || ba.max.y < bb.min.y || bb.max.y < ba.min.y
        {
            return false;
        }
        let crossing = self
            .edges()
            .any(|e| other.edges().any(|f| segments_intersect(e.a, e.b, f.a, f.b)));
        crossing || self.contains_point(other.vertex(0)) || other.contains_point(self.vertex(0))
    }
}

impl TryFrom<Vec<f64>> for Polygon2 {
    type Error = GeometryError;

    fn try_from(xy: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_flat(xy)
    }
}

impl From<Polygon2> for Vec<f64> {
    fn from(p: Polygon2) -> Self {
        p.xy
    }
}

/// Closed-segment intersection test, collinear overlaps included.
pub fn segments_intersect(p1: Point2, p2: Point2, q1: Point2, q2: Point2) -> bool {
    let r = p2 - p1;
    let s = q2 - q1;
    let d1 = r.cross(q1 - p1);
    let d2 = r.cross(q2 - p1);
    let d3 = s.cross(p1 - q1);
    let d4 = s.cross(p2 - q1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    let on_segment = |a: Point2, b: Point2, p: Point2| {
        p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
    };
    (d1 == 0.0 && on_segment(p1, p2, q1))
        || (d2 == 0.0 && on_segment(p1, p2, q2))
        || (d3 == 0.0 && on_segment(q1, q2, p1))
        || (d4 == 0.0 && on_segment(q1, q2, p2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon2 {
        Polygon2::new(&[-10.0, -10.0, 10.0, -10.0, 10.0, 10.0, -10.0, 10.0]).unwrap()
    }

    #[test]
    fn edge_closest_point_clamps_to_segment() {
        let e = square().edge(0);
        assert_eq!(e.closest_point(Point2::new(3.0, -20.0)), Point2::new(3.0, -10.0));
        assert_eq!(e.closest_point(Point2::new(30.0, -10.0)), Point2::new(10.0, -10.0));
        assert_eq!(e.distance_to(Point2::new(13.0, -14.0)), 5.0);
        assert_eq!(square().distance_to_boundary(Point2::new(1.0, 2.0)), 8.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            Polygon2::new(&[0.0, 0.0, 1.0]).unwrap_err(),
            GeometryError::OddCoordinateCount { len: 3 }
        );
        assert_eq!(
            Polygon2::new(&[0.0, 0.0, 1.0, 1.0]).unwrap_err(),
            GeometryError::TooFewVertices { count: 2 }
        );
    }

    #[test]
    fn area_and_orientation() {
        let mut p = square();
        assert!(p.is_ccw());
        assert_eq!(p.area(), 400.0);
        p.revert();
        assert!(!p.is_ccw());
        assert_eq!(p.signed_area(), -400.0);
        assert_eq!(p.vertex(0), Point2::new(-10.0, 10.0));
    }

    #[test]
    fn edges_wrap_around() {
        let p = square();
        let last = p.edge(3);
        assert_eq!(last.a, Point2::new(-10.0, 10.0));
        assert_eq!(last.b, Point2::new(-10.0, -10.0));
        assert_eq!(p.edges().count(), 4);
    }

    #[test]
    fn ccw_edge_normals_point_inside() {
        let p = square();
        let bottom = p.edge(0);
        assert_eq!(bottom.normal(), Vec2::new(0.0, 1.0));
        for e in p.edges() {
            let mid = e.a.lerp(e.b, 0.5);
            assert!(p.contains_point(mid + e.normal()));
        }
    }

    #[test]
    fn transform_moves_every_vertex() {
        let mut p = square();
        let mut m = Matrix3::identity();
        m.scale(0.5, 0.5).translate(100.0, 0.0);
        p.transform(&m);
        let bb = p.bounding_box();
        assert_eq!(bb.min, Point2::new(95.0, -5.0));
        assert_eq!(bb.max, Point2::new(105.0, 5.0));
        assert_eq!(p.centroid(), Point2::new(100.0, 0.0));
    }

    #[test]
    fn contains_point_interior_and_exterior() {
        let p = square();
        assert!(p.contains_point(Point2::new(0.0, 0.0)));
        assert!(p.contains_point(Point2::new(9.9, -9.9)));
        assert!(!p.contains_point(Point2::new(10.1, 0.0)));
        assert!(!p.contains_point(Point2::new(0.0, -20.0)));
    }

    #[test]
    fn contains_point_non_convex() {
        // U shape opening upward
        let u = Polygon2::new(&[0.0, 0.0, 3.0, 0.0, 3.0, 3.0, 2.0, 3.0, 2.0, 1.0, 1.0, 1.0, 1.0, 3.0, 0.0, 3.0])
            .unwrap();
        assert!(u.contains_point(Point2::new(0.5, 2.0)));
        assert!(!u.contains_point(Point2::new(1.5, 2.0)));
        assert!(u.contains_point(Point2::new(1.5, 0.5)));
    }

    #[test]
    fn bounding_circle_encloses_vertices() {
        let p = square();
        let c = p.bounding_circle();
        assert_eq!(c.center, Point2::ORIGIN);
        for v in p.vertices() {
            assert!(c.center.distance_to(v) <= c.radius + 1e-12);
        }
    }

    #[test]
    fn intersects_overlap_containment_and_disjoint() {
        let a = square();
        let b = a.translated(Vec2::new(15.0, 0.0));
        let inner = Polygon2::rect(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0)).unwrap();
        let far = a.translated(Vec2::new(50.0, 0.0));
        assert!(a.intersects(&b));
        assert!(a.intersects(&inner));
        assert!(inner.intersects(&a));
        assert!(!a.intersects(&far));
    }

    #[test]
    fn serde_round_trip_validates() {
        let json = serde_json::to_string(&square()).unwrap();
        let back: Polygon2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, square());
        assert!(serde_json::from_str::<Polygon2>("[0.0, 1.0]").is_err());
    }
}
