use crate::error::CollisionError;
use crate::point::Point2;
use crate::polygon::{Edge, Polygon2};
use crate::vector::Vec2;

use super::{quadratic_roots, reflect, MovingCircle, Tolerance};

/// Which part of the polygon outline was struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFeature {
    /// The flat part of edge `i` (vertex `i` to vertex `i + 1`).
    Edge(usize),
    /// The rounded cap around vertex `i`.
    Vertex(usize),
}

/// Outcome of a circle–polygon sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonContact {
    /// Time of impact as a fraction of the step, in `[-1, 1]`.
    pub t: f64,
    pub feature: ContactFeature,
    /// Unit normal at the contact, pointing from the outline towards the circle.
    pub normal: Vec2,
    /// Circle center at time `t`, along the original velocity.
    pub center: Point2,
    /// Velocity reflected about `normal`.
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    t: f64,
    normal: Vec2,
    feature: ContactFeature,
}

enum Sweep {
    Hit(Candidate),
    Miss,
    Deep(f64),
}

impl Polygon2 {
    /// Earliest contact of a moving circle with this outline during one step.
    ///
    /// Each edge is swept as its line offset by the radius towards the edge's
    /// left side, clipped to the segment, and each vertex as a circle of the
    /// same radius. Only the left side collides, so a counter-clockwise
    /// polygon keeps circles inside and a clockwise one keeps them out.
    ///
    /// Contacts within the tolerance of each other in time are simultaneous;
    /// the one whose normal opposes the velocity most wins.
    pub fn intersect_moving_circle(
        &self,
        circle: &MovingCircle,
        tolerance: Tolerance,
    ) -> Result<Option<PolygonContact>, CollisionError> {
        let eps = tolerance.epsilon();
        let v = circle.velocity;
        if v.length() <= eps {
            return Err(CollisionError::NoRelativeMotion);
        }

        let mut best: Option<Candidate> = None;
        let mut deepest: Option<f64> = None;

        let sweeps = self
            .edges()
            .map(|edge| sweep_edge(&edge, circle, eps))
            .chain((0..self.len()).map(|i| sweep_vertex(self, i, circle, eps)));

        for sweep in sweeps {
            match sweep {
                Sweep::Hit(c) => best = Some(earlier(best, c, v, eps)),
                Sweep::Deep(t) => deepest = Some(deepest.map_or(t, |d: f64| d.min(t))),
                Sweep::Miss => {}
            }
        }

        match (best, deepest) {
            (Some(c), _) => Ok(Some(PolygonContact {
                t: c.t,
                feature: c.feature,
                normal: c.normal,
                center: circle.center_at(c.t),
                velocity: reflect(v, c.normal),
            })),
            (None, Some(t)) => Err(CollisionError::DeepPenetration { t }),
            (None, None) => Ok(None),
        }
    }
}

fn earlier(best: Option<Candidate>, c: Candidate, v: Vec2, eps: f64) -> Candidate {
    match best {
        None => c,
        Some(b) if c.t < b.t - eps => c,
        Some(b) if (c.t - b.t).abs() <= eps && v.dot(c.normal) < v.dot(b.normal) => c,
        Some(b) => b,
    }
}

fn sweep_edge(edge: &Edge, circle: &MovingCircle, eps: f64) -> Sweep {
    let dir = edge.direction();
    let len_sq = dir.length_sq();
    if len_sq <= eps * eps {
        return Sweep::Miss;
    }
    let n = edge.normal();
    let v = circle.velocity;

    // Centers past the line by up to a radius still overlap the edge and
    // are backed up to the touching position like any other overlap.
    let dist = (circle.center - edge.a).dot(n);
    let closing = v.dot(n);
    if closing >= 0.0 || dist < -circle.radius {
        return Sweep::Miss;
    }

    let t = (circle.radius - dist) / closing;
    if t > 1.0 {
        return Sweep::Miss;
    }
    let along = (circle.center_at(t) - edge.a).dot(dir) / len_sq;
    if !(0.0..=1.0).contains(&along) {
        return Sweep::Miss;
    }
    if t < -1.0 {
        return Sweep::Deep(t);
    }
    Sweep::Hit(Candidate {
        t,
        normal: n,
        feature: ContactFeature::Edge(edge.index),
    })
}

fn sweep_vertex(poly: &Polygon2, i: usize, circle: &MovingCircle, eps: f64) -> Sweep {
    let q = poly.vertex(i);
    let prev = poly.edge(i + poly.len() - 1);
    let next = poly.edge(i);
    let v = circle.velocity;
    let rel = circle.center - q;

    let a = v.length_sq();
    let b = 2.0 * rel.dot(v);
    let c = rel.length_sq() - circle.radius * circle.radius;

    let Some((t, _)) = quadratic_roots(a, b, c) else {
        return Sweep::Miss;
    };

    let offset = if c < 0.0 {
        if b >= 0.0 {
            return Sweep::Miss;
        }
        rel
    } else {
        if !(0.0..=1.0).contains(&t) {
            return Sweep::Miss;
        }
        rel + v * t
    };
    if offset.length() <= eps {
        return Sweep::Miss;
    }
    let n = offset.normalized();

    // A convex corner is collidable only where both edges face the circle,
    // a reflex one wherever either does.
    let (np, nn) = (prev.normal(), next.normal());
    let convex = prev.direction().cross(next.direction()) >= 0.0;
    let facing = if convex {
        n.dot(np) >= 0.0 && n.dot(nn) >= 0.0
    } else {
        n.dot(np) > 0.0 || n.dot(nn) > 0.0
    };
    if !facing {
        return Sweep::Miss;
    }
    if t < -1.0 {
        return Sweep::Deep(t);
    }
    Sweep::Hit(Candidate {
        t,
        normal: n,
        feature: ContactFeature::Vertex(i),
    })
}
