use crate::error::CollisionError;
use crate::point::Point2;
use crate::vector::Vec2;

use super::{quadratic_roots, MovingCircle, Tolerance};

/// Outcome of a circle–circle sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleContact {
    /// Time of impact as a fraction of the step, in `[-1, 1]`.
    pub t: f64,
    /// Unit contact normal, pointing from circle 1 towards circle 2.
    pub normal: Vec2,
    /// Centers at time `t`.
    pub center1: Point2,
    pub center2: Point2,
    /// Velocities after the impact.
    pub velocity1: Vec2,
    pub velocity2: Vec2,
}

impl CircleContact {
    /// The same contact seen with the circles passed in the other order.
    pub fn swapped(&self) -> CircleContact {
        CircleContact {
            t: self.t,
            normal: -self.normal,
            center1: self.center2,
            center2: self.center1,
            velocity1: self.velocity2,
            velocity2: self.velocity1,
        }
    }
}

/// Earliest contact between two moving circles during one step.
///
/// Solves `|Δp + t·Δv| = r1 + r2` for the smaller root. Circles already
/// overlapping and still closing report the (negative) time they first
/// touched, with the normal taken from the current center offset; overlapping
/// circles that are already separating report no contact.
///
/// Response is an elastic impact along the normal. Equal masses exchange
/// their normal velocity components exactly; tangential components are
/// untouched.
pub fn intersect_moving_circles(
    c1: &MovingCircle,
    c2: &MovingCircle,
    tolerance: Tolerance,
) -> Result<Option<CircleContact>, CollisionError> {
    let eps = tolerance.epsilon();
    let dp = c2.center - c1.center;
    let dv = c2.velocity - c1.velocity;
    let reach = c1.radius + c2.radius;

    let a = dv.length_sq();
    let b = 2.0 * dp.dot(dv);
    let c = dp.length_sq() - reach * reach;

    if a <= eps * eps {
        return Err(CollisionError::NoRelativeMotion);
    }

    let Some((t1, _)) = quadratic_roots(a, b, c) else {
        return Ok(None);
    };

    let (t, offset) = if c < 0.0 {
        if b >= 0.0 {
            return Ok(None);
        }
        if t1 < -1.0 {
            return Err(CollisionError::DeepPenetration { t: t1 });
        }
        (t1, dp)
    } else {
        if !(0.0..=1.0).contains(&t1) {
            return Ok(None);
        }
        (t1, dp + dv * t1)
    };

    if offset.length() <= eps {
        return Err(CollisionError::CoincidentCenters);
    }
    let normal = offset.normalized();

    let v1n = c1.velocity.dot(normal);
    let v2n = c2.velocity.dot(normal);
    let (v1n_after, v2n_after) = if c1.mass == c2.mass {
        (v2n, v1n)
    } else {
        let total = c1.mass + c2.mass;
        (
            ((c1.mass - c2.mass) * v1n + 2.0 * c2.mass * v2n) / total,
            ((c2.mass - c1.mass) * v2n + 2.0 * c1.mass * v1n) / total,
        )
    };

    Ok(Some(CircleContact {
        t,
        normal,
        center1: c1.center_at(t),
        center2: c2.center_at(t),
        velocity1: c1.velocity + normal * (v1n_after - v1n),
        velocity2: c2.velocity + normal * (v2n_after - v2n),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f64, y: f64, vx: f64, vy: f64, r: f64) -> MovingCircle {
        MovingCircle::from_xyvr(x, y, vx, vy, r).unwrap()
    }

    #[test]
    fn head_on_contact_mid_step() {
        let a = circle(0.0, 0.0, 1.0, 0.0, 1.0);
        let b = circle(3.0, 0.0, -1.0, 0.0, 1.0);
        let hit = intersect_moving_circles(&a, &b, Tolerance::default())
            .unwrap()
            .unwrap();
        assert!((hit.t - 0.5).abs() < 1e-12);
        assert_eq!(hit.normal, Vec2::new(1.0, 0.0));
        assert_eq!(hit.velocity1, Vec2::new(-1.0, 0.0));
        assert_eq!(hit.velocity2, Vec2::new(1.0, 0.0));
        assert_eq!(hit.center1, Point2::new(0.5, 0.0));
        assert_eq!(hit.center2, Point2::new(2.5, 0.0));
    }

    #[test]
    fn gap_too_wide_for_one_step() {
        let a = circle(0.0, 0.0, 1.0, 0.0, 1.0);
        let b = circle(5.0, 0.0, -1.0, 0.0, 1.0);
        assert_eq!(intersect_moving_circles(&a, &b, Tolerance::default()), Ok(None));
    }

    #[test]
    fn diverging_circles_never_touch() {
        let a = circle(0.0, 0.0, -1.0, 0.0, 1.0);
        let b = circle(3.0, 0.0, 1.0, 0.0, 1.0);
        assert_eq!(intersect_moving_circles(&a, &b, Tolerance::default()), Ok(None));
    }

    #[test]
    fn passing_by_misses() {
        let a = circle(0.0, 0.0, 1.0, 0.0, 1.0);
        let b = circle(2.0, 3.0, -1.0, 0.0, 1.0);
        assert_eq!(intersect_moving_circles(&a, &b, Tolerance::default()), Ok(None));
    }

    #[test]
    fn oblique_hit_keeps_tangential_parts() {
        // b is stationary; a strikes it at 45 degrees
        let a = circle(0.0, 0.0, 2.0, 0.0, 1.0);
        let b = circle(3.0, 2.0f64.sqrt(), 0.0, 0.0, 1.0);
        let hit = intersect_moving_circles(&a, &b, Tolerance::default())
            .unwrap()
            .unwrap();
        let tangent = hit.normal.perp();
        assert!((hit.velocity1.dot(tangent) - a.velocity.dot(tangent)).abs() < 1e-12);
        assert!((hit.velocity2.dot(tangent)).abs() < 1e-12);
        assert!((hit.velocity2.dot(hit.normal) - a.velocity.dot(hit.normal)).abs() < 1e-12);
        let gap = hit.center1.distance_to(hit.center2);
        assert!((gap - 2.0).abs() < 1e-9);
    }

    #[test]
    fn overlapping_and_closing_backs_up() {
        let a = circle(0.0, 0.0, 1.0, 0.0, 1.0);
        let b = circle(1.8, 0.0, -1.0, 0.0, 1.0);
        let hit = intersect_moving_circles(&a, &b, Tolerance::default())
            .unwrap()
            .unwrap();
        assert!(hit.t < 0.0 && hit.t >= -1.0);
        assert!((hit.center1.distance_to(hit.center2) - 2.0).abs() < 1e-9);
        assert_eq!(hit.velocity1, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn overlapping_and_separating_is_left_alone() {
        let a = circle(0.0, 0.0, -1.0, 0.0, 1.0);
        let b = circle(1.8, 0.0, 1.0, 0.0, 1.0);
        assert_eq!(intersect_moving_circles(&a, &b, Tolerance::default()), Ok(None));
    }

    #[test]
    fn deep_overlap_is_reported() {
        let a = circle(0.0, 0.0, 0.1, 0.0, 1.0);
        let b = circle(0.5, 0.0, 0.0, 0.0, 1.0);
        assert!(matches!(
            intersect_moving_circles(&a, &b, Tolerance::default()),
            Err(CollisionError::DeepPenetration { .. })
        ));
    }

    #[test]
    fn same_velocity_is_degenerate() {
        let a = circle(0.0, 0.0, 1.0, 1.0, 1.0);
        let b = circle(3.0, 0.0, 1.0, 1.0, 1.0);
        assert_eq!(
            intersect_moving_circles(&a, &b, Tolerance::default()),
            Err(CollisionError::NoRelativeMotion)
        );
    }

    #[test]
    fn heavy_circle_barely_slows() {
        let a = circle(0.0, 0.0, 1.0, 0.0, 1.0).with_mass(1000.0).unwrap();
        let b = circle(3.0, 0.0, 0.0, 0.0, 1.0);
        let hit = intersect_moving_circles(&a, &b, Tolerance::default())
            .unwrap()
            .unwrap();
        assert!(hit.velocity1.dx > 0.99);
        assert!(hit.velocity2.dx > 1.99);
        let p_before = 1000.0 * 1.0;
        let p_after = 1000.0 * hit.velocity1.dx + hit.velocity2.dx;
        assert!((p_before - p_after).abs() < 1e-9);
    }
}
