//! Static geometry of the sandbox: a notched room and a diamond obstacle.

use lina::{GeometryError, Matrix3, Point2, Polygon2};

pub const WORLD_W: f64 = 800.0;
pub const WORLD_H: f64 = 600.0;

pub const OBSTACLE_CENTER: Point2 = Point2::new(400.0, 250.0);
pub const OBSTACLE_HALF: f64 = 60.0;
pub const OBSTACLE_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

/// Counter-clockwise room with a notch cut into the y = 600 wall.
/// The notch tip at (400, 450) is a reflex corner.
pub fn arena_outline() -> Result<Polygon2, GeometryError> {
    Polygon2::new(&[
        0.0, 0.0,
        WORLD_W, 0.0,
        WORLD_W, WORLD_H,
        500.0, WORLD_H,
        400.0, 450.0,
        300.0, WORLD_H,
        0.0, WORLD_H,
    ])
}

/// Square obstacle in its own frame, wound clockwise so circles stay out.
pub fn obstacle_outline(half: f64) -> Result<Polygon2, GeometryError> {
    let mut square = Polygon2::rect(Point2::new(-half, -half), Point2::new(half, half))?;
    square.revert();
    Ok(square)
}

/// World-space walls with clearance queries for placing circles.
#[derive(Debug, Clone)]
pub struct Layout {
    arena: Polygon2,
    obstacle: Polygon2,
}

impl Layout {
    pub fn new(arena: Polygon2, obstacle: Polygon2) -> Self {
        Self { arena, obstacle }
    }

    /// Default layout: the obstacle turned to a diamond and moved into the room.
    pub fn standard() -> Result<Self, GeometryError> {
        let mut place = Matrix3::identity();
        place
            .rotate(OBSTACLE_ANGLE)
            .translate(OBSTACLE_CENTER.x, OBSTACLE_CENTER.y);
        Ok(Self::new(
            arena_outline()?,
            obstacle_outline(OBSTACLE_HALF)?.transformed(&place),
        ))
    }

    pub fn arena(&self) -> &Polygon2 {
        &self.arena
    }

    pub fn obstacle(&self) -> &Polygon2 {
        &self.obstacle
    }

    /// Whether `p` lies in the open play area.
    pub fn is_free(&self, p: Point2) -> bool {
        self.arena.contains_point(p) && !self.obstacle.contains_point(p)
    }

    /// Distance from `p` to the nearest wall; `None` outside the play area.
    pub fn clearance(&self, p: Point2) -> Option<f64> {
        if !self.is_free(p) {
            return None;
        }
        Some(
            self.arena
                .distance_to_boundary(p)
                .min(self.obstacle.distance_to_boundary(p)),
        )
    }

    /// Whether a circle of radius `r` at `p` touches no wall.
    pub fn fits(&self, p: Point2, r: f64) -> bool {
        self.clearance(p).is_some_and(|c| c > r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windings() {
        let layout = Layout::standard().unwrap();
        assert!(layout.arena().is_ccw());
        assert!(!layout.obstacle().is_ccw());
        assert!((layout.obstacle().area() - 4.0 * OBSTACLE_HALF * OBSTACLE_HALF).abs() < 1e-6);
    }

    #[test]
    fn notch_and_obstacle_are_not_free() {
        let layout = Layout::standard().unwrap();
        assert!(layout.is_free(Point2::new(100.0, 100.0)));
        assert!(!layout.is_free(Point2::new(400.0, 500.0)));
        assert!(!layout.is_free(OBSTACLE_CENTER));
        assert!(!layout.is_free(Point2::new(900.0, 100.0)));
    }

    #[test]
    fn diamond_tip_limits_clearance() {
        let layout = Layout::standard().unwrap();
        // The diamond's right tip sits at x = 400 + 60 * sqrt(2).
        let tip_x = OBSTACLE_CENTER.x + OBSTACLE_HALF * 2f64.sqrt();
        let c = layout.clearance(Point2::new(tip_x + 10.0, 250.0)).unwrap();
        assert!((c - 10.0).abs() < 1e-9, "{c}");
        assert!(layout.fits(Point2::new(tip_x + 10.0, 250.0), 9.0));
        assert!(!layout.fits(Point2::new(tip_x + 10.0, 250.0), 11.0));
    }
}
