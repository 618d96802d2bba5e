use std::collections::HashSet;

use lina::{
    intersect_moving_circles, BoundingCircle, CircleContact, CollisionError, ContactFeature,
    MovingCircle, Point2, Polygon2, PolygonContact, Tolerance, Vec2,
};

use crate::api::types::EntityId;
use crate::components::entity::WorldShape;
use crate::core::scene::Scene;

/// What kind of contact a `CollisionEvent` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Two moving circles.
    Circles,
    /// A moving circle against a polygon outline.
    Wall(ContactFeature),
}

/// A contact applied during the last step.
///
/// For `Circles`, `a` and `b` are the two circles. For `Wall`, `a` is the
/// circle and `b` the polygon entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub a: EntityId,
    pub b: EntityId,
    /// Time of impact as a fraction of the step.
    pub t: f64,
    /// Unit contact normal. Points from `a` to `b` for circles and from
    /// the wall towards the circle for walls.
    pub normal: Vec2,
    pub kind: ContactKind,
}

struct Mover {
    id: EntityId,
    circle: MovingCircle,
}

struct Wall {
    id: EntityId,
    outline: Polygon2,
    bounds: BoundingCircle,
}

enum Contact {
    Pair { i: usize, j: usize, hit: CircleContact },
    Wall { i: usize, w: usize, hit: PolygonContact },
}

impl Contact {
    fn t(&self) -> f64 {
        match self {
            Contact::Pair { hit, .. } => hit.t,
            Contact::Wall { hit, .. } => hit.t,
        }
    }
}

/// Sweep every circle against every other circle and every polygon for one
/// step of length `dt`, then write corrected state back into the scene.
///
/// All pairs are tested against the state at the start of the step. Each
/// circle takes at most one contact per step: the earliest one whose
/// participants are both still untouched. A corrected circle is left at its
/// contact position with the response velocity; contacts it would have made
/// later in the step are found again on the next step. A circle whose only
/// contacts were pre-empted this way holds its position for the step.
///
/// Returns the ids whose position was settled here; the caller integrates
/// the rest. Degenerate pairs are skipped and logged.
pub fn resolve_collisions(
    scene: &mut Scene,
    dt: f64,
    tolerance: Tolerance,
    events: &mut Vec<CollisionEvent>,
) -> HashSet<EntityId> {
    let mut resolved = HashSet::new();
    if !(dt > 0.0) {
        return resolved;
    }

    let (movers, walls) = snapshot(scene, dt);
    let mut contacts = Vec::new();

    for i in 0..movers.len() {
        for j in (i + 1)..movers.len() {
            let (m1, m2) = (&movers[i], &movers[j]);
            if !may_meet(&m1.circle, &m2.circle) {
                continue;
            }
            match intersect_moving_circles(&m1.circle, &m2.circle, tolerance) {
                Ok(Some(hit)) => contacts.push(Contact::Pair { i, j, hit }),
                Ok(None) => {}
                Err(err) => report(m1.id, m2.id, &err),
            }
        }
        for (w, wall) in walls.iter().enumerate() {
            let mover = &movers[i];
            if !may_reach(&mover.circle, &wall.bounds) {
                continue;
            }
            match wall.outline.intersect_moving_circle(&mover.circle, tolerance) {
                Ok(Some(hit)) => contacts.push(Contact::Wall { i, w, hit }),
                Ok(None) => {}
                Err(err) => report(mover.id, wall.id, &err),
            }
        }
    }

    contacts.sort_by(|a, b| a.t().total_cmp(&b.t()));

    let mut touched = vec![false; movers.len()];
    let mut held = vec![false; movers.len()];
    for contact in contacts {
        match contact {
            Contact::Pair { i, j, hit } => {
                if touched[i] || touched[j] {
                    held[i] = true;
                    held[j] = true;
                    continue;
                }
                touched[i] = true;
                touched[j] = true;
                // An overlapping pair separates from where it stands; backing up
                // along the new velocities could undo a wall bounce.
                let (c1, c2) = if hit.t < 0.0 {
                    (movers[i].circle.center, movers[j].circle.center)
                } else {
                    (hit.center1, hit.center2)
                };
                write_back(scene, movers[i].id, c1, hit.velocity1, dt);
                write_back(scene, movers[j].id, c2, hit.velocity2, dt);
                resolved.insert(movers[i].id);
                resolved.insert(movers[j].id);
                log::debug!(
                    "circles {:?} and {:?} meet at t={:.4}",
                    movers[i].id,
                    movers[j].id,
                    hit.t
                );
                events.push(CollisionEvent {
                    a: movers[i].id,
                    b: movers[j].id,
                    t: hit.t,
                    normal: hit.normal,
                    kind: ContactKind::Circles,
                });
            }
            Contact::Wall { i, w, hit } => {
                if touched[i] {
                    continue;
                }
                touched[i] = true;
                write_back(scene, movers[i].id, hit.center, hit.velocity, dt);
                resolved.insert(movers[i].id);
                log::debug!(
                    "circle {:?} hits {:?} of {:?} at t={:.4}",
                    movers[i].id,
                    hit.feature,
                    walls[w].id,
                    hit.t
                );
                events.push(CollisionEvent {
                    a: movers[i].id,
                    b: walls[w].id,
                    t: hit.t,
                    normal: hit.normal,
                    kind: ContactKind::Wall(hit.feature),
                });
            }
        }
    }

    for (k, mover) in movers.iter().enumerate() {
        if held[k] && !touched[k] {
            log::trace!("{:?} held for one step", mover.id);
            resolved.insert(mover.id);
        }
    }

    resolved
}

/// Pre-step circles (velocity scaled to a per-step displacement) and
/// world-space polygons of all active entities.
fn snapshot(scene: &Scene, dt: f64) -> (Vec<Mover>, Vec<Wall>) {
    let mut movers = Vec::new();
    let mut walls = Vec::new();
    for entity in scene.iter().filter(|e| e.active) {
        match entity.world_shape() {
            Some(WorldShape::Circle { center, radius }) => {
                let circle = MovingCircle::new(center, radius, entity.vel() * dt)
                    .and_then(|c| c.with_mass(entity.mass));
                match circle {
                    Ok(circle) => movers.push(Mover {
                        id: entity.id,
                        circle,
                    }),
                    Err(err) => log::warn!("{:?} skipped by collision: {}", entity.id, err),
                }
            }
            Some(WorldShape::Polygon(outline)) => {
                let bounds = outline.bounding_circle();
                walls.push(Wall {
                    id: entity.id,
                    outline,
                    bounds,
                });
            }
            None => {}
        }
    }
    (movers, walls)
}

/// Cheap reject: the circles cannot touch within the step.
fn may_meet(a: &MovingCircle, b: &MovingCircle) -> bool {
    let reach = a.radius + b.radius + a.velocity.length() + b.velocity.length();
    a.center.distance_sq_to(b.center) <= reach * reach
}

fn may_reach(c: &MovingCircle, bounds: &BoundingCircle) -> bool {
    let reach = bounds.radius + c.radius + c.velocity.length();
    c.center.distance_sq_to(bounds.center) <= reach * reach
}

fn write_back(scene: &mut Scene, id: EntityId, center: Point2, step_velocity: Vec2, dt: f64) {
    if let Some(entity) = scene.get_mut(id) {
        entity.kinetic.pos = center;
        entity.kinetic.vel = step_velocity * (1.0 / dt);
    }
}

fn report(a: EntityId, b: EntityId, err: &CollisionError) {
    if err.is_steady_state() {
        log::trace!("{:?}/{:?}: {}", a, b, err);
    } else {
        log::warn!("{:?}/{:?} skipped: {}", a, b, err);
    }
}
