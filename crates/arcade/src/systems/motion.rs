use std::collections::HashSet;

use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Advance every active entity by `dt`: position for those not in `placed`,
/// rotation and time-to-live for all. Returns the ids that expired.
pub fn integrate(scene: &mut Scene, dt: f64, placed: &HashSet<EntityId>) -> Vec<EntityId> {
    let mut expired = Vec::new();
    for entity in scene.iter_mut() {
        if !entity.active {
            continue;
        }
        if !placed.contains(&entity.id) {
            entity.kinetic.advance(dt);
        }
        entity.kinetic.age(dt);
        if entity.kinetic.expired() {
            expired.push(entity.id);
        }
    }
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use lina::{Point2, Vec2};

    #[test]
    fn moves_unplaced_entities_only() {
        let mut scene = Scene::new();
        for id in 1..=2 {
            scene.spawn(
                Entity::new(EntityId(id))
                    .with_motion(Point2::ORIGIN, Vec2::new(2.0, -1.0))
                    .unwrap(),
            );
        }
        let placed: HashSet<_> = [EntityId(2)].into_iter().collect();
        integrate(&mut scene, 0.5, &placed);
        assert_eq!(scene.get(EntityId(1)).unwrap().pos(), Point2::new(1.0, -0.5));
        assert_eq!(scene.get(EntityId(2)).unwrap().pos(), Point2::ORIGIN);
    }

    #[test]
    fn reports_expired_and_skips_inactive() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_ttl(0.1).with_spin(1.0));
        let mut idle = Entity::new(EntityId(2)).with_ttl(0.1);
        idle.active = false;
        scene.spawn(idle);

        assert!(integrate(&mut scene, 0.06, &HashSet::new()).is_empty());
        assert_eq!(integrate(&mut scene, 0.06, &HashSet::new()), vec![EntityId(1)]);
        assert!((scene.get(EntityId(1)).unwrap().kinetic.orientation - 0.12).abs() < 1e-12);
        assert_eq!(scene.get(EntityId(2)).unwrap().kinetic.ttl, Some(0.1));
    }
}
