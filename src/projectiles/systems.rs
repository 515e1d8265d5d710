//! Projectile motion, expiry and contact forwarding.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::Projectile;
use crate::core::ProjectileContact;

/// Move every projectile along its direction and despawn the expired ones.
pub fn advance_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut Projectile)>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut projectile) in query.iter_mut() {
        transform.translation += projectile.advance(dt);

        if projectile.is_expired() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Turn physics contacts involving a projectile into [`ProjectileContact`] events.
pub fn forward_projectile_contacts(
    mut collisions: EventReader<CollisionEvent>,
    projectiles: Query<&Projectile>,
    mut contacts: EventWriter<ProjectileContact>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };

        for (projectile, other) in [(*a, *b), (*b, *a)] {
            if let Ok(p) = projectiles.get(projectile) {
                contacts.send(ProjectileContact {
                    projectile,
                    other,
                    kind: p.kind,
                });
            }
        }
    }
}
