//! Projectile and marker spawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{PrefabTemplate, Projectile, ProjectileLaunch, TelegraphMarker};

/// Spawn a projectile from a launch request.
///
/// Projectiles are kinematic sensors: they never push anything, but the
/// physics world still reports what they pass through.
pub fn spawn_projectile(commands: &mut Commands, launch: ProjectileLaunch, template: &PrefabTemplate) -> Entity {
    let transform = Transform::from_translation(launch.origin)
        .looking_to(launch.direction, Vec3::Y)
        .with_scale(Vec3::splat(template.scale));

    commands
        .spawn((
            Projectile::from_launch(&launch),
            transform,
            RigidBody::KinematicPositionBased,
            Collider::ball(template.collider_radius),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default()
                | ActiveCollisionTypes::KINEMATIC_KINEMATIC
                | ActiveCollisionTypes::KINEMATIC_STATIC,
        ))
        .id()
}

/// Spawn a telegraph marker. Markers have no collider interaction; the
/// sensor only gives them a shape for debug rendering.
pub fn spawn_marker(
    commands: &mut Commands,
    owner: Entity,
    position: Vec3,
    template: &PrefabTemplate,
) -> Entity {
    commands
        .spawn((
            TelegraphMarker { owner },
            Transform::from_translation(position).with_scale(Vec3::splat(template.scale)),
            Collider::cylinder(0.05, template.collider_radius),
            Sensor,
        ))
        .id()
}
