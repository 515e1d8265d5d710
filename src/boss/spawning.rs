//! Boss spawning from a loaded definition.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Boss, BossController, BossRng, FirePoint};
use super::data::BossDefinition;
use super::host::SpawnPoint;
use super::scheduler::PatternScheduler;

/// Spawn a boss and its fire origins.
///
/// `player` is the entity the bombardment aims at. The spawn position is
/// recorded once here; Pattern4 always returns to it.
pub fn spawn_boss(commands: &mut Commands, definition: &BossDefinition, player: Option<Entity>) -> Entity {
    let spawn_pos = Vec3::from(definition.spawn_position);

    let boss = commands
        .spawn((
            Boss,
            Name::new(definition.name.clone()),
            PatternScheduler::new(definition.patterns.clone(), spawn_pos),
            BossRng::new(definition.rng_seed),
            definition.prefabs.clone(),
            Transform::from_translation(spawn_pos),
            Collider::cuboid(1.5, 0.75, 2.0),
            RigidBody::KinematicPositionBased,
        ))
        .id();

    let mut fire_point = |point: SpawnPoint, offset: Option<(f32, f32, f32)>| {
        let offset = offset?;
        let anchor = commands
            .spawn((FirePoint(point), Transform::from_translation(Vec3::from(offset))))
            .id();
        commands.entity(boss).add_child(anchor);
        Some(anchor)
    };

    let offsets = &definition.spawn_points;
    let controller = BossController {
        fire_left: fire_point(SpawnPoint::Left, offsets.left),
        fire_right: fire_point(SpawnPoint::Right, offsets.right),
        fire_center: fire_point(SpawnPoint::Center, offsets.center),
        player,
        auto_start: definition.auto_start,
    };

    for (point, anchor) in [
        (SpawnPoint::Left, controller.fire_left),
        (SpawnPoint::Right, controller.fire_right),
        (SpawnPoint::Center, controller.fire_center),
    ] {
        if anchor.is_none() {
            warn!("{} has no {:?} fire point, shots from it are skipped", definition.name, point);
        }
    }

    commands.entity(boss).insert(controller);

    info!("Spawned boss {} at {:?}", definition.name, spawn_pos);

    boss
}
