//! Boss systems - lifecycle commands and per-frame pattern driving.

use bevy::prelude::*;

use super::components::{Boss, BossController, BossPrefabs, BossRng};
use super::host::{PatternContext, PatternHost, SpawnPoint};
use super::scheduler::{BossState, PatternScheduler};
use crate::core::{BossAction, BossCommand, BossPatternChanged};
use crate::projectiles::{spawn_marker, spawn_projectile, ProjectileLaunch, TelegraphMarker};

/// World positions of a boss's wired references, read once per update.
#[derive(Debug, Default, Clone, Copy)]
struct AnchorPositions {
    left: Option<Vec3>,
    right: Option<Vec3>,
    center: Option<Vec3>,
    player: Option<Vec3>,
}

impl AnchorPositions {
    fn resolve(controller: &BossController, transforms: &Query<&GlobalTransform>) -> Self {
        let position = |entity: Option<Entity>| {
            transforms
                .get(entity?)
                .ok()
                .map(GlobalTransform::translation)
        };
        Self {
            left: position(controller.spawn_point(SpawnPoint::Left)),
            right: position(controller.spawn_point(SpawnPoint::Right)),
            center: position(controller.spawn_point(SpawnPoint::Center)),
            player: position(controller.player),
        }
    }
}

/// [`PatternHost`] backed by the ECS for one boss.
struct EcsHost<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    boss: Entity,
    anchors: AnchorPositions,
    prefabs: &'a BossPrefabs,
}

impl PatternHost for EcsHost<'_, '_, '_> {
    fn spawn_point(&self, point: SpawnPoint) -> Option<Vec3> {
        match point {
            SpawnPoint::Left => self.anchors.left,
            SpawnPoint::Right => self.anchors.right,
            SpawnPoint::Center => self.anchors.center,
        }
    }

    fn player_position(&self) -> Option<Vec3> {
        self.anchors.player
    }

    fn spawn_projectile(&mut self, launch: ProjectileLaunch) -> Option<Entity> {
        let template = self.prefabs.projectile(launch.kind)?;
        Some(spawn_projectile(self.commands, launch, template))
    }

    fn spawn_marker(&mut self, position: Vec3) -> Option<Entity> {
        let template = self.prefabs.warning.as_ref()?;
        Some(spawn_marker(self.commands, self.boss, position, template))
    }

    fn despawn(&mut self, entity: Entity) {
        if let Some(mut entity_commands) = self.commands.get_entity(entity) {
            entity_commands.despawn_recursive();
        }
    }
}

type BossQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut PatternScheduler,
        &'static BossController,
        &'static BossPrefabs,
        &'static mut Transform,
    ),
    With<Boss>,
>;

fn report_change(
    boss: Entity,
    from: BossState,
    to: BossState,
    changes: &mut EventWriter<BossPatternChanged>,
) {
    if from != to {
        info!("Boss {:?}: {:?} -> {:?}", boss, from, to);
        changes.send(BossPatternChanged { boss, from, to });
    }
}

/// Start bosses that just appeared, if they are set to start on their own.
pub fn start_new_bosses(
    mut commands: Commands,
    anchors: Query<&GlobalTransform>,
    mut bosses: Query<
        (Entity, &mut PatternScheduler, &BossController, &BossPrefabs),
        (With<Boss>, Added<PatternScheduler>),
    >,
) {
    for (entity, mut scheduler, controller, prefabs) in bosses.iter_mut() {
        if !controller.auto_start {
            continue;
        }

        let mut host = EcsHost {
            commands: &mut commands,
            boss: entity,
            anchors: AnchorPositions::resolve(controller, &anchors),
            prefabs,
        };
        scheduler.start(&mut host);
        info!("Boss {:?} started", entity);
    }
}

/// Apply start/stop requests from the rest of the game.
pub fn handle_boss_commands(
    mut commands: Commands,
    mut requests: EventReader<BossCommand>,
    anchors: Query<&GlobalTransform>,
    mut bosses: BossQuery,
    mut changes: EventWriter<BossPatternChanged>,
) {
    for request in requests.read() {
        let Ok((entity, mut scheduler, controller, prefabs, mut transform)) = bosses.get_mut(request.boss)
        else {
            warn!("Boss command for unknown entity {:?}", request.boss);
            continue;
        };

        let before = scheduler.state();
        let mut host = EcsHost {
            commands: &mut commands,
            boss: entity,
            anchors: AnchorPositions::resolve(controller, &anchors),
            prefabs,
        };

        match request.action {
            BossAction::Start => scheduler.start(&mut host),
            BossAction::Stop => scheduler.stop(&mut host),
        }
        info!("Boss {:?}: {:?}", entity, request.action);

        transform.translation = scheduler.position();
        report_change(entity, before, scheduler.state(), &mut changes);
    }
}

/// Step every boss's scheduler by this frame's delta.
pub fn drive_boss_patterns(
    mut commands: Commands,
    time: Res<Time>,
    anchors: Query<&GlobalTransform>,
    mut bosses: Query<
        (
            Entity,
            &mut PatternScheduler,
            &BossController,
            &BossPrefabs,
            &mut BossRng,
            &mut Transform,
        ),
        With<Boss>,
    >,
    mut changes: EventWriter<BossPatternChanged>,
) {
    for (entity, mut scheduler, controller, prefabs, mut rng, mut transform) in bosses.iter_mut() {
        if !scheduler.is_running() {
            continue;
        }

        let before = scheduler.state();
        let mut host = EcsHost {
            commands: &mut commands,
            boss: entity,
            anchors: AnchorPositions::resolve(controller, &anchors),
            prefabs,
        };
        let mut cx = PatternContext::new(&mut host, &mut *rng);
        scheduler.tick(time.delta(), &mut cx);

        transform.translation = scheduler.position();
        report_change(entity, before, scheduler.state(), &mut changes);
    }
}

/// Release telegraph markers whose boss is gone.
///
/// A despawned boss never gets to stop its bombardment, so its pending
/// markers are cleaned up here instead.
pub fn release_orphaned_markers(
    mut commands: Commands,
    markers: Query<(Entity, &TelegraphMarker)>,
    schedulers: Query<(), With<PatternScheduler>>,
) {
    for (entity, marker) in markers.iter() {
        if !schedulers.contains(marker.owner) {
            debug!("Releasing marker {:?} of missing boss {:?}", entity, marker.owner);
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::event::Events;
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::boss::config::BossConfig;
    use crate::projectiles::{PrefabTemplate, Projectile, TelegraphMarker};

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.init_resource::<Events<BossCommand>>();
        world.init_resource::<Events<BossPatternChanged>>();
        world
    }

    fn spawn_test_boss(world: &mut World, prefabs: BossPrefabs) -> Entity {
        let left = world
            .spawn(GlobalTransform::from_translation(Vec3::new(-2.0, 0.0, 10.0)))
            .id();
        let right = world
            .spawn(GlobalTransform::from_translation(Vec3::new(2.0, 0.0, 10.0)))
            .id();
        let player = world
            .spawn(GlobalTransform::from_translation(Vec3::new(0.0, 0.0, -10.0)))
            .id();

        world
            .spawn((
                Boss,
                PatternScheduler::new(BossConfig::default(), Vec3::new(0.0, 0.0, 10.0)),
                BossController {
                    fire_left: Some(left),
                    fire_right: Some(right),
                    fire_center: None,
                    player: Some(player),
                    auto_start: true,
                },
                prefabs,
                BossRng::new(Some(3)),
                Transform::from_xyz(0.0, 0.0, 10.0),
            ))
            .id()
    }

    fn step(world: &mut World, millis: u64) {
        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(millis));
        let _ = world.run_system_once(drive_boss_patterns);
    }

    fn with_bullets() -> BossPrefabs {
        BossPrefabs {
            bullet: Some(PrefabTemplate::default()),
            ..default()
        }
    }

    #[test]
    fn auto_start_then_side_fire_spawns_bullets() {
        let mut world = world();
        let boss = spawn_test_boss(&mut world, with_bullets());

        let _ = world.run_system_once(start_new_bosses);
        assert!(world.get::<PatternScheduler>(boss).unwrap().is_running());

        step(&mut world, 500);
        let scheduler = world.get::<PatternScheduler>(boss).unwrap();
        assert_eq!(scheduler.state(), BossState::Pattern1);

        let mut bullets = world.query::<&Projectile>();
        assert_eq!(bullets.iter(&world).count(), 2);

        let changes = world.resource::<Events<BossPatternChanged>>();
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn missing_template_spawns_nothing() {
        let mut world = world();
        let boss = spawn_test_boss(&mut world, BossPrefabs::default());
        let _ = world.run_system_once(start_new_bosses);

        step(&mut world, 1000);
        assert_eq!(
            world.get::<PatternScheduler>(boss).unwrap().state(),
            BossState::Pattern1
        );
        let mut bullets = world.query::<&Projectile>();
        assert_eq!(bullets.iter(&world).count(), 0);
    }

    #[test]
    fn stop_command_goes_idle_and_clears_markers() {
        let mut world = world();
        let prefabs = BossPrefabs {
            warning: Some(PrefabTemplate::default()),
            ..default()
        };
        let boss = spawn_test_boss(&mut world, prefabs);
        let _ = world.run_system_once(start_new_bosses);

        // Pattern3 begins at 7.5s with default tunables
        for _ in 0..76 {
            step(&mut world, 100);
        }
        assert_eq!(
            world.get::<PatternScheduler>(boss).unwrap().state(),
            BossState::Pattern3
        );
        let mut markers = world.query::<&TelegraphMarker>();
        assert_eq!(markers.iter(&world).count(), 6);

        world.send_event(BossCommand::stop(boss));
        let _ = world.run_system_once(handle_boss_commands);

        assert_eq!(
            world.get::<PatternScheduler>(boss).unwrap().state(),
            BossState::Idle
        );
        assert_eq!(markers.iter(&world).count(), 0);
    }

    #[test]
    fn despawned_boss_leaves_no_markers_behind() {
        let mut world = world();
        let prefabs = BossPrefabs {
            warning: Some(PrefabTemplate::default()),
            ..default()
        };
        let boss = spawn_test_boss(&mut world, prefabs);
        let _ = world.run_system_once(start_new_bosses);

        for _ in 0..76 {
            step(&mut world, 100);
        }
        let mut markers = world.query::<&TelegraphMarker>();
        assert_eq!(markers.iter(&world).count(), 6);
        assert!(markers.iter(&world).all(|marker| marker.owner == boss));

        // Markers of a live boss are left alone
        let _ = world.run_system_once(release_orphaned_markers);
        assert_eq!(markers.iter(&world).count(), 6);

        world.despawn(boss);
        let _ = world.run_system_once(release_orphaned_markers);
        assert_eq!(markers.iter(&world).count(), 0);
    }

    #[test]
    fn command_for_unknown_entity_is_ignored() {
        let mut world = world();
        world.send_event(BossCommand::start(Entity::from_raw(999)));
        let _ = world.run_system_once(handle_boss_commands);
    }
}
