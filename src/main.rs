//! Boss Barrage - Entry Point
//!
//! Spawns the shipped boss facing a stationary target and lets it run its
//! pattern cycle.
//!
//! Controls:
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use boss_barrage::boss::{spawn_boss, BossRegistry};
use boss_barrage::core::GameState;
use boss_barrage::BossBarragePlugin;

/// Registry key of the boss spawned on entering the game.
const DEMO_BOSS: &str = "boss_ship";

/// Marker for the stand-in player the boss aims at.
#[derive(Component)]
struct Target;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Boss Barrage".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics, debug rendered since projectiles have no meshes
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(RapierDebugRenderPlugin::default())

        .add_plugins(BossBarragePlugin)
        .add_plugins(ArenaPlugin)

        .run();
}

/// Demo arena: camera, light, target and the shipped boss.
struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        // Only on leaving Loading; returning from Paused re-enters InGame too
        app.add_systems(
            OnTransition {
                exited: GameState::Loading,
                entered: GameState::InGame,
            },
            setup_arena,
        );
    }
}

fn setup_arena(mut commands: Commands, registry: Res<BossRegistry>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 22.0, -38.0).looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            ..default()
        },
        Transform::from_xyz(4.0, 12.0, -6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let target = commands
        .spawn((
            Target,
            Name::new("Target"),
            Transform::from_xyz(0.0, 1.0, -20.0),
            Collider::capsule_y(0.6, 0.4),
            RigidBody::Fixed,
        ))
        .id();

    let Some(definition) = registry.get(DEMO_BOSS) else {
        warn!("No '{}' boss definition loaded, arena left empty", DEMO_BOSS);
        return;
    };
    spawn_boss(&mut commands, definition, Some(target));
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;
    use boss_barrage::boss::{Boss, BossDefinition};
    use boss_barrage::core::CorePlugin;

    use super::*;

    fn count_bosses(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query_filtered::<Entity, With<Boss>>().iter(world).count()
    }

    fn enter(app: &mut App, state: GameState) {
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(state);
        app.update();
        assert_eq!(*app.world().resource::<State<GameState>>().get(), state);
    }

    #[test]
    fn pausing_does_not_respawn_the_arena() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, CorePlugin, ArenaPlugin));

        let mut registry = BossRegistry::default();
        registry
            .definitions
            .insert(DEMO_BOSS.to_string(), BossDefinition::default());
        app.insert_resource(registry);

        // Loading hands over to InGame on its own
        for _ in 0..3 {
            app.update();
        }
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::InGame
        );
        assert_eq!(count_bosses(&mut app), 1);

        for _ in 0..2 {
            enter(&mut app, GameState::Paused);
            enter(&mut app, GameState::InGame);
        }
        assert_eq!(count_bosses(&mut app), 1);
    }
}
