//! Boss plugin - registers definition loading and the scheduler systems.

use bevy::prelude::*;

use super::data::{load_boss_definitions, BossRegistry};
use super::systems;
use crate::core::GameState;

/// Boss plugin - loads definitions and drives every boss's pattern cycle.
pub struct BossPlugin;

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BossRegistry>()
            // Definitions must be available before the game state is entered
            .add_systems(Startup, load_boss_definitions)
            // Commands apply before the frame's step so a Stop wins over firing
            .add_systems(
                Update,
                (
                    systems::start_new_bosses,
                    systems::handle_boss_commands,
                    systems::drive_boss_patterns,
                    systems::release_orphaned_markers,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
