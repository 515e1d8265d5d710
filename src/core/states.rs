//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Boss pattern
//! scheduling and projectile motion only run in the InGame state, so
//! pausing freezes every timed activity at once.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while boss definitions are read from disk
/// - Enter `InGame` once loading is done
/// - `Paused` freezes the boss and its projectiles but keeps them visible
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
}
