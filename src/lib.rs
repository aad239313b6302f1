//! The RNG - dodge the numbers
//!
//! Core modules:
//! - `sim`: Simulation (kinematics, spawning, collisions, game state)
//! - `highscores`: Top 10 score table
//! - `settings`: Options menu state
//! - `persistence`: JSON file load/save
//! - `platform`: Keys, control bindings and frame pacing
//! - `ui`: Menus and the screen state machine
//! - `renderer`: Terminal rendering

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
///
/// Distances are in pixels of the logical 640x480 playfield, times in
/// milliseconds and speeds in pixels per millisecond.
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Frame rate cap
    pub const MAX_FPS: u32 = 60;

    /// Player acceleration per millisecond of held input
    pub const PLAYER_SPEED: f32 = 0.025;
    /// Fraction of velocity lost per millisecond
    pub const FRICTION: f32 = 0.00667;
    /// Velocity components below this snap to zero
    pub const VELOCITY_SNAP: f32 = 0.1;
    /// Player sprite size
    pub const PLAYER_SIZE: f32 = 32.0;
    /// Total shrink applied to the player box for collisions (half per side)
    pub const HITBOX_SHRINK: f32 = 14.0;

    /// Enemy speed range
    pub const ENEMY_MIN_SPEED: f32 = 0.01;
    pub const ENEMY_MAX_SPEED: f32 = 0.2;
    /// Enemies are dropped once their right edge is no longer past this x
    pub const ENEMY_DESPAWN_EDGE: f32 = -5.0;

    /// Base spawn delay, divided by sqrt(level)
    pub const ENEMY_SPAWN_DELAY_MS: f32 = 500.0;
    /// Length of a level
    pub const LEVEL_LENGTH_MS: f32 = 6.0 * 1000.0;

    /// Enemies enter this far inside the screen edge
    pub const SPAWN_INSET: f32 = 10.0;
    /// Level banners keep this margin from the top and bottom
    pub const BANNER_MARGIN: f32 = 50.0;
    /// Glyph size of the level banner
    pub const BANNER_GLYPH_SIZE: f32 = 50.0;

    /// Game over screen ignores confirmation for this long
    pub const GAME_OVER_GUARD_MS: f32 = 1000.0;
}

/// Average of the enemy speed range, used for enemies entering from the left
#[inline]
pub fn average_enemy_speed() -> f32 {
    (consts::ENEMY_MIN_SPEED + consts::ENEMY_MAX_SPEED) / 2.0
}
