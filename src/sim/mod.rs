//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Time is passed in explicitly (milliseconds per frame)
//! - Seeded RNG only, owned by the game state
//! - Entities are plain data owned by `GameState`

pub mod collision;
pub mod intent;
pub mod kinematics;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{player_hitbox, player_touching_enemy};
pub use intent::{ControlScheme, Controls, Intent, TickInput};
pub use kinematics::{Erratic, Heading, Movement, SteerContext, Steering, apply_friction};
pub use rect::Rect;
pub use spawner::{Backdrop, Spawner, spawn_interval};
pub use state::{Enemy, EnemyLabel, GameEvent, GamePhase, GameState, Player, Rotation, Tint};
pub use tick::tick;
