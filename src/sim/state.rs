//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; there is no process-wide
//! state, so a run can be built and stepped from a test.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::intent::{Controls, Intent};
use super::kinematics::{Movement, SteerContext, Steering};
use super::rect::Rect;
use super::spawner::Spawner;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Every player has been hit
    GameOver,
}

/// Things that happened during a tick, drained by the app layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlayerDown { slot: usize },
    GameOver { score: u64, level: u32 },
}

/// A player-controlled dodger
#[derive(Debug, Clone)]
pub struct Player {
    /// 1-based player number (hotseat slot)
    pub slot: usize,
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement applied per frame
    pub vel: Vec2,
    pub size: Vec2,
    pub intent: Intent,
    pub controls: Controls,
}

impl Player {
    pub fn new(slot: usize, controls: Controls) -> Self {
        Self {
            slot,
            pos: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            intent: Intent::default(),
            controls,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Cosmetic rotation applied at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    /// Quarter turns lay the sprite on its side
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Rotation::Quarter | Rotation::ThreeQuarter)
    }
}

/// Display color of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    White,
    Red,
}

/// Text an enemy is drawn as
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyLabel {
    pub text: String,
    /// Glyph height in pixels
    pub glyph_size: f32,
}

impl EnemyLabel {
    /// Glyph width relative to its height
    const GLYPH_ASPECT: f32 = 0.6;

    pub fn new(text: impl Into<String>, glyph_size: f32) -> Self {
        Self {
            text: text.into(),
            glyph_size,
        }
    }

    /// Unrotated bounding size of the rendered text
    pub fn extent(&self) -> Vec2 {
        let chars = self.text.chars().count().max(1) as f32;
        Vec2::new(chars * self.glyph_size * Self::GLYPH_ASPECT, self.glyph_size)
    }
}

/// A number drifting across the screen
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per millisecond
    pub vel: Vec2,
    /// Speed scalar fixed at spawn
    pub speed: f32,
    pub size: Vec2,
    pub movement: Movement,
    pub rotation: Rotation,
    pub label: EnemyLabel,
    pub tint: Tint,
}

impl Enemy {
    /// Build an enemy and launch it.
    ///
    /// `targets` are the positions of the players an aimed enemy may pick
    /// from. The launch velocity is computed once here and never re-aimed.
    pub fn spawn(
        pos: Vec2,
        speed: f32,
        label: EnemyLabel,
        movement: Movement,
        rotation: Rotation,
        targets: &[Vec2],
        rng: &mut Pcg32,
    ) -> Self {
        let extent = label.extent();
        let size = if rotation.swaps_axes() {
            Vec2::new(extent.y, extent.x)
        } else {
            extent
        };

        let mut ctx = SteerContext {
            pos,
            speed,
            targets,
            rng,
        };
        let vel = movement.heading.compute_velocity(Vec2::ZERO, &mut ctx);

        Self {
            pos,
            vel,
            speed,
            size,
            movement,
            rotation,
            label,
            tint: Tint::White,
        }
    }

    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Current level (starts at 1)
    pub level: u32,
    /// One point per spawn cycle
    pub score: u64,
    pub phase: GamePhase,
    /// Level and spawn timers
    pub spawner: Spawner,
    pub players: Vec<Player>,
    pub enemies: Vec<Enemy>,
    /// Simulated time since the run started
    pub elapsed_ms: f64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a run with one player per entry in `controls`.
    ///
    /// An empty slice still yields a single player on every scheme, so a
    /// run never starts without players.
    pub fn new(seed: u64, controls: &[Controls]) -> Self {
        let players: Vec<Player> = if controls.is_empty() {
            vec![Player::new(1, Controls::All)]
        } else {
            controls
                .iter()
                .enumerate()
                .map(|(i, c)| Player::new(i + 1, *c))
                .collect()
        };

        log::debug!("New run: seed {}, {} player(s)", seed, players.len());

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            score: 0,
            phase: GamePhase::Running,
            spawner: Spawner::new(),
            players,
            enemies: Vec::new(),
            elapsed_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Single-player run
    pub fn single(seed: u64) -> Self {
        Self::new(seed, &[Controls::All])
    }

    /// Positions aimed enemies may target
    pub fn player_positions(&self) -> Vec<Vec2> {
        self.players.iter().map(|p| p.pos).collect()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
