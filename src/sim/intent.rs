//! Player controls and per-frame movement intent
//!
//! The simulation never sees keys. The platform layer turns held keys into
//! one `Intent` per control scheme, and each player reads the intent of the
//! scheme it is assigned to.

use serde::{Deserialize, Serialize};

/// A set of four directional keys one player steers with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlScheme {
    Wasd,
    Arrows,
    Tfgh,
    Ijkl,
    Numpad,
}

impl ControlScheme {
    pub const COUNT: usize = 5;

    pub const ALL: [ControlScheme; Self::COUNT] = [
        ControlScheme::Wasd,
        ControlScheme::Arrows,
        ControlScheme::Tfgh,
        ControlScheme::Ijkl,
        ControlScheme::Numpad,
    ];

    pub fn index(self) -> usize {
        match self {
            ControlScheme::Wasd => 0,
            ControlScheme::Arrows => 1,
            ControlScheme::Tfgh => 2,
            ControlScheme::Ijkl => 3,
            ControlScheme::Numpad => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Wasd => "wasd",
            ControlScheme::Arrows => "arrows",
            ControlScheme::Tfgh => "tfgh",
            ControlScheme::Ijkl => "ijkl",
            ControlScheme::Numpad => "numpad",
        }
    }
}

/// Which keys a player responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controls {
    /// Single-player: every scheme steers the one player
    All,
    Scheme(ControlScheme),
}

/// Directional input held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Intent {
    /// Horizontal axis: -1, 0 or 1
    pub fn axis_x(&self) -> f32 {
        self.right as i32 as f32 - self.left as i32 as f32
    }

    /// Vertical axis (screen space, down is positive): -1, 0 or 1
    pub fn axis_y(&self) -> f32 {
        self.down as i32 as f32 - self.up as i32 as f32
    }

    pub fn union(self, other: Intent) -> Intent {
        Intent {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Intent per control scheme, indexed by `ControlScheme::index`
    pub schemes: [Intent; ControlScheme::COUNT],
}

impl TickInput {
    /// Intent for a player with the given controls
    pub fn intent_for(&self, controls: Controls) -> Intent {
        match controls {
            Controls::All => self
                .schemes
                .iter()
                .fold(Intent::default(), |acc, i| acc.union(*i)),
            Controls::Scheme(scheme) => self.schemes[scheme.index()],
        }
    }

    pub fn set(&mut self, scheme: ControlScheme, intent: Intent) {
        self.schemes[scheme.index()] = intent;
    }
}
