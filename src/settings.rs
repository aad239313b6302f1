//! Game settings and preferences
//!
//! Everything the options menu can change, plus the in-game debug toggles.
//! Persisted as JSON in the data directory.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};
use crate::sim::{ControlScheme, Controls};

/// Number of hotseat player slots
pub const MAX_PLAYERS: usize = 4;

/// Order the options menu steps through when a slot is selected.
/// `None` means the slot is not playing.
const CONTROL_CYCLE: [Option<ControlScheme>; ControlScheme::COUNT + 1] = [
    Some(ControlScheme::Wasd),
    Some(ControlScheme::Arrows),
    Some(ControlScheme::Tfgh),
    Some(ControlScheme::Ijkl),
    Some(ControlScheme::Numpad),
    None,
];

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shade enemy boxes and outline player hitboxes (F4)
    pub show_hitboxes: bool,
    /// FPS, frame time and enemy count overlay (F3)
    pub show_debug: bool,
    /// Several players share the keyboard
    pub hotseat_multiplayer: bool,
    /// Scheme per hotseat slot, `None` if the slot sits out
    pub player_controls: [Option<ControlScheme>; MAX_PLAYERS],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hitboxes: false,
            show_debug: false,
            hotseat_multiplayer: false,
            player_controls: [
                Some(ControlScheme::Wasd),
                Some(ControlScheme::Arrows),
                Some(ControlScheme::Tfgh),
                Some(ControlScheme::Ijkl),
            ],
        }
    }
}

impl Settings {
    /// File name inside the data directory
    pub const FILE_NAME: &'static str = "settings.json";

    /// Controls of every player taking part in the next run.
    ///
    /// Single-player always yields one player on all schemes. Hotseat with
    /// every slot sitting out falls back to the same.
    pub fn active_controls(&self) -> Vec<Controls> {
        if !self.hotseat_multiplayer {
            return vec![Controls::All];
        }
        let controls: Vec<Controls> = self
            .player_controls
            .iter()
            .flatten()
            .map(|scheme| Controls::Scheme(*scheme))
            .collect();
        if controls.is_empty() {
            vec![Controls::All]
        } else {
            controls
        }
    }

    /// Step a slot one place back through the scheme list, wrapping
    pub fn cycle_controls(&mut self, slot: usize) {
        let Some(current) = self.player_controls.get(slot).copied() else {
            return;
        };
        let index = CONTROL_CYCLE
            .iter()
            .position(|c| *c == current)
            .unwrap_or(0);
        let prev = (index + CONTROL_CYCLE.len() - 1) % CONTROL_CYCLE.len();
        self.player_controls[slot] = CONTROL_CYCLE[prev];
    }

    pub fn toggle_hitboxes(&mut self) {
        self.show_hitboxes = !self.show_hitboxes;
    }

    pub fn toggle_debug(&mut self) {
        self.show_debug = !self.show_debug;
    }

    pub fn toggle_hotseat(&mut self) {
        self.hotseat_multiplayer = !self.hotseat_multiplayer;
    }

    /// Load settings from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match persistence::load_json(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) if err.is_not_found() => {
                log::info!("No settings found, using defaults");
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not read settings ({}), using defaults", err);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
