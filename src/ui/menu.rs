//! Menu selection model
//!
//! A menu is a title and a list of option labels with one selected entry.
//! Up/W and Down/S move the selection with wraparound, Enter picks it and
//! Escape backs out.

use crate::platform::Key;
use crate::settings::{MAX_PLAYERS, Settings};

/// Result of feeding a key to a menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    Select(usize),
    Back,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub title: String,
    pub items: Vec<String>,
    pub selected: usize,
}

impl Menu {
    pub fn new(title: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            title: title.into(),
            items,
            selected: 0,
        }
    }

    /// Replace the labels, keeping the selection where possible
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn handle_key(&mut self, key: Key) -> MenuAction {
        let count = self.items.len();
        if count == 0 {
            return match key {
                Key::Escape => MenuAction::Back,
                _ => MenuAction::None,
            };
        }
        match key {
            Key::Up | Key::Char('w') => {
                self.selected = (self.selected + count - 1) % count;
                MenuAction::None
            }
            Key::Down | Key::Char('s') => {
                self.selected = (self.selected + 1) % count;
                MenuAction::None
            }
            Key::Enter => MenuAction::Select(self.selected),
            Key::Escape => MenuAction::Back,
            _ => MenuAction::None,
        }
    }
}

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Play,
    Options,
    Exit,
}

impl MainChoice {
    pub const ALL: [MainChoice; 3] = [MainChoice::Play, MainChoice::Options, MainChoice::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            MainChoice::Play => "Play",
            MainChoice::Options => "Options",
            MainChoice::Exit => "Exit",
        }
    }
}

pub fn main_menu() -> Menu {
    Menu::new(
        "THE RNG",
        MainChoice::ALL.iter().map(|c| c.label().to_string()).collect(),
    )
}

/// Entries of the options menu; the player slots only exist in hotseat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsChoice {
    Hitboxes,
    Hotseat,
    PlayerControls(usize),
    Back,
}

/// Map an options menu index to its entry for the current settings
pub fn options_choice(settings: &Settings, index: usize) -> Option<OptionsChoice> {
    match index {
        0 => Some(OptionsChoice::Hitboxes),
        1 => Some(OptionsChoice::Hotseat),
        i if settings.hotseat_multiplayer && i < 2 + MAX_PLAYERS => {
            Some(OptionsChoice::PlayerControls(i - 2))
        }
        i if settings.hotseat_multiplayer && i == 2 + MAX_PLAYERS => Some(OptionsChoice::Back),
        2 if !settings.hotseat_multiplayer => Some(OptionsChoice::Back),
        _ => None,
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Labels of the options menu for the current settings
pub fn options_items(settings: &Settings) -> Vec<String> {
    let mut items = vec![
        format!("Show hitboxes {}", on_off(settings.show_hitboxes)),
        format!("Hotseat multiplayer {}", on_off(settings.hotseat_multiplayer)),
    ];
    if settings.hotseat_multiplayer {
        for (i, controls) in settings.player_controls.iter().enumerate() {
            items.push(match controls {
                Some(scheme) => format!("Player {} controls = {}", i + 1, scheme.as_str()),
                None => format!("Player {} Not Playing", i + 1),
            });
        }
    }
    items.push("Back".to_string());
    items
}

pub fn options_menu(settings: &Settings) -> Menu {
    Menu::new("Options", options_items(settings))
}
