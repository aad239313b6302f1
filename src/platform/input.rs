//! Keyboard model
//!
//! Terminals differ in what they report. Terminals with keyboard
//! enhancement send press, repeat and release events, so a key is held until
//! its release. Classic ones only send presses (key repeat shows up as more
//! presses), so there a key counts as held for a window after it was last
//! seen. The window has to outlast the initial repeat delay, not just the
//! repeat interval.

use std::collections::HashMap;

use crate::sim::{ControlScheme, Intent, TickInput};

/// A key the game cares about, independent of the terminal library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Letter or digit on the main block, lowercased
    Char(char),
    /// Digit on the numeric keypad
    Keypad(u8),
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
    F(u8),
}

/// Directional keys of a scheme, in left, right, up, down order
pub fn bindings(scheme: ControlScheme) -> [Key; 4] {
    match scheme {
        ControlScheme::Wasd => [Key::Char('a'), Key::Char('d'), Key::Char('w'), Key::Char('s')],
        ControlScheme::Arrows => [Key::Left, Key::Right, Key::Up, Key::Down],
        ControlScheme::Tfgh => [Key::Char('f'), Key::Char('h'), Key::Char('t'), Key::Char('g')],
        ControlScheme::Ijkl => [Key::Char('j'), Key::Char('l'), Key::Char('i'), Key::Char('k')],
        ControlScheme::Numpad => [Key::Keypad(4), Key::Keypad(6), Key::Keypad(8), Key::Keypad(2)],
    }
}

/// Keys currently held down, tracked per frame
#[derive(Debug, Clone)]
pub struct HeldKeys {
    /// Frame each key was last pressed or repeated
    last_seen: HashMap<Key, u64>,
    frame: u64,
    /// Frames a key stays held without a fresh press or repeat
    hold_window: u64,
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOLD_WINDOW)
    }
}

impl HeldKeys {
    /// About 600 ms at 60 FPS, covering the usual initial repeat delay
    pub const DEFAULT_HOLD_WINDOW: u64 = 36;

    pub fn new(hold_window: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            frame: 0,
            hold_window,
        }
    }

    /// For terminals that report releases: keys never expire on their own
    pub fn until_release() -> Self {
        Self::new(u64::MAX)
    }

    /// Pick the mode matching what the terminal reports
    pub fn for_terminal(releases_reported: bool) -> Self {
        if releases_reported {
            Self::until_release()
        } else {
            Self::default()
        }
    }

    /// Start a new frame
    pub fn next_frame(&mut self) {
        self.frame += 1;
        let frame = self.frame;
        let window = self.hold_window;
        self.last_seen
            .retain(|_, last| frame.saturating_sub(*last) <= window);
    }

    /// Record a press or repeat
    pub fn press(&mut self, key: Key) {
        self.last_seen.insert(key, self.frame);
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    /// Intent of one control scheme
    pub fn intent(&self, scheme: ControlScheme) -> Intent {
        let [left, right, up, down] = bindings(scheme);
        Intent {
            left: self.is_held(left),
            right: self.is_held(right),
            up: self.is_held(up),
            down: self.is_held(down),
        }
    }

    /// Intent of every scheme for this frame
    pub fn tick_input(&self) -> TickInput {
        let mut input = TickInput::default();
        for scheme in ControlScheme::ALL {
            input.set(scheme, self.intent(scheme));
        }
        input
    }
}
