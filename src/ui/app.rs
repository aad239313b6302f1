//! Screen flow
//!
//! The app owns everything that outlives a run (settings, high scores, the
//! menu backdrop) plus the current run, and moves between screens:
//!
//! ```text
//! MainMenu --Play--> Running --all players hit--> GameOver --Enter--> MainMenu
//!    |  ^               |
//!    |  |               +--Escape--> MainMenu
//!    v  |
//!   Options
//! ```

use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::menu::{
    MainChoice, Menu, MenuAction, OptionsChoice, main_menu, options_choice, options_items,
    options_menu,
};
use crate::consts::GAME_OVER_GUARD_MS;
use crate::highscores::HighScores;
use crate::persistence;
use crate::platform::Key;
use crate::settings::Settings;
use crate::sim::{Backdrop, GameEvent, GameState, TickInput, tick};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Options,
    Running,
    GameOver,
}

/// Where settings and high scores live on disk
#[derive(Debug, Clone)]
pub struct Storage {
    pub highscores: PathBuf,
    pub settings: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            highscores: persistence::data_path(HighScores::FILE_NAME),
            settings: persistence::data_path(Settings::FILE_NAME),
        }
    }
}

/// Results shown on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverReport {
    pub score: u64,
    pub level: u32,
    /// 1-indexed place in the high score table, if the score made it
    pub rank: Option<usize>,
}

pub struct App {
    pub screen: Screen,
    pub settings: Settings,
    pub highscores: HighScores,
    pub main_menu: Menu,
    pub options_menu: Menu,
    /// Numbers scrolling behind the menus
    pub backdrop: Backdrop,
    /// Current run, kept through the game over screen
    pub game: Option<GameState>,
    pub report: Option<GameOverReport>,
    /// Slots of the players hit so far this run, in order
    pub fallen: Vec<usize>,
    /// Time spent on the game over screen
    game_over_ms: f32,
    storage: Storage,
    rng: Pcg32,
    quit: bool,
}

impl App {
    /// Load settings and high scores from `storage` and open the main menu
    pub fn new(storage: Storage, seed: u64) -> Self {
        let settings = Settings::load_from(&storage.settings);
        let highscores = HighScores::load_from(&storage.highscores);
        let options_menu = options_menu(&settings);
        Self {
            screen: Screen::MainMenu,
            settings,
            highscores,
            main_menu: main_menu(),
            options_menu,
            backdrop: Backdrop::new(),
            game: None,
            report: None,
            fallen: Vec::new(),
            game_over_ms: 0.0,
            storage,
            rng: Pcg32::seed_from_u64(seed),
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Leave from any screen, e.g. on Ctrl+C
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Whether the game over screen accepts confirmation yet
    pub fn game_over_ready(&self) -> bool {
        self.screen == Screen::GameOver && self.game_over_ms >= GAME_OVER_GUARD_MS
    }

    /// Handle a single key press
    pub fn handle_key(&mut self, key: Key) {
        match self.screen {
            Screen::MainMenu => match self.main_menu.handle_key(key) {
                MenuAction::Select(i) => match MainChoice::ALL.get(i) {
                    Some(MainChoice::Play) => self.start_run(),
                    Some(MainChoice::Options) => self.open_options(),
                    Some(MainChoice::Exit) => self.quit = true,
                    None => {}
                },
                MenuAction::Back => self.quit = true,
                MenuAction::None => {}
            },
            Screen::Options => match self.options_menu.handle_key(key) {
                MenuAction::Select(i) => self.apply_option(i),
                MenuAction::Back => self.close_options(),
                MenuAction::None => {}
            },
            Screen::Running => match key {
                Key::Escape => {
                    log::info!("Run abandoned");
                    self.game = None;
                    self.to_main_menu();
                }
                Key::F(3) => self.settings.toggle_debug(),
                Key::F(4) => self.settings.toggle_hitboxes(),
                _ => {}
            },
            Screen::GameOver => {
                if self.game_over_ready() && matches!(key, Key::Enter | Key::Escape) {
                    self.highscores.save_to(&self.storage.highscores).unwrap_or_else(|err| {
                        log::error!("Could not save high scores: {}", err);
                    });
                    self.game = None;
                    self.report = None;
                    self.to_main_menu();
                }
            }
        }
    }

    /// Advance the current screen by one frame
    pub fn frame(&mut self, input: &TickInput, elapsed_ms: f32) {
        match self.screen {
            Screen::MainMenu | Screen::Options => {
                self.backdrop.update(elapsed_ms, &mut self.rng);
            }
            Screen::Running => {
                let Some(game) = self.game.as_mut() else {
                    self.to_main_menu();
                    return;
                };
                tick(game, input, elapsed_ms);
                let mut finished = None;
                for event in game.drain_events() {
                    match event {
                        GameEvent::PlayerDown { slot } => self.fallen.push(slot),
                        GameEvent::GameOver { score, level } => finished = Some((score, level)),
                    }
                }
                if let Some((score, level)) = finished {
                    self.finish_run(score, level);
                }
            }
            Screen::GameOver => {
                self.game_over_ms += elapsed_ms;
            }
        }
    }

    /// Persist everything before the process exits
    pub fn shutdown(&self) {
        if let Err(err) = self.highscores.save_to(&self.storage.highscores) {
            log::error!("Could not save high scores: {}", err);
        }
        if let Err(err) = self.settings.save_to(&self.storage.settings) {
            log::error!("Could not save settings: {}", err);
        }
    }

    fn start_run(&mut self) {
        let seed = self.rng.random::<u64>();
        let controls = self.settings.active_controls();
        log::info!("Starting run with {} player(s)", controls.len());
        self.game = Some(GameState::new(seed, &controls));
        self.report = None;
        self.fallen.clear();
        self.screen = Screen::Running;
    }

    fn finish_run(&mut self, score: u64, level: u32) {
        let rank = self.highscores.add_score(score);
        match rank {
            Some(rank) => log::info!("Score {} ranks #{}", score, rank),
            None => log::info!("Score {} did not make the table", score),
        }
        self.report = Some(GameOverReport { score, level, rank });
        self.game_over_ms = 0.0;
        self.screen = Screen::GameOver;
    }

    fn open_options(&mut self) {
        self.options_menu = options_menu(&self.settings);
        self.screen = Screen::Options;
    }

    fn close_options(&mut self) {
        if let Err(err) = self.settings.save_to(&self.storage.settings) {
            log::error!("Could not save settings: {}", err);
        }
        self.screen = Screen::MainMenu;
    }

    fn apply_option(&mut self, index: usize) {
        match options_choice(&self.settings, index) {
            Some(OptionsChoice::Hitboxes) => self.settings.toggle_hitboxes(),
            Some(OptionsChoice::Hotseat) => self.settings.toggle_hotseat(),
            Some(OptionsChoice::PlayerControls(slot)) => self.settings.cycle_controls(slot),
            Some(OptionsChoice::Back) => {
                self.close_options();
                return;
            }
            None => return,
        }
        self.options_menu.set_items(options_items(&self.settings));
    }

    fn to_main_menu(&mut self) {
        self.backdrop.clear();
        self.main_menu.selected = 0;
        self.screen = Screen::MainMenu;
    }
}
