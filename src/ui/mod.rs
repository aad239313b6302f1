//! Menus and screen flow
//!
//! Input-driven state with no drawing; the renderer reads it.

pub mod app;
pub mod menu;

pub use app::{App, GameOverReport, Screen, Storage};
pub use menu::{MainChoice, Menu, MenuAction, OptionsChoice};
