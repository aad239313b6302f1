//! Terminal rendering module
//!
//! The 640x480 game screen is stretched over the terminal grid; numbers are
//! drawn as their text and players as solid blocks.

pub mod terminal;
pub mod viewport;

pub use terminal::{FrameStats, TerminalRenderer};
pub use viewport::{CellRect, Viewport};
