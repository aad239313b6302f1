//! Platform abstraction layer
//!
//! Handles the parts of the outside world the simulation must not see:
//! - Keys and what each control scheme binds them to
//! - Which keys are currently held
//! - Frame timing

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{HeldKeys, Key, bindings};
