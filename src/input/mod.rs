//! Input Module
//!
//! Key bindings and input modes.

pub mod keymap;
pub mod modes;

pub use modes::InputMode;
