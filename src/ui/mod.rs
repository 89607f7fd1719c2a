//! UI Module
//!
//! Terminal user interface using ratatui.

pub mod components;
pub mod renderer;
pub mod surface;
pub mod theme;

// Re-exports
pub use renderer::{Renderer, UiState};
pub use surface::TerminalSurface;
pub use theme::ColorScheme;
