//! UI Components
//!
//! Widgets for the dashboard chrome and the login form.

pub mod form;
pub mod input;
pub mod statusline;

// Re-exports
pub use form::SurfaceView;
pub use input::FieldBuffer;
pub use statusline::{HelpBar, MessageType, StatusLine};
