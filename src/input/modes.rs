//! Input Modes
//!
//! Which layer of the screen currently receives key events.

/// Input mode enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Dashboard navigation
    Normal,
    /// Login modal is open
    Login,
}

impl InputMode {
    /// Get mode indicator for status line
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Login => "LOGIN",
        }
    }
}
