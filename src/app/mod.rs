//! Application State
//!
//! Dashboard screen hosting the login modal.

mod config;
mod input;

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use tracing::{info, warn};

use crate::input::InputMode;
use crate::login::{CredentialRecord, LoginModal};
use crate::ui::components::MessageType;
use crate::ui::{ColorScheme, Renderer, TerminalSurface, UiState};

pub use config::{AppConfig, ConfigError, ConfigResult};

pub struct App {
    pub config: AppConfig,
    pub surface: TerminalSurface,
    pub login: LoginModal,
    pub credentials: Option<CredentialRecord>,
    pub message: Option<(String, MessageType, Instant)>,
    pub should_quit: bool,
    dirty: bool,
    /// Frame area of the last draw, for mouse hit-testing
    screen: Rect,
    results: Receiver<CredentialRecord>,
    sender: Sender<CredentialRecord>,
}

impl App {
    pub fn new(config: AppConfig, scheme: ColorScheme) -> Self {
        let (sender, results) = mpsc::channel();

        Self {
            config,
            surface: TerminalSurface::new(scheme),
            login: LoginModal::new(),
            credentials: None,
            message: None,
            should_quit: false,
            dirty: true,
            screen: Rect::default(),
            results,
            sender,
        }
    }

    pub fn mode(&self) -> InputMode {
        if self.login.is_open() {
            InputMode::Login
        } else {
            InputMode::Normal
        }
    }

    pub fn account(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.username.as_str())
    }

    pub fn open_login(&mut self) {
        let sender = self.sender.clone();
        let opened = self.login.open(&mut self.surface, move |record| {
            // the receiver lives as long as the app
            let _ = sender.send(record);
        });

        if let Err(e) = opened {
            warn!("could not open login: {}", e);
            self.set_message(&e.to_string(), MessageType::Error);
        }
        self.dirty = true;
    }

    /// Called once the login session has closed. A delivered record means
    /// the user logged in; no record means the session was cancelled.
    fn finish_login(&mut self) {
        match self.results.try_recv() {
            Ok(record) => {
                info!("dashboard received credentials");
                let msg = format!("Logged in as {}", record.username);
                self.credentials = Some(record);
                self.set_message(&msg, MessageType::Success);
            }
            Err(_) => self.set_message("Login cancelled", MessageType::Info),
        }
    }

    /// Returns whether the screen must be drawn again
    pub fn needs_redraw(&mut self) -> bool {
        self.check_message_expiry();
        let surface_dirty = self.surface.take_dirty();
        std::mem::take(&mut self.dirty) || surface_dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.screen = frame.area();
        let message = self.message.as_ref().map(|(m, t, _)| (m.as_str(), *t));

        let state = UiState {
            mode: self.mode(),
            account: self.account(),
            message,
            surface: &self.surface,
        };

        Renderer::render(frame, &state);
    }

    fn check_message_expiry(&mut self) {
        let timeout = self.config.message_timeout;
        let expired = self
            .message
            .as_ref()
            .is_some_and(|(_, _, time)| time.elapsed() > timeout);

        if expired {
            self.message = None;
            self.dirty = true;
        }
    }

    pub fn set_message(&mut self, msg: &str, msg_type: MessageType) {
        self.message = Some((msg.to_string(), msg_type, Instant::now()));
        self.dirty = true;
    }
}
