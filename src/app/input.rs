use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};

use crate::input::keymap::{dashboard_action, Action};
use crate::login::surface::SurfaceEvent;

use super::App;

impl App {
    /// Handle a key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        self.mark_dirty();

        if self.login.is_open() {
            if is_interrupt(key) {
                self.login.close(&mut self.surface);
                self.finish_login();
                self.should_quit = true;
                return true;
            }
            if let Some(event) = self.surface.handle_key(key) {
                self.forward_login_event(event);
            }
            return false;
        }

        match dashboard_action(key) {
            Action::OpenLogin => self.open_login(),
            Action::Quit => self.should_quit = true,
            _ => {}
        }
        self.should_quit
    }

    /// Handle a mouse event. Only the login modal reacts to clicks.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.login.is_open() {
            return;
        }
        if let Some(event) = self.surface.handle_mouse(mouse, self.screen) {
            self.mark_dirty();
            self.forward_login_event(event);
        }
    }

    fn forward_login_event(&mut self, event: SurfaceEvent) {
        let closed = self
            .login
            .dispatch(&mut self.surface, event)
            .is_some_and(|state| !state.is_open());

        if closed {
            self.finish_login();
        }
    }
}

fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
