//! Login Session
//!
//! Lifecycle of one credential modal: focus, submit, cancel and teardown.

use tracing::{debug, info, warn};

use super::field::{self, FieldId, FocusRing, FocusTarget};
use super::record::{validate, CredentialRecord};
use super::surface::{BorderStyle, KeyBinding, Surface, SurfaceEvent, SubscriptionId, WidgetId};
use super::{LoginError, LoginResult};

/// Receives the record of a successful login
pub type CompletionCallback = Box<dyn FnOnce(CredentialRecord)>;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    /// Open after a failed submit; fields were cleared and flagged
    Invalid,
    Closed(Outcome),
}

impl SessionState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed(_))
    }
}

/// Widgets and subscriptions owned by a session
struct ModalWidgets {
    form: WidgetId,
    decorations: [WidgetId; 2],
    fields: [WidgetId; 3],
    cancel: WidgetId,
    login: WidgetId,
    subscriptions: Vec<SubscriptionId>,
}

impl ModalWidgets {
    fn build<S: Surface>(surface: &mut S) -> Self {
        let form = surface.create_container(field::FORM);
        let decorations = [
            surface.create_label(form, &field::TITLE),
            surface.create_label(form, &field::HINT),
        ];
        let fields = FieldId::ALL.map(|id| surface.create_field(form, &id.spec()));
        let cancel = surface.create_button(form, &field::CANCEL_BUTTON);
        let login = surface.create_button(form, &field::LOGIN_BUTTON);

        let subscriptions = [KeyBinding::FocusNext, KeyBinding::FocusPrev, KeyBinding::Cancel]
            .into_iter()
            .map(|binding| surface.subscribe(binding))
            .collect();

        Self { form, decorations, fields, cancel, login, subscriptions }
    }

    fn field(&self, id: FieldId) -> WidgetId {
        self.fields[id.index()]
    }

    fn target(&self, target: FocusTarget) -> WidgetId {
        match target {
            FocusTarget::Field(id) => self.field(id),
            FocusTarget::Cancel => self.cancel,
            FocusTarget::Login => self.login,
        }
    }

    fn release<S: Surface>(self, surface: &mut S) {
        for sub in self.subscriptions {
            surface.unsubscribe(sub);
        }
        for id in self.fields {
            surface.destroy(id);
        }
        for id in self.decorations {
            surface.destroy(id);
        }
        surface.destroy(self.cancel);
        surface.destroy(self.login);
        surface.destroy(self.form);
    }
}

/// One open credential modal.
///
/// The completion callback fires at most once: the session is marked closed
/// before it runs and every event after that is ignored.
pub struct ModalSession {
    widgets: Option<ModalWidgets>,
    focus: FocusRing,
    state: SessionState,
    on_complete: Option<CompletionCallback>,
}

impl ModalSession {
    /// Build the form on `surface` and give focus to the form container.
    pub fn open<S, F>(surface: &mut S, on_complete: F) -> Self
    where
        S: Surface,
        F: FnOnce(CredentialRecord) + 'static,
    {
        let widgets = ModalWidgets::build(surface);
        surface.focus(widgets.form);
        surface.request_render();
        info!("login modal opened");

        Self {
            widgets: Some(widgets),
            focus: FocusRing::new(),
            state: SessionState::Open,
            on_complete: Some(Box::new(on_complete)),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    #[cfg(test)]
    pub fn focused(&self) -> Option<FocusTarget> {
        self.focus.current()
    }

    pub fn handle_event<S: Surface>(&mut self, surface: &mut S, event: SurfaceEvent) -> SessionState {
        if !self.is_open() {
            return self.state;
        }

        match event {
            SurfaceEvent::Key(KeyBinding::FocusNext) => self.focus_next(surface),
            SurfaceEvent::Key(KeyBinding::FocusPrev) => self.focus_prev(surface),
            SurfaceEvent::Key(KeyBinding::Cancel) => self.cancel(surface),
            SurfaceEvent::Pressed(id) => self.press(surface, id),
        }
        self.state
    }

    fn press<S: Surface>(&mut self, surface: &mut S, id: WidgetId) {
        let Some((login, cancel)) = self.widgets.as_ref().map(|w| (w.login, w.cancel)) else {
            return;
        };
        if id == login {
            self.submit(surface);
        } else if id == cancel {
            self.cancel(surface);
        }
    }

    pub fn focus_next<S: Surface>(&mut self, surface: &mut S) {
        let target = self.focus.next();
        self.apply_focus(surface, target);
    }

    pub fn focus_prev<S: Surface>(&mut self, surface: &mut S) {
        let target = self.focus.prev();
        self.apply_focus(surface, target);
    }

    fn apply_focus<S: Surface>(&mut self, surface: &mut S, target: FocusTarget) {
        let Some(widgets) = &self.widgets else { return };
        debug!(?target, "login focus moved");
        surface.focus(widgets.target(target));
        surface.request_render();
    }

    /// Read the fields and either complete the session or reset the form.
    pub fn submit<S: Surface>(&mut self, surface: &mut S) {
        if !self.is_open() {
            return;
        }

        let record = self.read_record(surface);
        if validate(&record) {
            self.complete(surface, record);
            return;
        }

        let missing: Vec<_> = record.missing_fields().iter().map(|f| f.key()).collect();
        debug!(?missing, "login rejected, resetting fields");
        self.reset_fields(surface);
    }

    pub fn cancel<S: Surface>(&mut self, surface: &mut S) {
        if !self.is_open() {
            return;
        }

        self.state = SessionState::Closed(Outcome::Cancelled);
        self.on_complete = None;
        self.destroy(surface);
        info!("login modal cancelled");
    }

    fn complete<S: Surface>(&mut self, surface: &mut S, record: CredentialRecord) {
        self.state = SessionState::Closed(Outcome::Completed);
        info!("login submitted");
        if let Some(callback) = self.on_complete.take() {
            callback(record);
        }
        self.destroy(surface);
    }

    fn read_record<S: Surface>(&self, surface: &S) -> CredentialRecord {
        let mut record = CredentialRecord::default();
        if let Some(widgets) = &self.widgets {
            for id in FieldId::ALL {
                record.set(id, surface.value(widgets.field(id)));
            }
        }
        record
    }

    /// Clear every field and flag all of them, whichever were empty.
    fn reset_fields<S: Surface>(&mut self, surface: &mut S) {
        let Some(widgets) = &self.widgets else { return };
        for id in FieldId::ALL {
            let widget = widgets.field(id);
            surface.set_value(widget, "");
            surface.set_border(widget, BorderStyle::Error);
        }

        self.state = SessionState::Invalid;
        let target = self.focus.first();
        self.apply_focus(surface, target);
    }

    /// Release every widget. Safe to call more than once.
    pub fn destroy<S: Surface>(&mut self, surface: &mut S) {
        if let Some(widgets) = self.widgets.take() {
            widgets.release(surface);
            surface.request_render();
        }
        if self.is_open() {
            self.state = SessionState::Closed(Outcome::Cancelled);
            self.on_complete = None;
        }
    }
}

/// Slot for the single login session a screen may host
#[derive(Default)]
pub struct LoginModal {
    session: Option<ModalSession>,
}

impl LoginModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open<S, F>(&mut self, surface: &mut S, on_complete: F) -> LoginResult<()>
    where
        S: Surface,
        F: FnOnce(CredentialRecord) + 'static,
    {
        if self.is_open() {
            warn!("login modal already open, ignoring request");
            return Err(LoginError::SessionActive);
        }

        self.session = Some(ModalSession::open(surface, on_complete));
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_open())
    }

    #[cfg(test)]
    pub fn session(&self) -> Option<&ModalSession> {
        self.session.as_ref()
    }

    /// Forward an event to the active session. Closed sessions are dropped.
    pub fn dispatch<S: Surface>(&mut self, surface: &mut S, event: SurfaceEvent) -> Option<SessionState> {
        let session = self.session.as_mut()?;
        let state = session.handle_event(surface, event);
        if !state.is_open() {
            self.session = None;
        }
        Some(state)
    }

    /// Tear down the active session without completing it.
    pub fn close<S: Surface>(&mut self, surface: &mut S) {
        if let Some(mut session) = self.session.take() {
            session.cancel(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::login::surface::ButtonKind;
    use crate::login::testing::MemorySurface;

    type Calls = Rc<RefCell<Vec<CredentialRecord>>>;

    fn open_session(surface: &mut MemorySurface) -> (ModalSession, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let session = ModalSession::open(surface, move |record| sink.borrow_mut().push(record));
        (session, calls)
    }

    fn fill(surface: &mut MemorySurface, username: &str, api_key: &str, secret: &str) {
        surface.type_into(FieldId::Username, username);
        surface.type_into(FieldId::ApiKey, api_key);
        surface.type_into(FieldId::Secret, secret);
    }

    fn press(surface: &MemorySurface, kind: ButtonKind) -> SurfaceEvent {
        SurfaceEvent::Pressed(surface.button(kind).unwrap())
    }

    #[test]
    fn test_open_builds_form() {
        let mut surface = MemorySurface::new();
        let (session, _) = open_session(&mut surface);

        assert_eq!(session.state(), SessionState::Open);
        assert_eq!(session.focused(), None);
        // form, title, hint, three fields, two buttons
        assert_eq!(surface.live_widgets(), 8);
        assert_eq!(surface.subscriptions(), 3);
        assert!(surface.renders() > 0);
    }

    #[test]
    fn test_valid_submit_completes_once() {
        let mut surface = MemorySurface::new();
        let (mut session, calls) = open_session(&mut surface);
        fill(&mut surface, "alice", "k1", "s1");

        let event = press(&surface, ButtonKind::Confirm);
        let state = session.handle_event(&mut surface, event);

        assert_eq!(state, SessionState::Closed(Outcome::Completed));
        assert_eq!(*calls.borrow(), vec![CredentialRecord::new("alice", "k1", "s1")]);
        assert_eq!(surface.live_widgets(), 0);
        assert_eq!(surface.subscriptions(), 0);
    }

    #[test]
    fn test_invalid_submit_resets_all_fields() {
        let mut surface = MemorySurface::new();
        let (mut session, calls) = open_session(&mut surface);
        fill(&mut surface, "", "k1", "s1");

        let event = press(&surface, ButtonKind::Confirm);
        let state = session.handle_event(&mut surface, event);

        assert_eq!(state, SessionState::Invalid);
        assert!(calls.borrow().is_empty());
        for id in FieldId::ALL {
            assert_eq!(surface.field_value(id), "");
            assert_eq!(surface.field_border(id), Some(BorderStyle::Error));
        }
        assert_eq!(session.focused(), Some(FocusTarget::Field(FieldId::Username)));
        assert_eq!(surface.focused(), surface.field(FieldId::Username));
    }

    #[test]
    fn test_retry_after_invalid_submit() {
        let mut surface = MemorySurface::new();
        let (mut session, calls) = open_session(&mut surface);

        session.submit(&mut surface);
        assert_eq!(session.state(), SessionState::Invalid);

        fill(&mut surface, "alice", "k1", "s1");
        session.submit(&mut surface);

        assert_eq!(session.state(), SessionState::Closed(Outcome::Completed));
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_cancel_button_is_silent() {
        let mut surface = MemorySurface::new();
        let (mut session, calls) = open_session(&mut surface);
        fill(&mut surface, "bob", "", "");

        let event = press(&surface, ButtonKind::Cancel);
        let state = session.handle_event(&mut surface, event);

        assert_eq!(state, SessionState::Closed(Outcome::Cancelled));
        assert!(calls.borrow().is_empty());
        assert_eq!(surface.live_widgets(), 0);
    }

    #[test]
    fn test_cancel_key_after_invalid_submit() {
        let mut surface = MemorySurface::new();
        let (mut session, calls) = open_session(&mut surface);
        session.submit(&mut surface);

        let state = session.handle_event(&mut surface, SurfaceEvent::Key(KeyBinding::Cancel));

        assert_eq!(state, SessionState::Closed(Outcome::Cancelled));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_events_after_close_are_ignored() {
        let mut surface = MemorySurface::new();
        let (mut session, calls) = open_session(&mut surface);
        fill(&mut surface, "alice", "k1", "s1");
        let login = press(&surface, ButtonKind::Confirm);
        let cancel = press(&surface, ButtonKind::Cancel);

        session.handle_event(&mut surface, login);
        session.handle_event(&mut surface, login);
        session.handle_event(&mut surface, cancel);
        session.handle_event(&mut surface, SurfaceEvent::Key(KeyBinding::Cancel));
        session.handle_event(&mut surface, SurfaceEvent::Key(KeyBinding::FocusNext));
        session.cancel(&mut surface);
        session.destroy(&mut surface);

        assert_eq!(session.state(), SessionState::Closed(Outcome::Completed));
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(surface.double_destroys(), 0);
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut surface = MemorySurface::new();
        let (mut session, _) = open_session(&mut surface);

        let mut seen = Vec::new();
        for _ in 0..6 {
            session.handle_event(&mut surface, SurfaceEvent::Key(KeyBinding::FocusNext));
            seen.push(session.focused().unwrap());
        }

        assert_eq!(&seen[..5], &FocusTarget::RING);
        assert_eq!(seen[5], FocusTarget::Field(FieldId::Username));
        assert_eq!(surface.focused(), surface.field(FieldId::Username));
    }

    #[test]
    fn test_shift_tab_reaches_login_button() {
        let mut surface = MemorySurface::new();
        let (mut session, _) = open_session(&mut surface);

        session.handle_event(&mut surface, SurfaceEvent::Key(KeyBinding::FocusPrev));

        assert_eq!(session.focused(), Some(FocusTarget::Login));
        assert_eq!(surface.focused(), surface.button(ButtonKind::Confirm));
    }

    #[test]
    fn test_press_on_foreign_widget_is_ignored() {
        let mut surface = MemorySurface::new();
        let (mut session, calls) = open_session(&mut surface);

        let state = session.handle_event(&mut surface, SurfaceEvent::Pressed(WidgetId(9999)));

        assert_eq!(state, SessionState::Open);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_slot_rejects_second_open() {
        let mut surface = MemorySurface::new();
        let mut modal = LoginModal::new();

        modal.open(&mut surface, |_| {}).unwrap();
        let err = modal.open(&mut surface, |_| {}).unwrap_err();

        assert!(matches!(err, LoginError::SessionActive));
        assert_eq!(surface.live_widgets(), 8);
    }

    #[test]
    fn test_slot_reopens_after_close() {
        let mut surface = MemorySurface::new();
        let mut modal = LoginModal::new();
        modal.open(&mut surface, |_| {}).unwrap();

        let state = modal.dispatch(&mut surface, SurfaceEvent::Key(KeyBinding::Cancel));
        assert_eq!(state, Some(SessionState::Closed(Outcome::Cancelled)));
        assert!(!modal.is_open());
        assert!(modal.session().is_none());
        assert_eq!(modal.dispatch(&mut surface, SurfaceEvent::Key(KeyBinding::Cancel)), None);

        modal.open(&mut surface, |_| {}).unwrap();
        assert!(modal.is_open());
    }

    #[test]
    fn test_sessions_do_not_share_records() {
        let mut surface = MemorySurface::new();
        let (mut first, first_calls) = open_session(&mut surface);
        fill(&mut surface, "alice", "k1", "s1");
        first.submit(&mut surface);

        let (mut second, second_calls) = open_session(&mut surface);
        assert_eq!(surface.field_value(FieldId::Username), "");
        second.submit(&mut surface);

        assert_eq!(first_calls.borrow().len(), 1);
        assert!(second_calls.borrow().is_empty());
        assert_eq!(second.state(), SessionState::Invalid);
    }

    #[test]
    fn test_close_tears_down_without_callback() {
        let mut surface = MemorySurface::new();
        let mut modal = LoginModal::new();
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        modal.open(&mut surface, move |r| sink.borrow_mut().push(r)).unwrap();
        fill(&mut surface, "alice", "k1", "s1");

        modal.close(&mut surface);
        modal.close(&mut surface);

        assert!(!modal.is_open());
        assert!(calls.borrow().is_empty());
        assert_eq!(surface.live_widgets(), 0);
    }
}
