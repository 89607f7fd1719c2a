//! Terminal Surface
//!
//! Widget arena backing login sessions on a ratatui frame. Owns focus and
//! text entry, and turns key presses into session events.

use std::collections::BTreeMap;

use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::trace;

use crate::input::keymap::{form_action, text_input_action, Action};
use crate::login::field::FieldSpec;
use crate::login::surface::{
    BorderStyle, ButtonKind, ButtonSpec, KeyBinding, LabelSpec, Offset, Placement, SubscriptionId,
    Surface, SurfaceEvent, WidgetId,
};
use crate::ui::components::FieldBuffer;
use crate::ui::theme::ColorScheme;

#[derive(Debug, Clone)]
pub struct TextField {
    pub label: &'static str,
    pub masked: bool,
    pub border: BorderStyle,
    pub buffer: FieldBuffer,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Container,
    Label { text: &'static str, bold: bool },
    Field(TextField),
    Button { label: &'static str, kind: ButtonKind },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<WidgetId>,
    pub placement: Placement,
    pub kind: NodeKind,
}

pub struct TerminalSurface {
    nodes: BTreeMap<WidgetId, Node>,
    subscriptions: BTreeMap<SubscriptionId, KeyBinding>,
    focused: Option<WidgetId>,
    next_id: u32,
    next_sub: u32,
    dirty: bool,
    scheme: ColorScheme,
}

impl TerminalSurface {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            nodes: BTreeMap::new(),
            subscriptions: BTreeMap::new(),
            focused: None,
            next_id: 0,
            next_sub: 0,
            dirty: true,
            scheme,
        }
    }

    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Nodes in creation order, parents before children
    pub fn nodes(&self) -> impl Iterator<Item = (WidgetId, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    #[cfg(test)]
    pub fn node(&self, id: WidgetId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns whether a redraw was requested since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Screen area of a widget, resolved through its parents
    pub fn area_of(&self, id: WidgetId, screen: Rect) -> Option<Rect> {
        let node = self.nodes.get(&id)?;
        let parent_area = match node.parent {
            Some(parent) => self.area_of(parent, screen)?,
            None => screen,
        };
        Some(resolve(&node.placement, parent_area))
    }

    fn insert(&mut self, parent: Option<WidgetId>, placement: Placement, kind: NodeKind) -> WidgetId {
        self.next_id += 1;
        let id = WidgetId(self.next_id);
        self.nodes.insert(id, Node { parent, placement, kind });
        self.dirty = true;
        id
    }

    fn focused_field(&self) -> Option<WidgetId> {
        let id = self.focused?;
        matches!(self.nodes.get(&id)?.kind, NodeKind::Field(_)).then_some(id)
    }

    fn focused_button(&self) -> Option<WidgetId> {
        let id = self.focused?;
        matches!(self.nodes.get(&id)?.kind, NodeKind::Button { .. }).then_some(id)
    }

    fn field_mut(&mut self, id: WidgetId) -> Option<&mut TextField> {
        match &mut self.nodes.get_mut(&id)?.kind {
            NodeKind::Field(field) => Some(field),
            _ => None,
        }
    }

    fn binding(&self, binding: KeyBinding) -> Option<SurfaceEvent> {
        self.subscriptions
            .values()
            .any(|b| *b == binding)
            .then_some(SurfaceEvent::Key(binding))
    }

    /// Apply a key press. Text entry is handled here; anything the active
    /// session must react to is returned as an event.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SurfaceEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let field = self.focused_field();
        let action = match field {
            Some(_) => text_input_action(key),
            None => form_action(key),
        };

        let event = match action {
            Action::FocusNext => self.binding(KeyBinding::FocusNext),
            Action::FocusPrev => self.binding(KeyBinding::FocusPrev),
            Action::Cancel => self.binding(KeyBinding::Cancel),
            Action::Submit if field.is_some() => self.binding(KeyBinding::FocusNext),
            Action::Submit => self.focused_button().map(SurfaceEvent::Pressed),
            Action::None => None,
            edit => {
                if let Some(id) = field {
                    self.edit_field(id, edit);
                }
                None
            }
        };

        trace!(?event, "surface key handled");
        event
    }

    /// Apply a mouse event. A left click on a button presses it; `screen`
    /// is the area the surface was last drawn into.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, screen: Rect) -> Option<SurfaceEvent> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }

        let at = Position::new(mouse.column, mouse.row);
        let event = self
            .nodes
            .iter()
            .rev()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Button { .. }))
            .find(|(id, _)| self.area_of(**id, screen).is_some_and(|area| area.contains(at)))
            .map(|(id, _)| SurfaceEvent::Pressed(*id));

        trace!(?event, column = mouse.column, row = mouse.row, "surface click handled");
        event
    }

    fn edit_field(&mut self, id: WidgetId, action: Action) {
        let Some(field) = self.field_mut(id) else { return };
        let buffer = &mut field.buffer;
        match action {
            Action::InsertChar(c) => buffer.insert_char(c),
            Action::DeleteChar => buffer.delete_char(),
            Action::DeleteCharForward => buffer.delete_char_forward(),
            Action::CursorLeft => buffer.cursor_left(),
            Action::CursorRight => buffer.cursor_right(),
            Action::CursorHome => buffer.cursor_home(),
            Action::CursorEnd => buffer.cursor_end(),
            Action::ClearLine => buffer.clear(),
            _ => return,
        }
        self.dirty = true;
    }

    fn children(&self, parent: WidgetId) -> Vec<WidgetId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent == Some(parent))
            .map(|(id, _)| *id)
            .collect()
    }
}

impl Surface for TerminalSurface {
    fn create_container(&mut self, placement: Placement) -> WidgetId {
        self.insert(None, placement, NodeKind::Container)
    }

    fn create_label(&mut self, parent: WidgetId, spec: &LabelSpec) -> WidgetId {
        let kind = NodeKind::Label { text: spec.text, bold: spec.bold };
        self.insert(Some(parent), spec.placement, kind)
    }

    fn create_field(&mut self, parent: WidgetId, spec: &FieldSpec) -> WidgetId {
        let kind = NodeKind::Field(TextField {
            label: spec.label,
            masked: spec.masked,
            border: BorderStyle::Normal,
            buffer: FieldBuffer::new(),
        });
        self.insert(Some(parent), spec.placement, kind)
    }

    fn create_button(&mut self, parent: WidgetId, spec: &ButtonSpec) -> WidgetId {
        let kind = NodeKind::Button { label: spec.label, kind: spec.kind };
        self.insert(Some(parent), spec.placement, kind)
    }

    fn value(&self, id: WidgetId) -> String {
        match self.nodes.get(&id).map(|n| &n.kind) {
            Some(NodeKind::Field(field)) => field.buffer.value().to_string(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, id: WidgetId, value: &str) {
        if let Some(field) = self.field_mut(id) {
            field.buffer.set(value);
            self.dirty = true;
        }
    }

    fn set_border(&mut self, id: WidgetId, style: BorderStyle) {
        if let Some(field) = self.field_mut(id) {
            field.border = style;
            self.dirty = true;
        }
    }

    fn focus(&mut self, id: WidgetId) {
        if self.nodes.contains_key(&id) {
            self.focused = Some(id);
            self.dirty = true;
        }
    }

    fn subscribe(&mut self, binding: KeyBinding) -> SubscriptionId {
        self.next_sub += 1;
        let id = SubscriptionId(self.next_sub);
        self.subscriptions.insert(id, binding);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscriptions.remove(&id);
    }

    fn destroy(&mut self, id: WidgetId) {
        for child in self.children(id) {
            self.destroy(child);
        }
        if self.nodes.remove(&id).is_none() {
            return;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.dirty = true;
    }

    fn request_render(&mut self) {
        self.dirty = true;
    }
}

/// Place a widget inside its parent's area, clamped to fit
pub fn resolve(placement: &Placement, parent: Rect) -> Rect {
    let width = placement.width.min(parent.width);
    let height = placement.height.min(parent.height);
    let x = parent.x + axis(placement.x, parent.width, width);
    let y = parent.y + axis(placement.y, parent.height, height);
    Rect::new(x, y, width, height)
}

fn axis(offset: Offset, outer: u16, inner: u16) -> u16 {
    let room = outer.saturating_sub(inner);
    match offset {
        Offset::Start(n) => n.min(room),
        Offset::End(n) => room.saturating_sub(n),
        Offset::Center => room / 2,
    }
}
