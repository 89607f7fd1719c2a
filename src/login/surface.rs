//! Surface Contract
//!
//! The small set of widget capabilities a login session needs from the
//! rendering layer. The terminal implements it in `crate::ui::surface`.

use super::field::FieldSpec;

/// Handle to a widget created on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

/// Handle to a key subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u32);

/// Offset of a widget along one axis of its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    /// Cells from the left/top edge
    Start(u16),
    /// Cells from the right/bottom edge
    End(u16),
    Center,
}

/// Position and size relative to the parent widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: Offset,
    pub y: Offset,
    pub width: u16,
    pub height: u16,
}

impl Placement {
    pub const fn new(x: Offset, y: Offset, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BorderStyle {
    #[default]
    Normal,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSpec {
    pub label: &'static str,
    pub placement: Placement,
    pub kind: ButtonKind,
}

/// Static text decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSpec {
    pub text: &'static str,
    pub placement: Placement,
    pub bold: bool,
}

/// Keys a session can subscribe to on its parent surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyBinding {
    FocusNext,
    FocusPrev,
    Cancel,
}

/// Event delivered by the surface to the active session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Key(KeyBinding),
    Pressed(WidgetId),
}

/// Widget capabilities required by a login session.
///
/// Text entry inside a focused field is the surface's job; the session only
/// reads and resets field values.
pub trait Surface {
    fn create_container(&mut self, placement: Placement) -> WidgetId;
    fn create_label(&mut self, parent: WidgetId, spec: &LabelSpec) -> WidgetId;
    fn create_field(&mut self, parent: WidgetId, spec: &FieldSpec) -> WidgetId;
    fn create_button(&mut self, parent: WidgetId, spec: &ButtonSpec) -> WidgetId;

    /// Current text of a field. Unknown widgets read as empty.
    fn value(&self, id: WidgetId) -> String;
    fn set_value(&mut self, id: WidgetId, value: &str);
    fn set_border(&mut self, id: WidgetId, style: BorderStyle);
    fn focus(&mut self, id: WidgetId);

    fn subscribe(&mut self, binding: KeyBinding) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Release a widget. Destroying an unknown widget is a no-op.
    fn destroy(&mut self, id: WidgetId);
    fn request_render(&mut self);
}
