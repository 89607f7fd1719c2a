//! In-memory surface used by the login tests.

use std::collections::{BTreeMap, BTreeSet};

use super::field::{FieldId, FieldSpec};
use super::surface::{
    BorderStyle, ButtonKind, ButtonSpec, KeyBinding, LabelSpec, Placement, SubscriptionId, Surface,
    WidgetId,
};

#[derive(Debug, Clone)]
enum MemoryWidget {
    Container,
    Label,
    Field { id: FieldId, value: String, border: BorderStyle },
    Button(ButtonKind),
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    widgets: BTreeMap<WidgetId, MemoryWidget>,
    released: BTreeSet<WidgetId>,
    subscriptions: BTreeMap<SubscriptionId, KeyBinding>,
    focused: Option<WidgetId>,
    next_id: u32,
    next_sub: u32,
    renders: usize,
    double_destroys: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, widget: MemoryWidget) -> WidgetId {
        self.next_id += 1;
        let id = WidgetId(self.next_id);
        self.widgets.insert(id, widget);
        id
    }

    pub fn field(&self, field: FieldId) -> Option<WidgetId> {
        self.widgets.iter().find_map(|(wid, w)| match w {
            MemoryWidget::Field { id, .. } if *id == field => Some(*wid),
            _ => None,
        })
    }

    pub fn button(&self, kind: ButtonKind) -> Option<WidgetId> {
        self.widgets.iter().find_map(|(wid, w)| match w {
            MemoryWidget::Button(k) if *k == kind => Some(*wid),
            _ => None,
        })
    }

    /// Simulate the user typing into a field
    pub fn type_into(&mut self, field: FieldId, text: &str) {
        if let Some(wid) = self.field(field) {
            if let Some(MemoryWidget::Field { value, .. }) = self.widgets.get_mut(&wid) {
                value.push_str(text);
            }
        }
    }

    pub fn field_value(&self, field: FieldId) -> String {
        self.field(field).map(|wid| self.value(wid)).unwrap_or_default()
    }

    pub fn field_border(&self, field: FieldId) -> Option<BorderStyle> {
        let wid = self.field(field)?;
        match self.widgets.get(&wid)? {
            MemoryWidget::Field { border, .. } => Some(*border),
            _ => None,
        }
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    pub fn live_widgets(&self) -> usize {
        self.widgets.len()
    }

    pub fn subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn renders(&self) -> usize {
        self.renders
    }

    pub fn double_destroys(&self) -> usize {
        self.double_destroys
    }
}

impl Surface for MemorySurface {
    fn create_container(&mut self, _placement: Placement) -> WidgetId {
        self.insert(MemoryWidget::Container)
    }

    fn create_label(&mut self, _parent: WidgetId, _spec: &LabelSpec) -> WidgetId {
        self.insert(MemoryWidget::Label)
    }

    fn create_field(&mut self, _parent: WidgetId, spec: &FieldSpec) -> WidgetId {
        self.insert(MemoryWidget::Field {
            id: spec.id,
            value: String::new(),
            border: BorderStyle::Normal,
        })
    }

    fn create_button(&mut self, _parent: WidgetId, spec: &ButtonSpec) -> WidgetId {
        self.insert(MemoryWidget::Button(spec.kind))
    }

    fn value(&self, id: WidgetId) -> String {
        match self.widgets.get(&id) {
            Some(MemoryWidget::Field { value, .. }) => value.clone(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, id: WidgetId, new_value: &str) {
        if let Some(MemoryWidget::Field { value, .. }) = self.widgets.get_mut(&id) {
            *value = new_value.to_string();
        }
    }

    fn set_border(&mut self, id: WidgetId, style: BorderStyle) {
        if let Some(MemoryWidget::Field { border, .. }) = self.widgets.get_mut(&id) {
            *border = style;
        }
    }

    fn focus(&mut self, id: WidgetId) {
        self.focused = Some(id);
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
        if self.widgets.remove(&id).is_some() {
            self.released.insert(id);
            if self.focused == Some(id) {
                self.focused = None;
            }
        } else if self.released.contains(&id) {
            self.double_destroys += 1;
        }
    }

    fn request_render(&mut self) {
        self.renders += 1;
    }
}
