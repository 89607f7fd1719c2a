//! Field Layout
//!
//! The three credential fields, the modal geometry and the focus ring.

use super::surface::{ButtonKind, ButtonSpec, LabelSpec, Offset, Placement};

/// Identifies one of the credential fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Username,
    ApiKey,
    Secret,
}

impl FieldId {
    /// Fields in entry order
    pub const ALL: [FieldId; 3] = [FieldId::Username, FieldId::ApiKey, FieldId::Secret];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::ApiKey => "API Key",
            Self::Secret => "Secret",
        }
    }

    /// Record key used by the dashboard
    pub fn key(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::ApiKey => "apiKey",
            Self::Secret => "secret",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Username => 0,
            Self::ApiKey => 1,
            Self::Secret => 2,
        }
    }

    pub fn spec(&self) -> FieldSpec {
        let top = match self {
            Self::Username => 4,
            Self::ApiKey => 8,
            Self::Secret => 12,
        };

        FieldSpec {
            id: *self,
            label: self.label(),
            placement: Placement::new(Offset::Start(FIELD_LEFT), Offset::Start(top), FIELD_WIDTH, FIELD_HEIGHT),
            masked: *self == Self::Secret,
        }
    }
}

/// Text field definition passed to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    pub placement: Placement,
    pub masked: bool,
}

const FIELD_LEFT: u16 = 4;
const FIELD_WIDTH: u16 = 36;
const FIELD_HEIGHT: u16 = 3;
const BUTTON_PADDING: u16 = 4;
const BUTTON_HEIGHT: u16 = 3;

pub const FORM: Placement = Placement::new(Offset::Center, Offset::Center, 45, 20);

pub const TITLE: LabelSpec = LabelSpec {
    text: " Bitstamp Login ",
    placement: Placement::new(Offset::Center, Offset::Start(1), 16, 1),
    bold: true,
};

pub const HINT: LabelSpec = LabelSpec {
    text: " Press tab to start entry. ",
    placement: Placement::new(Offset::Center, Offset::Start(2), 27, 1),
    bold: false,
};

pub const CANCEL_BUTTON: ButtonSpec = ButtonSpec {
    label: "cancel",
    placement: Placement::new(
        Offset::Start(FIELD_LEFT),
        Offset::End(1),
        6 + 2 * BUTTON_PADDING,
        BUTTON_HEIGHT,
    ),
    kind: ButtonKind::Cancel,
};

pub const LOGIN_BUTTON: ButtonSpec = ButtonSpec {
    label: "login",
    placement: Placement::new(Offset::End(5), Offset::End(1), 5 + 2 * BUTTON_PADDING, BUTTON_HEIGHT),
    kind: ButtonKind::Confirm,
};

/// Something the tab key can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FieldId),
    Cancel,
    Login,
}

impl FocusTarget {
    pub const RING: [FocusTarget; 5] = [
        FocusTarget::Field(FieldId::Username),
        FocusTarget::Field(FieldId::ApiKey),
        FocusTarget::Field(FieldId::Secret),
        FocusTarget::Cancel,
        FocusTarget::Login,
    ];
}

/// Position within [`FocusTarget::RING`]; `None` while the form itself has focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusRing {
    index: Option<usize>,
}

impl FocusRing {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<FocusTarget> {
        self.index.map(|i| FocusTarget::RING[i])
    }

    pub fn next(&mut self) -> FocusTarget {
        let next = match self.index {
            Some(i) => (i + 1) % FocusTarget::RING.len(),
            None => 0,
        };
        self.index = Some(next);
        FocusTarget::RING[next]
    }

    pub fn prev(&mut self) -> FocusTarget {
        let prev = match self.index {
            Some(0) | None => FocusTarget::RING.len() - 1,
            Some(i) => i - 1,
        };
        self.index = Some(prev);
        FocusTarget::RING[prev]
    }

    pub fn first(&mut self) -> FocusTarget {
        self.index = Some(0);
        FocusTarget::RING[0]
    }
}
