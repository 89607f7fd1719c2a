//! Login Form Component
//!
//! Draws the widgets held by a [`TerminalSurface`]: the modal container,
//! its labels, text fields and buttons.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::login::surface::{BorderStyle, ButtonKind};
use crate::ui::surface::{NodeKind, TerminalSurface, TextField};
use crate::ui::theme::ColorScheme;

/// Renders every live widget of a surface
pub struct SurfaceView<'a> {
    surface: &'a TerminalSurface,
}

impl<'a> SurfaceView<'a> {
    pub fn new(surface: &'a TerminalSurface) -> Self {
        Self { surface }
    }
}

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let scheme = self.surface.scheme();
        let focused = self.surface.focused();

        for (id, node) in self.surface.nodes() {
            let Some(rect) = self.surface.area_of(id, area) else { continue };
            let is_focused = focused == Some(id);

            match &node.kind {
                NodeKind::Container => render_container(rect, buf, scheme),
                NodeKind::Label { text, bold } => render_label(rect, buf, text, *bold, scheme),
                NodeKind::Field(field) => render_field(rect, buf, field, is_focused, scheme),
                NodeKind::Button { label, kind } => render_button(rect, buf, label, *kind, is_focused, scheme),
            }
        }
    }
}

fn render_container(area: Rect, buf: &mut Buffer, scheme: &ColorScheme) {
    Clear.render(area, buf);
    Block::default()
        .style(Style::default().bg(scheme.background).fg(Color::White))
        .render(area, buf);
}

fn render_label(area: Rect, buf: &mut Buffer, text: &str, bold: bool, scheme: &ColorScheme) {
    let mut style = Style::default().fg(Color::White).bg(scheme.background);
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    buf.set_stringn(area.x, area.y, text, area.width as usize, style);
}

fn render_field(area: Rect, buf: &mut Buffer, field: &TextField, focused: bool, scheme: &ColorScheme) {
    let border_color = match (focused, field.border) {
        (true, _) => scheme.field_border_focused,
        (false, BorderStyle::Error) => scheme.error,
        (false, BorderStyle::Normal) => scheme.field_border_unfocused,
    };

    let title = Span::styled(
        format!(" {} ", field.label),
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(scheme.background));

    let inner = block.inner(area);
    block.render(area, buf);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let buffer = &field.buffer;
    let chars: Vec<char> = if field.masked {
        vec!['*'; buffer.char_len()]
    } else {
        buffer.value().chars().collect()
    };

    let width = inner.width as usize;
    let cursor = buffer.cursor().min(chars.len());
    let (skip, cursor_col) = scroll_window(&chars, cursor, width);
    let visible: String = chars[skip..].iter().collect();
    buf.set_stringn(inner.x, inner.y, &visible, width, Style::default().fg(Color::White));

    if focused {
        let cursor_x = inner.x + cursor_col as u16;
        if let Some(cell) = buf.cell_mut((cursor_x, inner.y)) {
            cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
        }
    }
}

/// First visible char and the cursor column, scrolled so the cursor cell
/// fits in `width` columns.
fn scroll_window(chars: &[char], cursor: usize, width: usize) -> (usize, usize) {
    let cols = |range: &[char]| -> usize { range.iter().map(|c| c.width().unwrap_or(0)).sum() };

    let mut skip = 0;
    let mut col = cols(&chars[..cursor]);
    while skip < cursor && col + 1 > width {
        col -= chars[skip].width().unwrap_or(0);
        skip += 1;
    }
    (skip, col)
}

fn render_button(
    area: Rect,
    buf: &mut Buffer,
    label: &str,
    kind: ButtonKind,
    focused: bool,
    scheme: &ColorScheme,
) {
    let bg = match (kind, focused) {
        (ButtonKind::Confirm, false) => scheme.confirm_light,
        (ButtonKind::Confirm, true) => scheme.confirm_dark,
        (ButtonKind::Cancel, false) => scheme.cancel_light,
        (ButtonKind::Cancel, true) => scheme.cancel_dark,
    };

    let mut style = Style::default().bg(bg).fg(Color::Black);
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }

    buf.set_style(area, style);
    let text_area = Rect::new(area.x, area.y + area.height / 2, area.width, 1.min(area.height));
    Paragraph::new(Line::from(label))
        .alignment(Alignment::Center)
        .style(style)
        .render(text_area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::login::field::FieldId;
    use crate::login::surface::Surface;
    use crate::login::LoginModal;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn screen(buf: &Buffer) -> String {
        (0..buf.area.height).map(|y| row(buf, y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_renders_login_form() {
        let mut surface = TerminalSurface::new(ColorScheme::default());
        let mut modal = LoginModal::new();
        modal.open(&mut surface, |_| {}).unwrap();

        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        SurfaceView::new(&surface).render(area, &mut buf);

        let text = screen(&buf);
        assert!(text.contains("Bitstamp Login"));
        assert!(text.contains("Press tab to start entry."));
        assert!(text.contains("Username"));
        assert!(text.contains("API Key"));
        assert!(text.contains("Secret"));
        assert!(text.contains("login"));
        assert!(text.contains("cancel"));
    }

    #[test]
    fn test_secret_is_masked() {
        let mut surface = TerminalSurface::new(ColorScheme::default());
        let form = surface.create_container(crate::login::field::FORM);
        let secret = surface.create_field(form, &FieldId::Secret.spec());
        surface.set_value(secret, "hunter2");

        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        SurfaceView::new(&surface).render(area, &mut buf);

        let text = screen(&buf);
        assert!(!text.contains("hunter2"));
        assert!(text.contains("*******"));
    }

    #[test]
    fn test_wide_chars_stay_inside_field() {
        let mut surface = TerminalSurface::new(ColorScheme::default());
        let form = surface.create_container(crate::login::field::FORM);
        let user = surface.create_field(form, &FieldId::Username.spec());
        surface.set_value(user, &"\u{4e2d}".repeat(30));
        surface.focus(user);

        let area = Rect::new(0, 0, 45, 20);
        let mut buf = Buffer::empty(area);
        SurfaceView::new(&surface).render(area, &mut buf);

        let field_area = surface.area_of(user, area).unwrap();
        let right = field_area.x + field_area.width - 1;
        assert_eq!(buf[(right, field_area.y + 1)].symbol(), "\u{2502}");
    }

    #[test]
    fn test_scroll_window_by_display_width() {
        let ascii: Vec<char> = "abcdef".chars().collect();
        assert_eq!(scroll_window(&ascii, 2, 10), (0, 2));
        assert_eq!(scroll_window(&ascii, 6, 4), (3, 3));

        let wide: Vec<char> = "\u{4e2d}\u{6587}\u{5b57}".chars().collect();
        assert_eq!(scroll_window(&wide, 3, 4), (2, 2));
        assert_eq!(scroll_window(&wide, 1, 4), (0, 2));
    }

    #[test]
    fn test_error_border_color() {
        let mut surface = TerminalSurface::new(ColorScheme::default());
        let form = surface.create_container(crate::login::field::FORM);
        let user = surface.create_field(form, &FieldId::Username.spec());
        surface.set_border(user, BorderStyle::Error);

        let area = Rect::new(0, 0, 45, 20);
        let mut buf = Buffer::empty(area);
        SurfaceView::new(&surface).render(area, &mut buf);

        let field_area = surface.area_of(user, area).unwrap();
        let corner = &buf[(field_area.x, field_area.y)];
        assert_eq!(corner.fg, Color::Red);
    }
}
