//! Renderer
//!
//! Main rendering logic for the dashboard and its login overlay.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Paragraph},
    Frame,
};

use super::components::{HelpBar, MessageType, StatusLine, SurfaceView};
use super::surface::TerminalSurface;
use crate::input::InputMode;

pub struct UiState<'a> {
    pub mode: InputMode,
    pub account: Option<&'a str>,
    pub message: Option<(&'a str, MessageType)>,
    pub surface: &'a TerminalSurface,
}

pub struct Renderer;

impl Renderer {
    pub fn hex_color(rgb: u32) -> Color {
        Color::Rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    pub fn render(frame: &mut Frame, state: &UiState) {
        let size = frame.area();
        let chunks = create_main_layout(size);

        render_dashboard(frame, chunks[0], state);
        render_status_line(frame, chunks[1], state);
        render_help_bar(frame, chunks[2], state.mode);
        render_overlays(frame, size, state);
    }
}

fn create_main_layout(size: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size)
}

fn render_dashboard(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default()
        .title(" BitVision ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Magenta));

    let lines = match state.account {
        Some(user) => vec![
            Line::from(vec![
                Span::raw("Logged in to Bitstamp as "),
                Span::styled(user, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            ]),
        ],
        None => vec![
            Line::from("Not logged in."),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("l", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
                Span::raw(" to enter your Bitstamp credentials."),
            ]),
        ],
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &UiState) {
    let mut status = StatusLine::new(state.mode);

    if let Some((msg, msg_type)) = state.message {
        status = status.message(msg, msg_type);
    }
    if let Some(user) = state.account {
        status = status.account(user);
    }

    frame.render_widget(status, area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, mode: InputMode) {
    let help_bar = HelpBar::for_mode(mode);
    frame.render_widget(help_bar, area);
}

fn render_overlays(frame: &mut Frame, area: Rect, state: &UiState) {
    if state.surface.is_empty() {
        return;
    }
    frame.render_widget(SurfaceView::new(state.surface), area);
}
