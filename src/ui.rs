use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use tomato::{
    controller::{Accent, ActiveButton, SessionController},
    duration::format_clock,
};

use crate::App;

const HORIZONTAL_PADDING: u16 = 2;
const BUTTON_PADDING: usize = 3;
// gauge, clock, buttons and the blank rows between them, plus borders
const BOX_HEIGHT: u16 = 9;

/// Progress bar width for a terminal `width` columns wide.
pub fn progress_width(width: u16) -> u16 {
    (f64::from(width) * 0.64) as u16
}

fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Red => Color::Red,
        Accent::Green => Color::Green,
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn button_width(label: &str) -> usize {
    label.width() + 2 * BUTTON_PADDING
}

fn button<'a>(label: &str, active: bool, accent: Color) -> Span<'a> {
    let pad = " ".repeat(BUTTON_PADDING);
    let style = if active {
        Style::default()
            .fg(Color::White)
            .bg(accent)
            .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).bg(Color::Gray)
    };
    Span::styled(format!("{pad}{label}{pad}"), style)
}

fn buttons_line<'a>(session: &SessionController, accent: Color) -> Line<'a> {
    let active = session.active_button();
    Line::from(vec![
        button(
            session.start_pause_label(),
            active == ActiveButton::StartPause,
            accent,
        ),
        Span::raw("  "),
        button(
            &session.style().stop_label,
            active == ActiveButton::Stop,
            accent,
        ),
    ])
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cycle = &self.cycle;
        let session = cycle.controller();
        let accent = accent_color(session.style().accent);

        let bar_width = progress_width(session.viewport().width.min(area.width));
        let buttons_width = button_width(session.start_pause_label())
            + 2
            + button_width(&session.style().stop_label);
        let content_width = (bar_width as usize).max(buttons_width) as u16;
        let frame = centered(
            area,
            content_width + 2 * (HORIZONTAL_PADDING + 1),
            BOX_HEIGHT,
        );

        let title = format!(" {} | {} done ", cycle.mode(), cycle.focus_completed());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center);
        let inner = block.inner(frame);
        block.render(frame, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_PADDING)
            .constraints([
                Constraint::Length(1), // padding
                Constraint::Length(1), // progress
                Constraint::Length(1),
                Constraint::Length(1), // time left
                Constraint::Length(1),
                Constraint::Length(1), // buttons
                Constraint::Min(0),
            ])
            .split(inner);

        Gauge::default()
            .gauge_style(Style::default().fg(accent).bg(Color::Black))
            .ratio(session.percent_complete().clamp(0.0, 1.0))
            .label("")
            .render(centered(chunks[1], bar_width, 1), buf);

        Paragraph::new(Span::styled(
            format_clock(session.remaining()),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        Paragraph::new(buttons_line(session, accent))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }
}
