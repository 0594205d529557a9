//! UI rendering
//!
//! Render functions read state and draw to the frame; they never change
//! anything.

pub mod face;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, List, ListItem, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use libdeskclock::TimerState;

use crate::app::{AppState, Tab};

/// Render the application UI
///
/// The entry line widget is owned by the event loop and drawn on tabs
/// that have one.
pub fn render(frame: &mut Frame, state: &AppState, entry: &TextArea) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Body
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    render_tabs(frame, chunks[0], state);

    let body = if state.current_tab.has_entry() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(chunks[1]);
        frame.render_widget(entry, split[0]);
        split[1]
    } else {
        chunks[1]
    };

    match state.current_tab {
        Tab::Clock => render_clock(frame, body, state),
        Tab::Alarm => render_alarm(frame, body, state),
        Tab::Timer => render_timer(frame, body, state),
        Tab::Stopwatch => render_stopwatch(frame, body, state),
        Tab::Zones => render_zones(frame, body, state),
    }

    render_status_bar(frame, chunks[2], state);

    if state.help_visible {
        render_help_overlay(frame, area);
    }

    if let Some(ref notice) = state.notice {
        render_notice_overlay(frame, area, notice, state);
    }

    if let Some(ref error) = state.error {
        render_error_overlay(frame, area, error);
    }
}

/// Title and placeholder for the entry line of `tab`
pub fn entry_hint(tab: Tab) -> (&'static str, &'static str) {
    match tab {
        Tab::Alarm => (" Alarm time ", "HH:MM [message]  (Enter to arm)"),
        Tab::Timer => (" Duration ", "H:MM:SS or 5m  (Enter to start)"),
        Tab::Zones => (" Add zone ", "Europe/Madrid  (Enter to add)"),
        Tab::Clock | Tab::Stopwatch => ("", ""),
    }
}

fn accent(state: &AppState, color: Color) -> Style {
    if state.config.colors_enabled {
        Style::default().fg(color)
    } else {
        Style::default()
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" deskclock "))
        .select(state.current_tab.index())
        .highlight_style(accent(state, Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn render_clock(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let latest = state.view.latest.as_ref();
    face::render_face(
        frame,
        chunks[0],
        latest.map(|r| &r.hands),
        state.config.colors_enabled,
    );

    let (clock, date) = match latest {
        Some(r) => (r.clock.as_str(), r.date.as_str()),
        None => ("--:--:--", ""),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            clock.to_string(),
            accent(state, Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(date.to_string()),
        Line::from(""),
        Line::from(state.session.alarm.status_text()),
    ];
    if state.session.timer.state() != TimerState::Idle {
        lines.push(Line::from(format!(
            "Timer {} ({})",
            state.session.timer.display(),
            state.session.timer.status_text()
        )));
    }
    if state.session.stopwatch.is_running() {
        lines.push(Line::from(format!("Stopwatch {}", state.stopwatch_display)));
    }

    let digital = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(digital, chunks[1]);
}

fn render_alarm(frame: &mut Frame, area: Rect, state: &AppState) {
    let alarm = &state.session.alarm;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            alarm.status_text(),
            if alarm.is_armed() {
                accent(state, Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            },
        )),
    ];
    if alarm.is_armed() && !alarm.message().is_empty() {
        lines.push(Line::from(format!("\"{}\"", alarm.message())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: Arm | Ctrl+D: Disarm",
        accent(state, Color::Gray),
    )));

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Alarm "))
        .alignment(Alignment::Center);
    frame.render_widget(body, area);
}

fn render_timer(frame: &mut Frame, area: Rect, state: &AppState) {
    let timer = &state.session.timer;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(area);

    let color = match timer.state() {
        TimerState::Running => Color::Green,
        TimerState::Paused => Color::Yellow,
        TimerState::Expired => Color::Red,
        TimerState::Idle => Color::White,
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            timer.display(),
            accent(state, color).add_modifier(Modifier::BOLD),
        )),
        Line::from(timer.status_text()),
        Line::from(Span::styled(
            "Enter: Start | Ctrl+P: Pause/Resume | Ctrl+R: Reset",
            accent(state, Color::Gray),
        )),
    ];
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Timer "))
        .alignment(Alignment::Center);
    frame.render_widget(body, chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(accent(state, color))
        .ratio(timer.progress().clamp(0.0, 1.0));
    frame.render_widget(gauge, chunks[1]);
}

fn render_stopwatch(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let running = state.session.stopwatch.is_running();
    let lines = vec![
        Line::from(Span::styled(
            state.stopwatch_display.clone(),
            accent(state, if running { Color::Green } else { Color::White }).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Space: Start/Stop | l: Lap | r: Reset | q: Quit",
            accent(state, Color::Gray),
        )),
    ];
    let display = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Stopwatch "))
        .alignment(Alignment::Center);
    frame.render_widget(display, chunks[0]);

    // Newest lap on top
    let laps: Vec<ListItem> = state
        .session
        .stopwatch
        .laps()
        .iter()
        .rev()
        .map(|lap| ListItem::new(lap.describe()))
        .collect();
    let list = List::new(laps).block(Block::default().borders(Borders::ALL).title(" Laps "));
    frame.render_widget(list, chunks[1]);
}

fn render_zones(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows: Vec<Row> = match state.view.latest.as_ref() {
        Some(r) => r
            .zones
            .iter()
            .map(|z| Row::new(vec![Cell::from(z.zone.clone()), Cell::from(z.time.clone()), Cell::from(z.offset.clone())]))
            .collect(),
        None => Vec::new(),
    };

    let table = Table::new(
        rows,
        [Constraint::Percentage(50), Constraint::Length(10), Constraint::Length(8)],
    )
    .header(
        Row::new(vec!["Zone", "Time", "UTC"]).style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Zones (Up/Down: Select | Delete: Remove) "),
    )
    .row_highlight_style(accent(state, Color::Yellow).add_modifier(Modifier::REVERSED));

    let mut table_state = TableState::default().with_selected(Some(state.zone_selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Render status bar with the latest message and hints
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = if state.current_tab.has_entry() {
        "Tab: Next | F1: Help | F2: Language | F3: 12/24h | Ctrl+C: Quit"
    } else {
        "Tab: Next | F1: Help | F2: Language | F3: 12/24h | q: Quit"
    };

    let mut spans = Vec::new();
    if let Some(ref message) = state.status.message {
        spans.push(Span::styled(message.clone(), accent(state, Color::Green)));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::raw(format!("{} | ", state.session.language())));
    spans.push(Span::styled(hints, accent(state, Color::Gray)));

    let status = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  Tab/S-Tab - Switch tabs"),
        Line::from("  F1        - Toggle help"),
        Line::from("  F2        - Cycle date language"),
        Line::from("  F3        - Toggle 12/24 hour clock"),
        Line::from("  Esc       - Dismiss overlays"),
        Line::from("  Ctrl+C    - Quit (q on Clock and Stopwatch)"),
        Line::from(""),
        Line::from("Alarm:     Enter arm, Ctrl+D disarm"),
        Line::from("Timer:     Enter start, Ctrl+P pause, Ctrl+R reset"),
        Line::from("Stopwatch: Space start/stop, l lap, r reset"),
        Line::from("Zones:     Enter add, Up/Down select, Delete remove"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)))
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Alarm fired / timer finished
fn render_notice_overlay(frame: &mut Frame, area: Rect, notice: &str, state: &AppState) {
    let popup_area = centered_rect(50, 30, area);

    let mut text = vec![Line::from("")];
    text.extend(notice.lines().map(|l| {
        Line::from(Span::styled(l.to_string(), accent(state, Color::Yellow).add_modifier(Modifier::BOLD)))
    }));
    text.push(Line::from(""));
    text.push(Line::from("Press Enter or Esc to dismiss"));

    let widget = Paragraph::new(text)
        .block(Block::default()
            .title(" deskclock ")
            .borders(Borders::ALL)
            .border_style(accent(state, Color::Yellow)))
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(widget, popup_area);
}

/// Render error overlay
fn render_error_overlay(frame: &mut Frame, area: Rect, error: &str) {
    let popup_area = centered_rect(70, 30, area);

    let error_text = vec![
        Line::from(Span::styled("Error", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let error_widget = Paragraph::new(error_text)
        .block(Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)))
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_widget, popup_area);
}

/// Helper to create centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
