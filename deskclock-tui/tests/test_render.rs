//! Rendering smoke tests against ratatui's test backend

use chrono::{NaiveDate, TimeZone, Utc};
use deskclock_tui::app::{reduce, Action, AppState, Tab};
use deskclock_tui::ui;
use ratatui::{backend::TestBackend, Terminal};
use tui_textarea::TextArea;

fn draw(state: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
    let entry = TextArea::default();
    terminal
        .draw(|frame| ui::render(frame, state, &entry))
        .unwrap();

    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn refreshed() -> AppState {
    let local = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 8, 0)
        .unwrap();
    let utc = Utc.from_utc_datetime(&local);
    reduce(AppState::new(), Action::Refresh { local, utc })
}

#[test]
fn test_every_tab_renders() {
    let mut state = refreshed();
    for tab in Tab::ALL {
        state = reduce(state, Action::NavigateTo(tab));
        let screen = draw(&state);
        assert!(screen.contains(tab.title()), "{:?}", tab);
    }
}

#[test]
fn test_clock_tab_shows_date_and_alarm_status() {
    let screen = draw(&refreshed());

    assert!(screen.contains("15 de enero de 2024"));
    assert!(screen.contains("Alarm off"));
}

#[test]
fn test_zones_tab_lists_rows() {
    let state = reduce(refreshed(), Action::NavigateTo(Tab::Zones));
    let screen = draw(&state);

    assert!(screen.contains("Asia/Tokyo"));
    assert!(screen.contains("19:08:00"));
}

#[test]
fn test_overlays_render_on_top() {
    let state = reduce(refreshed(), Action::ShowNotice("Time's up!".to_string()));
    assert!(draw(&state).contains("Time's up!"));

    let state = reduce(state, Action::ShowError("Invalid input: nope".to_string()));
    assert!(draw(&state).contains("Invalid input: nope"));

    let state = reduce(AppState::new(), Action::ShowHelp);
    assert!(draw(&state).contains("Keyboard Shortcuts"));
}

#[test]
fn test_renders_before_first_refresh() {
    let screen = draw(&AppState::new());

    assert!(screen.contains("--:--:--"));
}
