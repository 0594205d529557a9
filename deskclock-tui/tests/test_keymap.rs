//! Test keybinding mappings to actions
//!
//! Verifies that keyboard input is correctly mapped to actions
//! through the reducer.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deskclock_tui::app::{reduce, Action, AppState, Tab};
use libdeskclock::{HourFormat, Language};

fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn press(state: AppState, code: KeyCode) -> AppState {
    reduce(state, Action::Key(key_event(code, KeyModifiers::NONE), Instant::now()))
}

fn press_ctrl(state: AppState, c: char) -> AppState {
    reduce(
        state,
        Action::Key(key_event(KeyCode::Char(c), KeyModifiers::CONTROL), Instant::now()),
    )
}

fn on_tab(tab: Tab) -> AppState {
    reduce(AppState::new(), Action::NavigateTo(tab))
}

#[test]
fn test_q_quits_on_clock_tab() {
    let new_state = press(AppState::new(), KeyCode::Char('q'));

    assert!(new_state.should_quit);
}

#[test]
fn test_q_does_not_quit_on_entry_tabs() {
    for tab in [Tab::Alarm, Tab::Timer, Tab::Zones] {
        let new_state = press(on_tab(tab), KeyCode::Char('q'));
        assert!(!new_state.should_quit, "{:?}", tab);
    }
}

#[test]
fn test_ctrl_c_quits_everywhere() {
    for tab in Tab::ALL {
        let new_state = press_ctrl(on_tab(tab), 'c');
        assert!(new_state.should_quit, "{:?}", tab);
    }
}

#[test]
fn test_f1_toggles_help() {
    let state = AppState::new();
    assert!(!state.help_visible);

    let state = press(state, KeyCode::F(1));
    assert!(state.help_visible);

    let state = press(state, KeyCode::F(1));
    assert!(!state.help_visible);
}

#[test]
fn test_esc_hides_help() {
    let state = press(AppState::new(), KeyCode::F(1));
    let state = press(state, KeyCode::Esc);

    assert!(!state.help_visible);
}

#[test]
fn test_tab_and_backtab_cycle_tabs() {
    let state = press(AppState::new(), KeyCode::Tab);
    assert_eq!(state.current_tab, Tab::Alarm);

    let state = press(state, KeyCode::BackTab);
    let state = press(state, KeyCode::BackTab);
    assert_eq!(state.current_tab, Tab::Zones);
}

#[test]
fn test_f2_cycles_language() {
    let state = AppState::new();
    assert_eq!(state.session.language(), Language::Es);

    let state = press(state, KeyCode::F(2));
    assert_eq!(state.session.language(), Language::En);
    assert_eq!(state.status.message.as_deref(), Some("Language: en"));
}

#[test]
fn test_f3_toggles_hour_format() {
    let state = press(AppState::new(), KeyCode::F(3));
    assert_eq!(state.session.hour_format(), HourFormat::Twelve);

    let state = press(state, KeyCode::F(3));
    assert_eq!(state.session.hour_format(), HourFormat::TwentyFour);
}

#[test]
fn test_keys_ignored_behind_error_overlay() {
    let state = reduce(AppState::new(), Action::ShowError("bad".to_string()));

    let state = press(state, KeyCode::Tab);
    assert_eq!(state.current_tab, Tab::Clock);
    assert!(state.error.is_some());

    let state = press(state, KeyCode::Esc);
    assert!(state.error.is_none());
}

#[test]
fn test_enter_dismisses_notice() {
    let state = reduce(AppState::new(), Action::ShowNotice("Time's up!".to_string()));
    let state = press(state, KeyCode::Enter);

    assert!(state.notice.is_none());
}

#[test]
fn test_error_dismissed_before_notice() {
    let state = reduce(AppState::new(), Action::ShowNotice("Alarm!".to_string()));
    let state = reduce(state, Action::ShowError("bad".to_string()));

    let state = press(state, KeyCode::Esc);
    assert!(state.error.is_none());
    assert!(state.notice.is_some());
}

#[test]
fn test_stopwatch_keys() {
    let t0 = Instant::now();
    let state = on_tab(Tab::Stopwatch);

    let state = reduce(state, Action::Key(key_event(KeyCode::Char(' '), KeyModifiers::NONE), t0));
    assert!(state.session.stopwatch.is_running());

    let state = reduce(
        state,
        Action::Key(key_event(KeyCode::Char('l'), KeyModifiers::NONE), t0 + Duration::from_secs(2)),
    );
    assert_eq!(state.session.stopwatch.laps().len(), 1);

    let state = reduce(
        state,
        Action::Key(key_event(KeyCode::Char(' '), KeyModifiers::NONE), t0 + Duration::from_secs(3)),
    );
    assert!(!state.session.stopwatch.is_running());
    assert_eq!(state.stopwatch_display, "00:00:03.00");

    let state = press(state, KeyCode::Char('r'));
    assert!(state.session.stopwatch.laps().is_empty());
    assert_eq!(state.stopwatch_display, "00:00:00.00");
}

#[test]
fn test_stopwatch_keys_do_nothing_on_other_tabs() {
    let state = press(AppState::new(), KeyCode::Char(' '));

    assert!(!state.session.stopwatch.is_running());
}

#[test]
fn test_timer_ctrl_keys() {
    let mut state = on_tab(Tab::Timer);
    state.entry.timer = "0:00:30".to_string();

    let state = press(state, KeyCode::Enter);
    assert!(state.session.timer.is_running());

    let state = press_ctrl(state, 'p');
    assert!(!state.session.timer.is_running());

    let state = press_ctrl(state, 'r');
    assert_eq!(state.session.timer.remaining(), 30);
}

#[test]
fn test_alarm_ctrl_d_disarms() {
    let mut state = on_tab(Tab::Alarm);
    state.session.alarm.arm(8, 0, "").unwrap();

    let state = press_ctrl(state, 'd');
    assert!(!state.session.alarm.is_armed());
}

#[test]
fn test_zone_navigation_keys() {
    let state = on_tab(Tab::Zones);
    assert_eq!(state.zone_selected, 0);

    let state = press(state, KeyCode::Up);
    assert_eq!(state.zone_selected, 0);

    let state = press(state, KeyCode::Down);
    let state = press(state, KeyCode::Down);
    assert_eq!(state.zone_selected, 2);

    let state = press(state, KeyCode::Delete);
    assert_eq!(state.session.zones.len(), 6);
    assert!(!state.session.zones.contains("America/Mexico_City"));
}
