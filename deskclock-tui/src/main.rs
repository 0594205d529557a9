//! deskclock-tui - Terminal UI for deskclock
//!
//! Analog and digital clock with a localized date, alarm, countdown timer,
//! stopwatch with laps and a world clock table.

use std::time::Instant;

use chrono::{Local, Utc};
use crossterm::event::KeyEvent;
use deskclock_tui::{
    app::{event::{routes_to_entry, EventHandler, TuiEvent}, reduce, sync_tasks, Action, AppState, Tab, Task},
    error::Result,
    terminal::{install_panic_hook, restore_terminal, ring_bell, setup_terminal, Tui},
    ui,
};
use libdeskclock::{logging, Config, CueStrength, Scheduler};
use tui_textarea::TextArea;

fn main() -> Result<()> {
    // Never log to the terminal we are drawing on
    if let Err(e) = logging::init_file_from_env() {
        eprintln!("Warning: could not open log file: {}", e);
    }

    let config = Config::load()?;

    // Install panic hook to restore terminal on panic
    install_panic_hook();

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &config);

    restore_terminal(terminal)?;

    result
}

/// A fresh single-line entry for `tab`, prefilled with `content`
fn entry_for(tab: Tab, content: &str) -> TextArea<'static> {
    let mut textarea = if content.is_empty() {
        TextArea::default()
    } else {
        TextArea::new(vec![content.to_string()])
    };
    let (title, placeholder) = ui::entry_hint(tab);
    textarea.set_placeholder_text(placeholder);
    textarea.set_block(
        ratatui::widgets::Block::default()
            .title(title)
            .borders(ratatui::widgets::Borders::ALL),
    );
    textarea.move_cursor(tui_textarea::CursorMove::End);
    textarea
}

fn run_app(terminal: &mut Tui, config: &Config) -> Result<()> {
    let (cue_tx, cue_rx) = crossbeam_channel::bounded::<CueStrength>(16);
    let mut state = AppState::from_config(config).with_cues(cue_tx);

    let mut scheduler: Scheduler<Task> = Scheduler::new();
    let event_handler = EventHandler::new(state.config.refresh_ms);

    let mut entry_tab = state.current_tab;
    let mut entry = entry_for(entry_tab, state.entry.for_tab(entry_tab));

    // Draw real time on the first frame
    state = reduce(state, Action::Refresh { local: Local::now().naive_local(), utc: Utc::now() });
    sync_tasks(&mut scheduler, &state, Instant::now());

    loop {
        terminal.draw(|frame| {
            ui::render(frame, &state, &entry);
        })?;

        let now = Instant::now();
        let timeout = scheduler.time_until_next(now).unwrap_or_default();
        let event = event_handler.next(timeout)?;
        let now = Instant::now();

        let action = match event {
            TuiEvent::Key(key) if routes_to_entry(&state, &key) => type_into(&mut entry, key),
            other => other.into_action(now),
        };
        state = reduce(state, action);

        for task in scheduler.due(now) {
            let action = match task {
                Task::Refresh => Action::Refresh {
                    local: Local::now().naive_local(),
                    utc: Utc::now(),
                },
                Task::TimerSecond => Action::TimerSecond,
                Task::StopwatchDisplay => Action::StopwatchDisplay(now),
            };
            state = reduce(state, action);
        }
        sync_tasks(&mut scheduler, &state, now);

        for cue in cue_rx.try_iter() {
            ring_bell(terminal, cue.beeps());
        }

        // Rebuild the entry on tab switch or when the reducer cleared it
        if state.current_tab != entry_tab
            || entry.lines().join("") != state.entry.for_tab(state.current_tab)
        {
            entry_tab = state.current_tab;
            entry = entry_for(entry_tab, state.entry.for_tab(entry_tab));
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

fn type_into(entry: &mut TextArea<'static>, key: KeyEvent) -> Action {
    entry.input(key);
    Action::EntryChanged(entry.lines().join(""))
}
