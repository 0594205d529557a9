//! Application state
//!
//! All state transitions happen through the reducer (see `reducer.rs`).

use crossbeam_channel::Sender;
use libdeskclock::format::format_elapsed;
use libdeskclock::{ClockSession, Config, CueSink, CueStrength, NullCueSink, Refresh};

use super::actions::Tab;

/// Root application state
///
/// This is the single source of truth for the entire application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Current active tab
    pub current_tab: Tab,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Alarm, timer, stopwatch and zone table
    pub session: ClockSession,

    /// Output of the latest refresh tick
    pub view: ClockView,

    /// Stopwatch text, updated while it runs
    pub stopwatch_display: String,

    /// Entry line contents per tab
    pub entry: EntryState,

    /// Highlighted row of the zone table
    pub zone_selected: usize,

    /// Message used when the alarm entry has none
    pub default_alarm_message: String,

    /// Alarm fired / timer finished overlay
    pub notice: Option<String>,

    /// Status bar state
    pub status: StatusBarState,

    /// Error overlay state
    pub error: Option<String>,

    /// UI configuration
    pub config: UiConfig,

    /// Where the core sends audible cues; `None` discards them
    pub cues: Option<Sender<CueStrength>>,
}

/// What the clock tab shows
#[derive(Debug, Clone, Default)]
pub struct ClockView {
    /// Last refresh, `None` until the first tick
    pub latest: Option<Refresh>,
}

/// Entry line contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryState {
    pub alarm: String,
    pub timer: String,
    pub zone: String,
}

/// Status bar state
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    /// Current status message
    pub message: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Clock refresh period in milliseconds
    pub refresh_ms: u64,

    /// Stopwatch redraw period in milliseconds
    pub stopwatch_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl UiConfig {
    /// Cadences from the config file, with environment overrides
    pub fn from_config(config: &Config) -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err()
            && std::env::var("DESKCLOCK_TUI_NO_COLOR").is_err();

        let refresh_ms = std::env::var("DESKCLOCK_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(config.cadence.refresh_ms);

        Self {
            colors_enabled,
            refresh_ms: refresh_ms.max(10),
            stopwatch_ms: config.cadence.stopwatch().as_millis() as u64,
        }
    }
}

impl EntryState {
    pub fn for_tab(&self, tab: Tab) -> &str {
        match tab {
            Tab::Alarm => &self.alarm,
            Tab::Timer => &self.timer,
            Tab::Zones => &self.zone,
            Tab::Clock | Tab::Stopwatch => "",
        }
    }

    pub fn set_for_tab(&mut self, tab: Tab, content: String) {
        match tab {
            Tab::Alarm => self.alarm = content,
            Tab::Timer => self.timer = content,
            Tab::Zones => self.zone = content,
            Tab::Clock | Tab::Stopwatch => {}
        }
    }
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Clock,
            help_visible: false,
            session: ClockSession::from_config(config),
            view: ClockView::default(),
            stopwatch_display: format_elapsed(0.0),
            entry: EntryState {
                timer: config.timer.default_duration.clone(),
                ..EntryState::default()
            },
            zone_selected: 0,
            default_alarm_message: config.alarm.default_message.clone(),
            notice: None,
            status: StatusBarState::default(),
            error: None,
            config: UiConfig::from_config(config),
            cues: None,
        }
    }

    /// Route audible cues to `sender`
    pub fn with_cues(self, sender: Sender<CueStrength>) -> Self {
        Self {
            cues: Some(sender),
            ..self
        }
    }

    /// Any overlay on screen? Overlays take keys before the tabs do.
    pub fn overlay_visible(&self) -> bool {
        self.help_visible || self.error.is_some() || self.notice.is_some()
    }
}

/// The cue sink for a state's channel
pub fn cue_sink(cues: &Option<Sender<CueStrength>>) -> &dyn CueSink {
    match cues {
        Some(sender) => sender,
        None => &NullCueSink,
    }
}
