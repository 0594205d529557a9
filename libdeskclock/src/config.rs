//! Configuration management for deskclock
//!
//! Preferences only: the file is read at startup and never written back,
//! and no alarm, timer or stopwatch state is kept in it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::format::{HourFormat, Language};
use crate::timer::DEFAULT_TIMER_SECONDS;
use crate::zones::DEFAULT_ZONES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub zones: ZonesConfig,
    pub alarm: AlarmConfig,
    pub timer: TimerConfig,
    pub cadence: CadenceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub language: Language,
    pub military_time: bool,
    /// Blink the clock separators on each refresh
    pub blink: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZonesConfig {
    pub list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    pub default_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Preset shown in the timer entry, `H:MM:SS`
    pub default_duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    pub refresh_ms: u64,
    pub stopwatch_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            military_time: true,
            blink: true,
        }
    }
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            list: DEFAULT_ZONES.iter().map(|z| z.to_string()).collect(),
        }
    }
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            default_message: "Wake up!".to_string(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_duration: crate::format::format_duration(DEFAULT_TIMER_SECONDS),
        }
    }
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            refresh_ms: 200,
            stopwatch_ms: 50,
        }
    }
}

impl DisplayConfig {
    pub fn hour_format(&self) -> HourFormat {
        if self.military_time {
            HourFormat::TwentyFour
        } else {
            HourFormat::Twelve
        }
    }
}

impl TimerConfig {
    /// The preset in seconds; falls back to five minutes if unparsable or zero
    pub fn default_seconds(&self) -> u64 {
        match crate::format::parse_duration(&self.default_duration) {
            Ok(secs) if secs > 0 => secs,
            _ => DEFAULT_TIMER_SECONDS,
        }
    }
}

impl CadenceConfig {
    pub fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_ms.max(10))
    }

    pub fn stopwatch(&self) -> Duration {
        Duration::from_millis(self.stopwatch_ms.max(10))
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }
}

/// Resolve the configuration file path: `$DESKCLOCK_CONFIG`, else the platform config dir
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("DESKCLOCK_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("deskclock").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClockError;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.display.language, Language::Es);
        assert_eq!(config.display.hour_format(), HourFormat::TwentyFour);
        assert_eq!(config.zones.list.len(), 7);
        assert_eq!(config.timer.default_seconds(), 300);
        assert_eq!(config.cadence.refresh(), Duration::from_millis(200));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = Config::from_toml(
            r#"
[display]
language = "fr"
military_time = false

[zones]
list = ["UTC", "Asia/Tokyo"]
"#,
        )
        .unwrap();

        assert_eq!(config.display.language, Language::Fr);
        assert_eq!(config.display.hour_format(), HourFormat::Twelve);
        assert!(config.display.blink);
        assert_eq!(config.zones.list, vec!["UTC", "Asia/Tokyo"]);
        assert_eq!(config.alarm.default_message, "Wake up!");
    }

    #[test]
    fn test_unknown_language_is_parse_error() {
        let err = Config::from_toml("[display]\nlanguage = \"de\"\n").unwrap_err();
        assert!(matches!(err, ClockError::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = Config::default();
        config.timer.default_duration = "00:25:00".to_string();
        config.cadence.refresh_ms = 100;

        let text = toml::to_string(&config).unwrap();
        let parsed = Config::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.timer.default_seconds(), 1500);
    }

    #[test]
    fn test_bad_timer_preset_falls_back() {
        let mut config = Config::default();
        config.timer.default_duration = "00:00:00".to_string();
        assert_eq!(config.timer.default_seconds(), 300);
        config.timer.default_duration = "later".to_string();
        assert_eq!(config.timer.default_seconds(), 300);
        config.timer.default_duration = "9999999999999999:00:00".to_string();
        assert_eq!(config.timer.default_seconds(), 300);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[alarm]\ndefault_message = \"Coffee\"").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.alarm.default_message, "Coffee");
    }

    #[test]
    fn test_load_from_missing_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ClockError::Config(ConfigError::ReadError(_))));
    }

    #[test]
    #[serial]
    fn test_env_override_and_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::env::set_var("DESKCLOCK_CONFIG", &path);

        assert_eq!(resolve_config_path().unwrap(), path);
        assert_eq!(Config::load().unwrap(), Config::default());

        std::fs::write(&path, "[cadence]\nrefresh_ms = 500\n").unwrap();
        assert_eq!(Config::load().unwrap().cadence.refresh_ms, 500);

        std::env::remove_var("DESKCLOCK_CONFIG");
    }
}
