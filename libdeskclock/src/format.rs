//! Time formatting utilities
//!
//! Pure functions turning timestamps and durations into display strings:
//! the localized long date, the digital clock face, and the `HH:MM:SS`
//! style strings shown by the timer and the stopwatch.

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::{ClockError, Result};

/// Display language for the long date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Pt,
    Fr,
}

struct DateTable {
    weekdays: [&'static str; 7],
    months: [&'static str; 12],
    template: &'static str,
}

const ES: DateTable = DateTable {
    weekdays: ["lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo"],
    months: [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
        "septiembre", "octubre", "noviembre", "diciembre",
    ],
    template: "{weekday}, {day} de {month} de {year}",
};

const EN: DateTable = DateTable {
    weekdays: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"],
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ],
    template: "{weekday}, {month} {day}, {year}",
};

const PT: DateTable = DateTable {
    weekdays: [
        "segunda-feira", "terça-feira", "quarta-feira", "quinta-feira", "sexta-feira",
        "sábado", "domingo",
    ],
    months: [
        "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto",
        "setembro", "outubro", "novembro", "dezembro",
    ],
    template: "{weekday}, {day} de {month} de {year}",
};

const FR: DateTable = DateTable {
    weekdays: ["lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche"],
    months: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
        "septembre", "octobre", "novembre", "décembre",
    ],
    template: "{weekday} {day} {month} {year}",
};

impl Language {
    pub const ALL: [Language; 4] = [Language::Es, Language::En, Language::Pt, Language::Fr];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
            Language::Pt => "pt",
            Language::Fr => "fr",
        }
    }

    /// Parse a language code, falling back to the default language
    /// when the code is not supported
    pub fn resolve(code: &str) -> Self {
        code.parse().unwrap_or_else(|e: ClockError| {
            warn!(error = %e, fallback = Language::default().code(), "falling back to default language");
            Language::default()
        })
    }

    /// The next language in the supported set, wrapping around
    pub fn next(&self) -> Self {
        let pos = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    fn table(&self) -> &'static DateTable {
        match self {
            Language::Es => &ES,
            Language::En => &EN,
            Language::Pt => &PT,
            Language::Fr => &FR,
        }
    }
}

impl FromStr for Language {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            "pt" => Ok(Language::Pt),
            "fr" => Ok(Language::Fr),
            _ => Err(ClockError::UnsupportedLanguage(format!(
                "'{}' (supported: es, en, pt, fr)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// 12 or 24 hour clock face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HourFormat {
    #[default]
    TwentyFour,
    Twelve,
}

impl HourFormat {
    pub fn toggled(&self) -> Self {
        match self {
            HourFormat::TwentyFour => HourFormat::Twelve,
            HourFormat::Twelve => HourFormat::TwentyFour,
        }
    }
}

/// Long date in the given language, e.g. "Martes, 03 de marzo de 2026"
pub fn format_localized_date<T: Datelike>(timestamp: &T, language: Language) -> String {
    let table = language.table();
    let weekday = table.weekdays[timestamp.weekday().num_days_from_monday() as usize];
    let month = table.months[timestamp.month0() as usize];

    let text = table
        .template
        .replace("{weekday}", weekday)
        .replace("{day}", &format!("{:02}", timestamp.day()))
        .replace("{month}", month)
        .replace("{year}", &timestamp.year().to_string());

    capitalize_first(&text)
}

/// Same as [`format_localized_date`] for a raw language code; unsupported
/// codes use the default language
pub fn format_localized_date_code<T: Datelike>(timestamp: &T, code: &str) -> String {
    format_localized_date(timestamp, Language::resolve(code))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `HH:MM:SS`; hours are not capped at 99
pub fn format_duration(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// `HH:MM:SS.cc` with the hundredths truncated
pub fn format_elapsed(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 { seconds } else { 0.0 };
    let whole = seconds.trunc() as u64;
    let centis = ((seconds - seconds.trunc()) * 100.0) as u64;
    format!("{}.{:02}", format_duration(whole), centis.min(99))
}

/// Parse `H:MM:SS` back into seconds
///
/// Hours are unbounded; minutes and seconds must be below 60.
pub fn parse_duration(text: &str) -> Result<u64> {
    let (h, m, s) = parse_hms(text)?;
    if m > 59 || s > 59 {
        return Err(ClockError::Validation(format!(
            "'{}': minutes and seconds must be between 00 and 59",
            text
        )));
    }
    h.checked_mul(3600)
        .and_then(|h| h.checked_add(m * 60 + s))
        .ok_or_else(|| ClockError::Validation(format!("'{}': duration is too long", text)))
}

/// Split `H:MM:SS` into its three fields without range checks
pub(crate) fn parse_hms(text: &str) -> Result<(u64, u64, u64)> {
    let fields: Vec<&str> = text.trim().split(':').collect();
    if fields.len() != 3 {
        return Err(ClockError::Validation(format!(
            "'{}': expected HH:MM:SS",
            text
        )));
    }

    let parse = |field: &str| {
        field.trim().parse::<u64>().map_err(|_| {
            ClockError::Validation(format!("'{}': '{}' is not a number", text, field))
        })
    };

    Ok((parse(fields[0])?, parse(fields[1])?, parse(fields[2])?))
}

/// Digital clock text
///
/// When `separator_visible` is false the colons become spaces, which gives
/// the blinking effect when alternated on each refresh.
pub fn format_clock<T: Timelike>(timestamp: &T, format: HourFormat, separator_visible: bool) -> String {
    let sep = if separator_visible { ':' } else { ' ' };
    match format {
        HourFormat::TwentyFour => format!(
            "{:02}{sep}{:02}{sep}{:02}",
            timestamp.hour(),
            timestamp.minute(),
            timestamp.second()
        ),
        HourFormat::Twelve => {
            let (pm, hour12) = timestamp.hour12();
            format!(
                "{:02}{sep}{:02}{sep}{:02} {}",
                hour12,
                timestamp.minute(),
                timestamp.second(),
                if pm { "PM" } else { "AM" }
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_localized_date_spanish() {
        // 2024-03-05 was a Tuesday
        let date = at(2024, 3, 5, 10, 0, 0);
        assert_eq!(
            format_localized_date(&date, Language::Es),
            "Martes, 05 de marzo de 2024"
        );
    }

    #[test]
    fn test_localized_date_english() {
        let date = at(2024, 3, 5, 10, 0, 0);
        assert_eq!(
            format_localized_date(&date, Language::En),
            "Tuesday, March 05, 2024"
        );
    }

    #[test]
    fn test_localized_date_portuguese_and_french() {
        let date = at(2023, 8, 14, 0, 0, 0); // Monday
        assert_eq!(
            format_localized_date(&date, Language::Pt),
            "Segunda-feira, 14 de agosto de 2023"
        );
        assert_eq!(format_localized_date(&date, Language::Fr), "Lundi 14 août 2023");
    }

    #[test]
    fn test_capitalize_keeps_accented_word_intact() {
        let date = at(2024, 3, 6, 0, 0, 0);
        assert_eq!(
            format_localized_date(&date, Language::Es),
            "Miércoles, 06 de marzo de 2024"
        );
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("été"), "Été");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_unsupported_language_falls_back() {
        let date = at(2024, 3, 5, 10, 0, 0);
        assert_eq!(
            format_localized_date_code(&date, "de"),
            format_localized_date(&date, Language::Es)
        );
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        let err = "xx".parse::<Language>().unwrap_err();
        assert!(matches!(err, ClockError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_language_cycle() {
        assert_eq!(Language::Es.next(), Language::En);
        assert_eq!(Language::Fr.next(), Language::Es);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(300), "00:05:00");
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(360_000), "100:00:00");
    }

    #[test]
    fn test_format_duration_round_trip() {
        for s in (0..360_000u64).step_by(997).chain([59, 60, 3599, 3600, 359_999]) {
            assert_eq!(parse_duration(&format_duration(s)).unwrap(), s);
        }
    }

    #[test]
    fn test_format_elapsed_truncates() {
        assert_eq!(format_elapsed(0.0), "00:00:00.00");
        assert_eq!(format_elapsed(1.5), "00:00:01.50");
        assert_eq!(format_elapsed(59.999), "00:00:59.99");
        assert_eq!(format_elapsed(3725.257), "01:02:05.25");
    }

    #[test]
    fn test_format_elapsed_clamps_bad_input() {
        assert_eq!(format_elapsed(-3.0), "00:00:00.00");
        assert_eq!(format_elapsed(f64::NAN), "00:00:00.00");
    }

    #[test]
    fn test_parse_duration_rejects_malformed() {
        assert!(parse_duration("1:2").is_err());
        assert!(parse_duration("aa:00:00").is_err());
        assert!(parse_duration("00:60:00").is_err());
        assert!(parse_duration("00:00:75").is_err());
    }

    #[test]
    fn test_parse_duration_rejects_oversized_hours() {
        assert!(matches!(
            parse_duration("9999999999999999:00:00"),
            Err(ClockError::Validation(_))
        ));
        assert_eq!(parse_duration("1000:00:00").unwrap(), 3_600_000);
    }

    #[test]
    fn test_format_clock_24h() {
        let t = at(2024, 1, 1, 17, 4, 9);
        assert_eq!(format_clock(&t, HourFormat::TwentyFour, true), "17:04:09");
        assert_eq!(format_clock(&t, HourFormat::TwentyFour, false), "17 04 09");
    }

    #[test]
    fn test_format_clock_12h() {
        assert_eq!(
            format_clock(&at(2024, 1, 1, 17, 4, 9), HourFormat::Twelve, true),
            "05:04:09 PM"
        );
        assert_eq!(
            format_clock(&at(2024, 1, 1, 0, 30, 0), HourFormat::Twelve, true),
            "12:30:00 AM"
        );
    }
}
