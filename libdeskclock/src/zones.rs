//! World clock table
//!
//! An insertion-ordered set of IANA zone identifiers, each validated
//! against the compiled-in tz database before it is accepted.

use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::{ClockError, Result};

/// Zones shown before the user changes anything
pub const DEFAULT_ZONES: [&str; 7] = [
    "UTC",
    "America/Bogota",
    "America/Mexico_City",
    "Europe/Madrid",
    "America/New_York",
    "Europe/London",
    "Asia/Tokyo",
];

/// How to address an entry for removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneRef<'a> {
    Index(usize),
    Name(&'a str),
}

/// One rendered row of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneTime {
    pub zone: String,
    pub time: String,
    /// UTC offset such as `+02:00`
    pub offset: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimezoneSet {
    zones: Vec<String>,
}

impl TimezoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from identifiers, skipping invalid ones and duplicates
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            if let Err(e) = set.add_zone(name.as_ref()) {
                debug!(error = %e, "skipping configured zone");
            }
        }
        set
    }

    pub fn with_defaults() -> Self {
        Self::from_names(DEFAULT_ZONES)
    }

    /// Add a zone by IANA identifier
    ///
    /// Returns `Ok(true)` if it was appended and `Ok(false)` if it was
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns `ClockError::InvalidZone` if the identifier is not in the tz
    /// database; the set is unchanged.
    pub fn add_zone(&mut self, identifier: &str) -> Result<bool> {
        let identifier = identifier.trim();
        let tz: Tz = identifier.parse().map_err(|_| {
            ClockError::InvalidZone(format!(
                "'{}' (use an IANA name such as Europe/Madrid or America/Los_Angeles)",
                identifier
            ))
        })?;

        if self.contains(identifier) {
            return Ok(false);
        }

        debug!(zone = %tz.name(), "zone added");
        self.zones.push(identifier.to_string());
        Ok(true)
    }

    /// Remove an entry; absent entries are ignored
    ///
    /// Returns whether anything was removed.
    pub fn remove_zone(&mut self, which: ZoneRef<'_>) -> bool {
        let index = match which {
            ZoneRef::Index(i) if i < self.zones.len() => Some(i),
            ZoneRef::Index(_) => None,
            ZoneRef::Name(name) => self.zones.iter().position(|z| z == name.trim()),
        };

        match index {
            Some(i) => {
                let removed = self.zones.remove(i);
                debug!(zone = %removed, "zone removed");
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.zones.iter().any(|z| z == identifier)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.zones
    }

    /// Local wall-clock time in every zone at `now_utc`
    ///
    /// Entries that no longer resolve are skipped.
    pub fn refresh(&self, now_utc: DateTime<Utc>) -> Vec<ZoneTime> {
        self.zones
            .iter()
            .filter_map(|name| match name.parse::<Tz>() {
                Ok(tz) => {
                    let local = now_utc.with_timezone(&tz);
                    Some(ZoneTime {
                        zone: name.clone(),
                        time: local.format("%H:%M:%S").to_string(),
                        offset: local.offset().fix().to_string(),
                    })
                }
                Err(_) => {
                    debug!(zone = %name, "zone no longer resolves, skipped");
                    None
                }
            })
            .collect()
    }
}
