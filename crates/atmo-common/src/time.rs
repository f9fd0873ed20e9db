//! Time handling for time-sliced grid tiles.
//!
//! Tiles are addressed by their valid time serialized as a compact
//! `YYYYMMDDHHmm` UTC string.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::{AtmoError, AtmoResult};

/// Format used for tile addressing.
pub const COMPACT_FORMAT: &str = "%Y%m%d%H%M";

const SECONDS_PER_HOUR: i64 = 3600;

/// A UTC instant identifying one time slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidTime(DateTime<Utc>);

impl ValidTime {
    pub fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Parse a compact `YYYYMMDDHHmm` string.
    pub fn parse_compact(s: &str) -> AtmoResult<Self> {
        let invalid = || AtmoError::InvalidTime(s.to_string());

        if s.len() != 12 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let field = |range: std::ops::Range<usize>| -> AtmoResult<u32> {
            s[range].parse::<u32>().map_err(|_| invalid())
        };

        let year = field(0..4)? as i32;
        let month = field(4..6)?;
        let day = field(6..8)?;
        let hour = field(8..10)?;
        let minute = field(10..12)?;

        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Serialize as `YYYYMMDDHHmm`.
    pub fn compact(&self) -> String {
        self.0.format(COMPACT_FORMAT).to_string()
    }

    /// Round down to the whole hour.
    pub fn truncate_to_hour(&self) -> Self {
        let secs = self.0.timestamp();
        let floored = secs - secs.rem_euclid(SECONDS_PER_HOUR);
        // Flooring a valid timestamp stays within chrono's range.
        Self(Utc.timestamp_opt(floored, 0).single().unwrap_or(self.0))
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for ValidTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for ValidTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact())
    }
}

impl Serialize for ValidTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.compact())
    }
}

impl<'de> Deserialize<'de> for ValidTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ValidTime::parse_compact(&s).map_err(serde::de::Error::custom)
    }
}

/// Inclusive `[start, end]` range of published time slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub start: ValidTime,
    pub end: ValidTime,
}

impl Coverage {
    /// Both bounds are truncated to the hour; `start` must not be after `end`.
    pub fn new(start: ValidTime, end: ValidTime) -> AtmoResult<Self> {
        let start = start.truncate_to_hour();
        let end = end.truncate_to_hour();
        if start > end {
            return Err(AtmoError::InvalidTime(format!(
                "coverage start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Truncate a requested instant to its hour and clamp it into the
    /// coverage. Only whole-hour slices are published.
    pub fn resolve(&self, requested: ValidTime) -> ValidTime {
        requested.truncate_to_hour().max(self.start).min(self.end)
    }

    /// The instant shown when nothing was requested: the last whole hour
    /// before `now`, clamped into the coverage.
    pub fn default_instant(&self, now: DateTime<Utc>) -> ValidTime {
        self.resolve(ValidTime::new(now))
    }

    pub fn contains(&self, t: ValidTime) -> bool {
        t >= self.start && t <= self.end
    }
}
