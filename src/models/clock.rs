//! Wall-clock time model and normalization.
//!
//! All scheduling happens within a single day, so a time point is just
//! minutes since midnight. Input sheets carry times in several textual
//! forms ("8:35", "8:35 AM", "20:35", "9am"); [`ClockTime::parse`] folds
//! them all into one comparable representation.
//!
//! # Ambiguous bare hours
//!
//! A time with no am/pm marker and an hour of 1–7 is read as PM, 8–11 as
//! AM, and 12 as noon — a swim school does not run lessons at 3 in the
//! morning. Hours 0 and 13–23 pass through as 24-hour values. Downstream
//! behavior depends on this rule; do not change it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Raised when a time string matches none of the accepted formats.
///
/// This is the one fatal input error in the crate: a malformed time means
/// the sheet itself needs fixing, so it is surfaced instead of degraded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported time format: {value:?}")]
pub struct MalformedTimeError {
    /// The offending input, verbatim.
    pub value: String,
}

/// A point in the day, stored as minutes since midnight.
///
/// Total order matches wall-clock order; comparisons are O(1).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Creates a time from hour (0–23) and minute (0–59) components.
    pub fn from_hm(hour: u16, minute: u16) -> Self {
        debug_assert!(hour < 24 && minute < 60);
        Self(hour * 60 + minute)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component (0–23).
    #[inline]
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component (0–59).
    #[inline]
    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Parses a time string in any accepted form.
    ///
    /// Accepted formats, case-insensitive, surrounding whitespace ignored:
    ///
    /// | Form | Example | Read as |
    /// |------|---------|---------|
    /// | `H:MM` / `HH:MM` | `"8:35"`, `"20:35"` | bare-hour heuristic applies |
    /// | `H:MM:SS` | `"09:10:00"` | seconds validated, then dropped |
    /// | `H:MM am/pm` | `"8:35 AM"`, `"1:15pm"` | 12-hour clock |
    /// | `H am/pm` | `"9am"` | 12-hour clock, minute 0 |
    /// | `H` | `"9"` | bare-hour heuristic applies |
    ///
    /// With a marker the hour must be 1–12. Without one, hours 1–7 are
    /// shifted to PM, 8–11 stay AM, 12 is noon, and 0 / 13–23 are taken
    /// as 24-hour values.
    pub fn parse(input: &str) -> Result<Self, MalformedTimeError> {
        let err = || MalformedTimeError {
            value: input.to_string(),
        };

        let lower = input.trim().to_ascii_lowercase();
        let (body, meridiem) = if let Some(rest) = lower.strip_suffix("am") {
            (rest.trim_end(), Some(Meridiem::Am))
        } else if let Some(rest) = lower.strip_suffix("pm") {
            (rest.trim_end(), Some(Meridiem::Pm))
        } else {
            (lower.as_str(), None)
        };

        let mut fields = body.split(':');
        let hour: u16 = fields
            .next()
            .and_then(|f| f.trim().parse().ok())
            .ok_or_else(err)?;
        let minute: u16 = match fields.next() {
            Some(f) => f.trim().parse().map_err(|_| err())?,
            None => 0,
        };
        if let Some(f) = fields.next() {
            let second: u16 = f.trim().parse().map_err(|_| err())?;
            if second >= 60 {
                return Err(err());
            }
        }
        if fields.next().is_some() || minute >= 60 {
            return Err(err());
        }

        let hour24 = match meridiem {
            Some(m) => {
                if !(1..=12).contains(&hour) {
                    return Err(err());
                }
                match (m, hour) {
                    (Meridiem::Am, 12) => 0,
                    (Meridiem::Am, h) => h,
                    (Meridiem::Pm, 12) => 12,
                    (Meridiem::Pm, h) => h + 12,
                }
            }
            // Bare-hour heuristic: 1-7 PM, 8-11 AM, 12 noon, rest 24-hour.
            None => match hour {
                1..=7 => hour + 12,
                8..=12 => hour,
                0 | 13..=23 => hour,
                _ => return Err(err()),
            },
        };

        Ok(Self::from_hm(hour24, minute))
    }
}

#[derive(Clone, Copy)]
enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    #[test]
    fn test_hm_accessors() {
        let c = ClockTime::from_hm(9, 10);
        assert_eq!(c.minutes(), 550);
        assert_eq!(c.hour(), 9);
        assert_eq!(c.minute(), 10);
    }

    #[test]
    fn test_parse_24_hour() {
        assert_eq!(t("20:35"), ClockTime::from_hm(20, 35));
        assert_eq!(t("13:00"), ClockTime::from_hm(13, 0));
        assert_eq!(t("0:05"), ClockTime::from_hm(0, 5));
    }

    #[test]
    fn test_parse_with_marker() {
        assert_eq!(t("8:35 AM"), ClockTime::from_hm(8, 35));
        assert_eq!(t("8:35am"), ClockTime::from_hm(8, 35));
        assert_eq!(t("1:15 pm"), ClockTime::from_hm(13, 15));
        assert_eq!(t("12:00 PM"), ClockTime::from_hm(12, 0));
        assert_eq!(t("12:00 AM"), ClockTime::from_hm(0, 0));
        assert_eq!(t("9am"), ClockTime::from_hm(9, 0));
    }

    #[test]
    fn test_parse_with_seconds() {
        assert_eq!(t("09:10:00"), ClockTime::from_hm(9, 10));
        assert!(ClockTime::parse("09:10:75").is_err());
    }

    #[test]
    fn test_bare_hour_heuristic() {
        // 1-7 → PM
        assert_eq!(t("1:30"), ClockTime::from_hm(13, 30));
        assert_eq!(t("7:45"), ClockTime::from_hm(19, 45));
        // 8-11 → AM
        assert_eq!(t("8:05"), ClockTime::from_hm(8, 5));
        assert_eq!(t("11:50"), ClockTime::from_hm(11, 50));
        // 12 → noon
        assert_eq!(t("12:40"), ClockTime::from_hm(12, 40));
        // Bare hour with no minutes
        assert_eq!(t("9"), ClockTime::from_hm(9, 0));
        assert_eq!(t("3"), ClockTime::from_hm(15, 0));
    }

    #[test]
    fn test_marker_overrides_heuristic() {
        // "8:35" alone is AM by the heuristic; an explicit marker wins.
        assert_eq!(t("8:35 PM"), ClockTime::from_hm(20, 35));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "noon", "25:00", "9:61", "13:00 PM", "8:15:00:00"] {
            let e = ClockTime::parse(bad).unwrap_err();
            assert_eq!(e.value, bad);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(t("8:05") < t("9:10"));
        assert!(t("9:10") <= t("9:10"));
        assert!(t("12:40") > t("11:50"));
    }

    #[test]
    fn test_display() {
        assert_eq!(t("8:05").to_string(), "8:05");
        assert_eq!(t("20:35").to_string(), "20:35");
    }

    #[test]
    fn test_serde_roundtrip() {
        let c = ClockTime::from_hm(9, 10);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "550");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
