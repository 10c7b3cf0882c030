//! Instructor (roster) model and availability checks.
//!
//! An instructor is the person side of the assignment problem: a name, a
//! role, a same-day availability window, and a list of classes they must
//! never be placed on. The two predicates the engine hammers on every
//! candidate check — [`Instructor::is_available`] and
//! [`Instructor::can_teach`] — are pure and O(1) against the precomputed
//! lowercase exclusion set.

use serde::{Deserialize, Serialize};

use super::ClockTime;

/// What an instructor may do on the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Qualified to run a class on their own.
    Instructor,
    /// Supports an instructor; never staffs a class alone.
    Shadow,
}

/// A roster member with a daily availability window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    /// Display name; matched case-insensitively against cell hints.
    pub name: String,
    /// Fixed role for the whole schedule.
    pub role: Role,
    /// Earliest slot they can take (inclusive).
    pub window_start: ClockTime,
    /// Latest slot they can take (inclusive).
    pub window_end: ClockTime,
    /// Class names this person must never be assigned to (lowercased).
    cant_teach: Vec<String>,
}

impl Instructor {
    /// Creates an instructor available for the given window.
    pub fn new(
        name: impl Into<String>,
        role: Role,
        window_start: ClockTime,
        window_end: ClockTime,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            window_start,
            window_end,
            cant_teach: Vec::new(),
        }
    }

    /// Adds class names this instructor must never teach.
    pub fn with_cant_teach<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.cant_teach
            .extend(classes.into_iter().map(|c| c.as_ref().to_lowercase()));
        self
    }

    /// Whether this person works at the given slot.
    ///
    /// Both window bounds are inclusive: someone whose day ends at 12:40
    /// can still take the 12:40 slot.
    #[inline]
    pub fn is_available(&self, at: ClockTime) -> bool {
        self.window_start <= at && at <= self.window_end
    }

    /// Whether this person may be placed on the named class.
    ///
    /// Exclusion matching is case-insensitive.
    #[inline]
    pub fn can_teach(&self, class_name: &str) -> bool {
        let lower = class_name.to_lowercase();
        !self.cant_teach.iter().any(|c| *c == lower)
    }

    /// The configured exclusion list (lowercased).
    pub fn exclusions(&self) -> &[String] {
        &self.cant_teach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Instructor {
        Instructor::new(
            "Alice",
            Role::Instructor,
            ClockTime::from_hm(8, 5),
            ClockTime::from_hm(12, 40),
        )
    }

    #[test]
    fn test_window_inclusive_bounds() {
        let a = alice();
        assert!(a.is_available(ClockTime::from_hm(8, 5)));
        assert!(a.is_available(ClockTime::from_hm(12, 40)));
        assert!(a.is_available(ClockTime::from_hm(9, 10)));
        assert!(!a.is_available(ClockTime::from_hm(8, 0)));
        assert!(!a.is_available(ClockTime::from_hm(12, 45)));
    }

    #[test]
    fn test_can_teach_case_insensitive() {
        let a = alice().with_cant_teach(["Starters", "psl"]);
        assert!(!a.can_teach("starters"));
        assert!(!a.can_teach("STARTERS"));
        assert!(!a.can_teach("PSL"));
        assert!(a.can_teach("P1"));
    }

    #[test]
    fn test_no_exclusions_teaches_anything() {
        let a = alice();
        assert!(a.can_teach("P1"));
        assert!(a.can_teach("CNDTNG"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let a = alice().with_cant_teach(["P3"]);
        let json = serde_json::to_string(&a).unwrap();
        let back: Instructor = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "Alice");
        assert_eq!(back.role, Role::Instructor);
        assert!(!back.can_teach("p3"));
    }
}
