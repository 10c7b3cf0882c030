//! Run-scoped assignment bookkeeping.
//!
//! The ledger is built fresh for every engine run and discarded with it.
//! It answers the two questions every placement decision needs — how
//! loaded is this person, and is anyone already holding this slot — and
//! carries the one-shot break flag for the break pass.
//!
//! Occupancy is keyed by clock time, not row index: if a sheet carries two
//! rows with the same time, they share one occupancy set, so nobody is
//! double-booked across them either.

use std::collections::{HashMap, HashSet};

use crate::models::ClockTime;

/// Assignments needed before a person qualifies for their one break.
pub const BREAK_ELIGIBILITY_THRESHOLD: usize = 4;

#[derive(Debug, Clone, Default)]
struct LedgerEntry {
    /// Slots this person was placed at, in placement order (both roles).
    assignments: Vec<ClockTime>,
    /// Set once, the first time the break pass grants this person a break.
    has_used_break: bool,
}

/// Per-run placement history for a roster.
///
/// Instructors are addressed by roster index; the index order doubles as
/// the tie-break order wherever loads are equal.
#[derive(Debug, Clone)]
pub struct AssignmentLedger {
    entries: Vec<LedgerEntry>,
    occupied: HashMap<ClockTime, HashSet<usize>>,
}

impl AssignmentLedger {
    /// Creates an empty ledger for a roster of the given size.
    pub fn new(roster_len: usize) -> Self {
        Self {
            entries: vec![LedgerEntry::default(); roster_len],
            occupied: HashMap::new(),
        }
    }

    /// Records a placement (either role) at the given slot.
    pub fn record(&mut self, instructor: usize, slot: ClockTime) {
        self.entries[instructor].assignments.push(slot);
        self.occupied.entry(slot).or_default().insert(instructor);
    }

    /// Whether this person already holds any cell at the slot.
    pub fn is_occupied(&self, instructor: usize, slot: ClockTime) -> bool {
        self.occupied
            .get(&slot)
            .is_some_and(|set| set.contains(&instructor))
    }

    /// Total placements so far for this person.
    pub fn assignment_count(&self, instructor: usize) -> usize {
        self.entries[instructor].assignments.len()
    }

    /// Slots this person has been placed at, in placement order.
    pub fn assignments(&self, instructor: usize) -> &[ClockTime] {
        &self.entries[instructor].assignments
    }

    /// Whether this person qualifies for a break right now: loaded past
    /// the threshold and not yet granted one.
    pub fn break_eligible(&self, instructor: usize) -> bool {
        let entry = &self.entries[instructor];
        !entry.has_used_break && entry.assignments.len() >= BREAK_ELIGIBILITY_THRESHOLD
    }

    /// Consumes this person's single break.
    pub fn mark_break_used(&mut self, instructor: usize) {
        self.entries[instructor].has_used_break = true;
    }

    /// Whether this person's break has been granted.
    pub fn has_used_break(&self, instructor: usize) -> bool {
        self.entries[instructor].has_used_break
    }

    /// Roster indices sorted by load, fewest assignments first.
    ///
    /// The sort is stable, so equal loads keep roster order — the explicit,
    /// reproducible tie-break for gap filling.
    pub fn least_loaded_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by_key(|&i| self.entries[i].assignments.len());
        order
    }
}
