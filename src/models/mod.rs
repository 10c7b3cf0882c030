//! Staffing domain models.
//!
//! Core data types for the assignment problem: who can work when
//! ([`Instructor`]), what needs covering ([`ScheduleGrid`]), and what the
//! engine produced ([`FinalizedGrid`]).
//!
//! # Domain Mapping
//!
//! | aquasched | Generic term | Sheet term |
//! |-----------|--------------|------------|
//! | `Instructor` (role `Instructor`) | Primary | Instructor |
//! | `Instructor` (role `Shadow`) | Assistant | Shadow |
//! | `TaskColumn` | Task | Class column |
//! | `Cell` hint | Hint | Pre-filled cell text |
//! | `FinalizedGrid` | Output grid | Generated sheet |

mod clock;
mod grid;
mod instructor;
mod outcome;

pub use clock::{ClockTime, MalformedTimeError};
pub use grid::{Cell, ColumnKind, GridRow, ScheduleGrid, TaskColumn};
pub use instructor::{Instructor, Role};
pub use outcome::{CellOutcome, FinalizedCell, FinalizedGrid, FinalizedRow, Placement, UNFILLED};
