//! Swim-school staffing engine.
//!
//! Takes a weekly class grid (rows = time slots, columns = classes) and a
//! roster of instructors, and fills every active cell with a deterministic
//! greedy pass: preferred names first, then the least-loaded available
//! instructor. Heavily enrolled classes get a second instructor; a
//! designated `brk` column collects whoever is idle each slot.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Instructor`, `ScheduleGrid`, `ClockTime`,
//!   `FinalizedGrid`, `Placement`
//! - **`engine`**: The assignment passes — `AssignmentEngine`,
//!   `ScheduleMode`, hint parsing, the per-run ledger
//! - **`validation`**: Input integrity checks (duplicate names, inverted
//!   windows, duplicate columns)
//! - **`report`**: Post-run coverage metrics
//!
//! # Example
//!
//! ```
//! use aquasched::engine::{AssignmentEngine, ScheduleMode};
//! use aquasched::models::{ClockTime, Instructor, Role, ScheduleGrid};
//! use aquasched::report::CoverageReport;
//! use aquasched::validation::validate_inputs;
//!
//! let mut grid = ScheduleGrid::with_column_names(["P1", "PSL", "brk"]);
//! grid.push_template_row("8:35", &["Alice/6", "Dan", ""]).unwrap();
//! grid.push_template_row("9:10", &["7", "", ""]).unwrap();
//!
//! let roster = vec![
//!     Instructor::new(
//!         "Alice",
//!         Role::Instructor,
//!         ClockTime::parse("8:05").unwrap(),
//!         ClockTime::parse("12:40").unwrap(),
//!     ),
//!     Instructor::new(
//!         "Dan",
//!         Role::Instructor,
//!         ClockTime::parse("8:05").unwrap(),
//!         ClockTime::parse("12:40").unwrap(),
//!     ),
//! ];
//!
//! validate_inputs(&grid, &roster).unwrap();
//! let out = AssignmentEngine::new(ScheduleMode::Template).run(&grid, &roster);
//! let report = CoverageReport::calculate(&out, &roster);
//! assert!(report.fully_staffed());
//! ```
//!
//! A roster too thin for the grid is not an error: uncovered cells render
//! as the literal `unfilled` and show up in the coverage report.

pub mod engine;
pub mod models;
pub mod report;
pub mod validation;
