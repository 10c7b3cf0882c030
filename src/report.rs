//! Coverage metrics for a finalized schedule.
//!
//! Computes staffing indicators from a completed assignment run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Active cells | Cells the engine attempted to staff |
//! | Staffed cells | Active cells with at least one primary |
//! | Unfilled cells | Active cells nobody could cover |
//! | Fill rate | staffed / active |
//! | Load by name | Placements per roster member (both roles) |

use std::collections::HashMap;

use crate::models::{CellOutcome, FinalizedGrid, Instructor};

/// Coverage indicators for one assignment run.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Cells the engine attempted to staff.
    pub active_cells: usize,
    /// Active cells with at least one primary placed.
    pub staffed_cells: usize,
    /// `(row, column)` coordinates of every unfilled cell.
    pub unfilled: Vec<(usize, usize)>,
    /// Fraction of active cells staffed (1.0 for an empty grid).
    pub fill_rate: f64,
    /// Placement count per roster member, shadows included. Every roster
    /// name is present, idle members at zero.
    pub load_by_name: HashMap<String, usize>,
}

impl CoverageReport {
    /// Computes coverage from a finalized grid and the roster it was run
    /// against.
    pub fn calculate(grid: &FinalizedGrid, roster: &[Instructor]) -> Self {
        let mut staffed_cells = 0;
        let mut load_by_name: HashMap<String, usize> = roster
            .iter()
            .map(|inst| (inst.name.clone(), 0))
            .collect();

        for row in &grid.rows {
            for cell in &row.cells {
                if let CellOutcome::Staffed { placements, .. } = &cell.outcome {
                    staffed_cells += 1;
                    for placement in placements {
                        if let Some(count) = load_by_name.get_mut(&placement.name) {
                            *count += 1;
                        }
                    }
                }
            }
        }

        let unfilled = grid.unfilled_cells();
        let active_cells = staffed_cells + unfilled.len();
        let fill_rate = if active_cells == 0 {
            1.0
        } else {
            staffed_cells as f64 / active_cells as f64
        };

        Self {
            active_cells,
            staffed_cells,
            unfilled,
            fill_rate,
            load_by_name,
        }
    }

    /// Whether every active cell got covered.
    pub fn fully_staffed(&self) -> bool {
        self.unfilled.is_empty()
    }

    /// The most-loaded roster member, ties broken by name.
    pub fn busiest(&self) -> Option<(&str, usize)> {
        self.load_by_name
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
    }

    /// The least-loaded roster member, ties broken by name.
    pub fn idlest(&self) -> Option<(&str, usize)> {
        self.load_by_name
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .min_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AssignmentEngine, ScheduleMode};
    use crate::models::{ClockTime, Role, ScheduleGrid};

    fn member(name: &str) -> Instructor {
        Instructor::new(
            name,
            Role::Instructor,
            ClockTime::from_hm(8, 5),
            ClockTime::from_hm(12, 40),
        )
    }

    fn run(grid: &ScheduleGrid, roster: &[Instructor]) -> FinalizedGrid {
        AssignmentEngine::new(ScheduleMode::Template).run(grid, roster)
    }

    #[test]
    fn test_full_coverage() {
        let mut grid = ScheduleGrid::with_column_names(["P1", "brk"]);
        grid.push_template_row("9:10", &["Alice/6", ""]).unwrap();
        grid.push_template_row("9:45", &["3", ""]).unwrap();

        let roster = vec![member("Alice"), member("Bob")];
        let report = CoverageReport::calculate(&run(&grid, &roster), &roster);

        assert_eq!(report.active_cells, 2);
        assert_eq!(report.staffed_cells, 2);
        assert!(report.fully_staffed());
        assert_eq!(report.fill_rate, 1.0);
    }

    #[test]
    fn test_shortfall_reported() {
        let mut grid = ScheduleGrid::with_column_names(["P1", "P2"]);
        grid.push_template_row("9:10", &["4", "4"]).unwrap();

        let roster = vec![member("Alice")];
        let report = CoverageReport::calculate(&run(&grid, &roster), &roster);

        assert_eq!(report.active_cells, 2);
        assert_eq!(report.staffed_cells, 1);
        assert_eq!(report.unfilled, vec![(0, 1)]);
        assert!((report.fill_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_counts_idle_members() {
        let mut grid = ScheduleGrid::with_column_names(["P1"]);
        grid.push_template_row("9:10", &["Alice/3"]).unwrap();

        let roster = vec![member("Alice"), member("Bob")];
        let report = CoverageReport::calculate(&run(&grid, &roster), &roster);

        assert_eq!(report.load_by_name["Alice"], 1);
        assert_eq!(report.load_by_name["Bob"], 0);
        assert_eq!(report.busiest(), Some(("Alice", 1)));
        assert_eq!(report.idlest(), Some(("Bob", 0)));
    }

    #[test]
    fn test_empty_grid() {
        let grid = ScheduleGrid::with_column_names(["P1"]);
        let report = CoverageReport::calculate(&run(&grid, &[]), &[]);
        assert_eq!(report.active_cells, 0);
        assert_eq!(report.fill_rate, 1.0);
        assert!(report.fully_staffed());
    }
}
