//! Finalized schedule model (engine output).
//!
//! The engine hands back the grid in its original shape with every active
//! cell's content replaced: structured placements plus the rendered text
//! the sheet gets. Cells no primary could be found for carry the literal
//! sentinel [`UNFILLED`]; callers scan for it (or use
//! [`FinalizedGrid::unfilled_cells`]) to surface coverage warnings.

use serde::{Deserialize, Serialize};

use super::{ClockTime, Role, TaskColumn};

/// Rendered sentinel for an active cell that got no primary.
pub const UNFILLED: &str = "unfilled";

/// One person placed in one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Roster name (canonical casing).
    pub name: String,
    /// Role the person holds on the schedule.
    pub role: Role,
    /// Student headcount shown next to the name. `None` renders bare:
    /// private-lesson primaries, shadows, and doubled-up extras.
    pub student_count: Option<u32>,
}

impl Placement {
    /// A class-leading instructor shown with the cell's headcount.
    pub fn leading(name: impl Into<String>, student_count: u32) -> Self {
        Self {
            name: name.into(),
            role: Role::Instructor,
            student_count: Some(student_count),
        }
    }

    /// An instructor shown by name only.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::Instructor,
            student_count: None,
        }
    }

    /// An attached shadow.
    pub fn shadow(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::Shadow,
            student_count: None,
        }
    }

    /// Renders as `"Name (n)"` or bare `"Name"`.
    pub fn render(&self) -> String {
        match self.student_count {
            Some(n) => format!("{} ({})", self.name, n),
            None => self.name.clone(),
        }
    }
}

/// What happened to one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellOutcome {
    /// Inactive cell, left exactly as it was.
    Untouched,
    /// Active cell with no eligible primary; renders as [`UNFILLED`].
    Unfilled,
    /// Staffed cell: primaries first (in placement order), then shadows.
    Staffed {
        /// The people in the cell.
        placements: Vec<Placement>,
        /// Headcount parsed from the cell's hint.
        student_count: u32,
    },
    /// Break column content: idle-but-available people at this slot.
    BreakList(Vec<String>),
}

/// One finalized cell: structured outcome plus the rendered sheet text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedCell {
    /// Structured result.
    pub outcome: CellOutcome,
    /// Text as it goes back onto the sheet.
    pub text: String,
}

/// One finalized row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizedRow {
    /// Normalized slot time.
    pub time: ClockTime,
    /// Original time label, kept for output.
    pub time_label: String,
    /// One finalized cell per column.
    pub cells: Vec<FinalizedCell>,
}

/// The finalized grid: same shape as the input, contents rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizedGrid {
    /// Columns, unchanged from the input grid.
    pub columns: Vec<TaskColumn>,
    /// Finalized rows in input order.
    pub rows: Vec<FinalizedRow>,
}

impl FinalizedGrid {
    /// Header row: `Time` followed by the column names.
    pub fn header(&self) -> Vec<String> {
        std::iter::once("Time".to_string())
            .chain(self.columns.iter().map(|c| c.name.clone()))
            .collect()
    }

    /// Flat preview: one row per slot, time label first, then cell texts.
    pub fn preview_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                std::iter::once(row.time_label.clone())
                    .chain(row.cells.iter().map(|c| c.text.clone()))
                    .collect()
            })
            .collect()
    }

    /// `(row, column)` coordinates of every unfilled cell.
    pub fn unfilled_cells(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.cells.iter().enumerate() {
                if cell.outcome == CellOutcome::Unfilled {
                    out.push((r, c));
                }
            }
        }
        out
    }

    /// Number of active cells that could not be covered.
    pub fn unfilled_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| &row.cells)
            .filter(|c| c.outcome == CellOutcome::Unfilled)
            .count()
    }

    /// The placements in a cell, if it was staffed.
    pub fn placements_at(&self, row: usize, col: usize) -> Option<&[Placement]> {
        match &self.rows.get(row)?.cells.get(col)?.outcome {
            CellOutcome::Staffed { placements, .. } => Some(placements),
            _ => None,
        }
    }
}
