//! Schedule grid input model.
//!
//! The grid is one row per time slot and one column per class. Cells carry
//! whatever text the sheet already had ("hints": preferred instructor names
//! and/or a headcount) plus an active flag. Template grids treat any
//! non-empty cell as active; manually-authored grids carry the flag
//! explicitly (the selection UI writes `"1"` into chosen cells).
//!
//! The designated `brk` column is not a class: the engine owns its contents
//! and the main pass never staffs it.

use serde::{Deserialize, Serialize};

use super::{ClockTime, MalformedTimeError};

/// How a column participates in scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Ordinary class: needs one instructor (more when doubled up).
    Class,
    /// Individually-scheduled one-off lessons ("PSL"): each preferred name
    /// in the cell is its own lesson, so the needed headcount equals the
    /// count of distinct named people.
    PrivateLesson,
    /// Engine-managed break output column.
    Break,
}

impl ColumnKind {
    /// Derives the kind from a column name: `brk` (case-insensitive) is the
    /// break column, names containing `PSL` are private-lesson columns.
    pub fn from_name(name: &str) -> Self {
        let upper = name.trim().to_uppercase();
        if upper == "BRK" {
            ColumnKind::Break
        } else if upper.contains("PSL") {
            ColumnKind::PrivateLesson
        } else {
            ColumnKind::Class
        }
    }
}

/// A named grid column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskColumn {
    /// Column name, unique per grid.
    pub name: String,
    /// Scheduling behavior of this column.
    pub kind: ColumnKind,
}

impl TaskColumn {
    /// Creates a column, deriving its kind from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = ColumnKind::from_name(&name);
        Self { name, kind }
    }

    /// Overrides the derived kind.
    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }
}

/// One (slot, column) intersection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Whether this class runs at this slot.
    pub active: bool,
    /// Pre-populated text: preferred names and/or a headcount.
    pub hint: String,
}

impl Cell {
    /// An empty, inactive cell.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Template-grid cell: active iff the hint is non-empty.
    pub fn from_hint(hint: impl Into<String>) -> Self {
        let hint = hint.into();
        let active = !hint.trim().is_empty();
        Self { active, hint }
    }

    /// Manually-selected cell with explicit text.
    pub fn selected(hint: impl Into<String>) -> Self {
        Self {
            active: true,
            hint: hint.into(),
        }
    }
}

/// One time slot's row of cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridRow {
    /// Normalized slot time.
    pub time: ClockTime,
    /// The time as it appeared on the sheet, kept for output.
    pub time_label: String,
    /// One cell per column, in column order.
    pub cells: Vec<Cell>,
}

/// The full slot × class grid.
///
/// Rows are expected in ascending time order; duplicates are not rejected
/// (they end up sharing per-slot occupancy in the engine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleGrid {
    /// Columns in sheet order.
    pub columns: Vec<TaskColumn>,
    /// Rows in sheet order.
    pub rows: Vec<GridRow>,
}

impl ScheduleGrid {
    /// Creates an empty grid with the given columns.
    pub fn new(columns: Vec<TaskColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a grid from column names, deriving each column's kind.
    pub fn with_column_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(TaskColumn::new).collect())
    }

    /// Appends a template-mode row: every non-empty value is an active cell.
    ///
    /// The time label must parse; malformed times are the one fatal input
    /// error. Short rows are padded with inactive cells, long rows truncated.
    pub fn push_template_row<S: AsRef<str>>(
        &mut self,
        time_label: &str,
        values: &[S],
    ) -> Result<(), MalformedTimeError> {
        let cells = values.iter().map(|v| Cell::from_hint(v.as_ref())).collect();
        self.push_row(time_label, cells)
    }

    /// Appends a manual-mode row from explicit selections.
    ///
    /// Selected cells get the hint `"1"` (a bare headcount of one), matching
    /// what the manual selection flow writes into the sheet.
    pub fn push_manual_row(
        &mut self,
        time_label: &str,
        selected: &[bool],
    ) -> Result<(), MalformedTimeError> {
        let cells = selected
            .iter()
            .map(|&on| if on { Cell::selected("1") } else { Cell::inactive() })
            .collect();
        self.push_row(time_label, cells)
    }

    /// Appends a row of pre-built cells.
    pub fn push_row(
        &mut self,
        time_label: &str,
        mut cells: Vec<Cell>,
    ) -> Result<(), MalformedTimeError> {
        let time = ClockTime::parse(time_label)?;
        cells.resize_with(self.columns.len(), Cell::inactive);
        self.rows.push(GridRow {
            time,
            time_label: time_label.to_string(),
            cells,
        });
        Ok(())
    }

    /// Index of the break column, if the grid has one.
    pub fn break_column(&self) -> Option<usize> {
        self.columns.iter().position(|c| c.kind == ColumnKind::Break)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (time slots).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Count of active, schedulable (non-break) cells.
    pub fn active_cell_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .zip(&self.columns)
                    .filter(|(cell, col)| cell.active && col.kind != ColumnKind::Break)
                    .count()
            })
            .sum()
    }
}
