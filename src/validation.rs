//! Input validation for assignment runs.
//!
//! Checks structural integrity of the grid and roster before the engine
//! runs. Detects:
//! - Duplicate instructor names (case-insensitive)
//! - Empty instructor names
//! - Inverted availability windows
//! - Duplicate column names
//! - More than one break column
//!
//! Coverage shortfalls are deliberately NOT validation errors: a roster
//! too thin for the grid is a normal run whose output carries `unfilled`
//! cells.

use std::collections::HashSet;

use crate::models::{ColumnKind, Instructor, ScheduleGrid};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two roster members share a name (names are matched
    /// case-insensitively, so casing differences still collide).
    DuplicateInstructor,
    /// A roster member has a blank name.
    EmptyName,
    /// An availability window ends before it starts.
    InvertedWindow,
    /// Two grid columns share a name.
    DuplicateColumn,
    /// The grid designates more than one break column.
    MultipleBreakColumns,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a grid and roster before an assignment run.
///
/// Checks:
/// 1. Every roster name is non-blank
/// 2. No two roster members share a name (case-insensitive)
/// 3. Every availability window has `start <= end`
/// 4. No two columns share a name
/// 5. At most one break column
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_inputs(grid: &ScheduleGrid, roster: &[Instructor]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen_names = HashSet::new();
    for inst in roster {
        let trimmed = inst.name.trim();
        if trimmed.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Roster member with an empty name",
            ));
            continue;
        }
        if !seen_names.insert(trimmed.to_lowercase()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateInstructor,
                format!("Duplicate instructor name: {trimmed}"),
            ));
        }
        if inst.window_start > inst.window_end {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedWindow,
                format!(
                    "Instructor '{}' has window {} - {} (ends before it starts)",
                    trimmed, inst.window_start, inst.window_end
                ),
            ));
        }
    }

    let mut seen_columns = HashSet::new();
    let mut break_columns = 0usize;
    for col in &grid.columns {
        if !seen_columns.insert(col.name.trim().to_lowercase()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateColumn,
                format!("Duplicate column name: {}", col.name),
            ));
        }
        if col.kind == ColumnKind::Break {
            break_columns += 1;
        }
    }
    if break_columns > 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::MultipleBreakColumns,
            format!("{break_columns} break columns; at most one is allowed"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
