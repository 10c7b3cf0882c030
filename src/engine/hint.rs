//! Cell hint parsing.
//!
//! A hint is whatever text a cell already carried before the run:
//! preferred instructor names, a student headcount, or both, in loose
//! sheet shorthand (`"Alice/6"`, `"Bob, 8"`, `"Dan, Eve"`, `"1"`).
//!
//! Tokens are split on newline, comma, and slash. A token ending in an
//! integer names a candidate and sets the headcount; a bare integer sets
//! the headcount alone; anything else is a bare candidate name. The last
//! integer seen wins, and duplicate names keep their first occurrence.
//! The engine's own output (`"Alice (6)"`) parses back to the same name
//! and count.

/// Parsed content of one cell hint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHint {
    /// Preferred names in order of appearance, duplicates dropped.
    pub preferred: Vec<String>,
    /// Student headcount; 0 when the hint names no count.
    pub student_count: u32,
}

impl ParsedHint {
    /// Number of distinct preferred names.
    pub fn preferred_count(&self) -> usize {
        self.preferred.len()
    }
}

/// Parses a cell hint into preferred names and a headcount.
pub fn parse_hint(content: &str) -> ParsedHint {
    let mut parsed = ParsedHint::default();

    for token in content
        .split(['\n', ',', '/'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        if let Ok(count) = token.parse::<u32>() {
            parsed.student_count = count;
            continue;
        }

        match split_trailing_count(token) {
            Some((name, count)) => {
                parsed.student_count = count;
                push_unique(&mut parsed.preferred, name);
            }
            None => push_unique(&mut parsed.preferred, token.to_string()),
        }
    }

    parsed
}

/// Splits `"Alice (6)"` / `"Alice\6"` / `"Alice 6"` into name and count.
///
/// Returns `None` when the token has no trailing integer or no name part
/// remains once the count and its separator are stripped.
fn split_trailing_count(token: &str) -> Option<(String, u32)> {
    let body = token.strip_suffix(')').unwrap_or(token);

    let digits_at = body
        .rfind(|c: char| !c.is_ascii_digit())
        .map(|i| i + body[i..].chars().next().map_or(1, char::len_utf8))?;
    let digits = &body[digits_at..];
    if digits.is_empty() {
        return None;
    }
    let count: u32 = digits.parse().ok()?;

    let name = body[..digits_at]
        .trim_end()
        .trim_end_matches(['/', '\\', '('])
        .trim_end();
    if name.is_empty() {
        return None;
    }

    Some((name.to_string(), count))
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}
