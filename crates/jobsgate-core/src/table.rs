//! Anchored-block extraction and pipe-delimited row parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ParseError;

/// Literal marker opening the jobs-table block inside the README.
pub const JOBS_TABLE_START: &str = "<!-- JOBS_TABLE_START -->";
/// Literal marker closing the jobs-table block.
pub const JOBS_TABLE_END: &str = "<!-- JOBS_TABLE_END -->";

/// Required header cells, lower-cased, in order.
const EXPECTED_HEADER: [&str; 5] = ["company", "role", "track", "application", "date added"];

/// Markdown alignment cell: one or more hyphens, optionally flanked by
/// a single colon on either end.
static SEPARATOR_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-+:?$").expect("separator pattern compiles"));

/// One content row of the jobs table.
///
/// Cells are positional: Company, Role, Track, Application, Date Added.
/// The raw source line and the 1-based position among content rows are
/// kept for diagnostics; column count is not enforced at parse time so
/// the rule engine can report shape violations with rule-specific
/// messages.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub cells: Vec<String>,
    pub raw: String,
    pub position: usize,
}

impl Row {
    #[must_use]
    pub fn company(&self) -> &str {
        self.cell(0)
    }

    #[must_use]
    pub fn role(&self) -> &str {
        self.cell(1)
    }

    #[must_use]
    pub fn track(&self) -> &str {
        self.cell(2)
    }

    #[must_use]
    pub fn application(&self) -> &str {
        self.cell(3)
    }

    #[must_use]
    pub fn date_added(&self) -> &str {
        self.cell(4)
    }

    fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map_or("", String::as_str)
    }
}

/// Content rows of a parsed jobs table, in document order.
///
/// Header and separator rows are validated during [`parse`] and then
/// discarded; only content rows take part in reconciliation.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub rows: Vec<Row>,
}

/// Parse the jobs table out of a full README document.
///
/// An anchored block containing only a header and a separator is a
/// valid, empty table.
pub fn parse(raw: &str) -> Result<Table, ParseError> {
    let start = raw.find(JOBS_TABLE_START);
    let end = raw.find(JOBS_TABLE_END);
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ParseError::MissingAnchors);
    };
    if end < start {
        return Err(ParseError::MissingAnchors);
    }

    let block = &raw[start + JOBS_TABLE_START.len()..end];
    let table_lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|line| is_table_row(line))
        .collect();

    if table_lines.len() < 2 {
        return Err(ParseError::TruncatedTable);
    }

    let header = split_cells(table_lines[0]);
    let header_ok = header.len() == EXPECTED_HEADER.len()
        && header
            .iter()
            .zip(EXPECTED_HEADER)
            .all(|(cell, expected)| cell.to_lowercase() == expected);
    if !header_ok {
        return Err(ParseError::BadHeader(table_lines[0].to_string()));
    }

    let separator = split_cells(table_lines[1]);
    if !separator
        .iter()
        .all(|cell| SEPARATOR_CELL.is_match(cell) || cell == "---")
    {
        return Err(ParseError::BadSeparator(table_lines[1].to_string()));
    }

    let rows = table_lines[2..]
        .iter()
        .enumerate()
        .map(|(index, line)| Row {
            cells: split_cells(line),
            raw: (*line).to_string(),
            position: index + 1,
        })
        .collect::<Vec<_>>();

    tracing::debug!(rows = rows.len(), "parsed jobs table");
    Ok(Table { rows })
}

/// A trimmed line qualifies as a table row when it is pipe-fenced on
/// both ends, has content between the fences, and splits into at least
/// 3 raw pipe fragments (guards against stray `|` lines).
fn is_table_row(trimmed: &str) -> bool {
    trimmed.len() > 2
        && trimmed.starts_with('|')
        && trimmed.ends_with('|')
        && trimmed.split('|').count() >= 3
}

/// Split a pipe-fenced row into trimmed cells.
///
/// A `|` preceded by an odd number of consecutive backslashes is
/// escaped and stays in the cell verbatim; any other `|` is a field
/// boundary. Outer pipes are stripped before splitting.
fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let interior = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let interior = interior.strip_suffix('|').unwrap_or(interior);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut backslashes = 0usize;
    for ch in interior.chars() {
        if ch == '|' && backslashes % 2 == 0 {
            cells.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
        backslashes = if ch == '\\' { backslashes + 1 } else { 0 };
    }
    cells.push(current.trim().to_string());
    cells
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn document(body: &str) -> String {
        format!("# Jobs\n\n{JOBS_TABLE_START}\n{body}\n{JOBS_TABLE_END}\n\nfooter\n")
    }

    const HEADER: &str = "| Company | Role | Track | Application | Date Added |";
    const SEPARATOR: &str = "|---|---|:---:|:---:|:---:|";

    #[test]
    fn empty_table_is_valid() {
        let doc = document(&format!("{HEADER}\n{SEPARATOR}"));
        let table = parse(&doc).expect("header + separator only should parse");
        assert!(table.rows.is_empty());
    }

    #[test]
    fn content_rows_carry_position_and_raw_line() {
        let row = "| [Acme](https://acme.example) | Engineer | - | https://acme.example/apply | 2025-01-15 |";
        let doc = document(&format!("{HEADER}\n{SEPARATOR}\n{row}"));
        let table = parse(&doc).expect("parse");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].position, 1);
        assert_eq!(table.rows[0].raw, row);
        assert_eq!(table.rows[0].role(), "Engineer");
        assert_eq!(table.rows[0].date_added(), "2025-01-15");
    }

    #[test]
    fn blank_and_stray_lines_inside_block_are_ignored() {
        let doc = document(&format!(
            "{HEADER}\n\nsome prose\n{SEPARATOR}\n\n| A | B | - | https://a.example | 2025-01-01 |\n"
        ));
        let table = parse(&doc).expect("parse");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].company(), "A");
    }

    #[test]
    fn missing_start_anchor_fails() {
        let doc = format!("{HEADER}\n{SEPARATOR}\n{JOBS_TABLE_END}");
        assert!(matches!(parse(&doc), Err(ParseError::MissingAnchors)));
    }

    #[test]
    fn missing_end_anchor_fails() {
        let doc = format!("{JOBS_TABLE_START}\n{HEADER}\n{SEPARATOR}");
        assert!(matches!(parse(&doc), Err(ParseError::MissingAnchors)));
    }

    #[test]
    fn end_anchor_before_start_fails() {
        let doc = format!("{JOBS_TABLE_END}\n{HEADER}\n{SEPARATOR}\n{JOBS_TABLE_START}");
        assert!(matches!(parse(&doc), Err(ParseError::MissingAnchors)));
    }

    #[test]
    fn header_alone_fails() {
        let doc = document(HEADER);
        assert!(matches!(parse(&doc), Err(ParseError::TruncatedTable)));
    }

    #[rstest]
    #[case::missing_column("| Company | Role | Track | Application |")]
    #[case::reordered("| Role | Company | Track | Application | Date Added |")]
    #[case::extra_column("| Company | Role | Track | Application | Date Added | Notes |")]
    #[case::renamed("| Company | Role | Track | Apply | Date Added |")]
    fn malformed_header_fails(#[case] header: &str) {
        let doc = document(&format!("{header}\n{SEPARATOR}"));
        assert!(matches!(parse(&doc), Err(ParseError::BadHeader(_))));
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let doc = document(&format!(
            "| COMPANY | role | Track | APPLICATION | date ADDED |\n{SEPARATOR}"
        ));
        assert!(parse(&doc).is_ok());
    }

    #[rstest]
    #[case::plain("|---|---|---|---|---|")]
    #[case::aligned("|:---|---:|:---:|---|:-:|")]
    #[case::uneven("|-|--|---|----|-----|")]
    fn separator_variants_pass(#[case] separator: &str) {
        let doc = document(&format!("{HEADER}\n{separator}"));
        assert!(parse(&doc).is_ok());
    }

    #[rstest]
    #[case::words("| a | b | c | d | e |")]
    #[case::double_colon("|::---|---|---|---|---|")]
    #[case::empty_cell("|---|---||---|---|")]
    fn malformed_separator_fails(#[case] separator: &str) {
        let doc = document(&format!("{HEADER}\n{separator}"));
        assert!(matches!(parse(&doc), Err(ParseError::BadSeparator(_))));
    }

    #[test]
    fn escaped_pipe_stays_in_cell() {
        let cells = split_cells(r"| a \| b | c |");
        assert_eq!(cells, vec![r"a \| b", "c"]);
    }

    #[test]
    fn double_backslash_before_pipe_still_splits() {
        let cells = split_cells(r"| a \\| b |");
        assert_eq!(cells, vec![r"a \\", "b"]);
    }

    #[test]
    fn triple_backslash_before_pipe_is_escaped() {
        let cells = split_cells(r"| a \\\| b |");
        assert_eq!(cells, vec![r"a \\\| b"]);
    }

    #[test]
    fn unescaped_pipe_always_splits() {
        let cells = split_cells("| a | b | c | d | e |");
        assert_eq!(cells, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn cells_are_trimmed() {
        let cells = split_cells("|  spaced   |\ttabbed\t|");
        assert_eq!(cells, vec!["spaced", "tabbed"]);
    }

    #[test]
    fn parse_is_idempotent() {
        let row = "| [Acme](https://acme.example) | Engineer | - | https://acme.example/apply | 2025-01-15 |";
        let doc = document(&format!("{HEADER}\n{SEPARATOR}\n{row}"));
        let first = parse(&doc).expect("parse");
        let second = parse(&doc).expect("parse");
        assert_eq!(first.rows.len(), second.rows.len());
        assert_eq!(first.rows[0].cells, second.rows[0].cells);
        assert_eq!(first.rows[0].raw, second.rows[0].raw);
    }
}
