//! Base/head reconciliation and the per-lifecycle rule set.
//!
//! System rows (Track cell carries a `/job/<id>` listing id) are
//! externally sourced records: their id and insertion date are frozen
//! across community revisions, while descriptive cells stay editable
//! and removal is allowed. Community rows are user-owned but render
//! into a public document, so they get the strict anti-abuse
//! formatting rules instead.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::error::{Snapshot, ValidationError};
use crate::table::{Row, Table};

/// Listing id embedded in a system row's Track cell: a fixed `/job/`
/// path segment followed by a 36-char token of hex digits and hyphens.
static TRACK_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/job/([0-9a-fA-F-]{36})").expect("identifier pattern compiles"));

/// Whole-cell markdown link: `[text](http(s)://…)` with no whitespace
/// or `)` inside the URL.
static COMPANY_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[^\]]+\]\((https?://[^\s)]+)\)$").expect("link pattern compiles"));

/// Bare absolute http(s) URL occupying an entire cell.
static PLAIN_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://\S+$").expect("url pattern compiles"));

/// Calendar date shape; validity is checked separately.
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

/// Row lifecycle, derived from the Track cell at point of use.
///
/// Never stored on a row: base and head classify independently, so a
/// Track edit in head cannot drag a stale classification along.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    System,
    Community,
}

/// Extract the listing id from a Track cell, if present.
#[must_use]
pub fn track_identifier(track: &str) -> Option<&str> {
    TRACK_IDENTIFIER
        .captures(track)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str())
}

/// Classify a row from its Track cell.
#[must_use]
pub fn classify(row: &Row) -> RowKind {
    if track_identifier(row.track()).is_some() {
        RowKind::System
    } else {
        RowKind::Community
    }
}

/// Validate the head revision of the table against the base revision.
///
/// Checks run in a fixed order and the first violation aborts the run;
/// later checks assume earlier ones passed. See the module docs for
/// the rule rationale.
pub fn validate(base: &Table, head: &Table) -> Result<(), ValidationError> {
    tracing::debug!(
        base_rows = base.rows.len(),
        head_rows = head.rows.len(),
        "reconciling jobs table revisions"
    );

    check_shape(head)?;
    check_unique_identifiers(head, Snapshot::Head)?;
    check_unique_identifiers(base, Snapshot::Base)?;
    check_unique_community_rows(head)?;

    let base_ids = identifier_map(base);
    check_no_new_system_rows(head, &base_ids)?;
    check_system_immutability(head, &base_ids)?;
    check_community_fields(head)?;

    Ok(())
}

/// Every head row has exactly 5 cells with non-empty Company and Role.
fn check_shape(head: &Table) -> Result<(), ValidationError> {
    for row in &head.rows {
        if row.cells.len() != 5 {
            return Err(ValidationError::BadShape {
                row: row.position,
                found: row.cells.len(),
                line: row.raw.clone(),
            });
        }
        if row.company().is_empty() {
            return Err(ValidationError::EmptyField {
                row: row.position,
                field: "Company",
            });
        }
        if row.role().is_empty() {
            return Err(ValidationError::EmptyField {
                row: row.position,
                field: "Role",
            });
        }
    }
    Ok(())
}

/// No listing id may appear on two rows within one snapshot. Reports
/// the second physical occurrence — the likely inserted copy.
fn check_unique_identifiers(table: &Table, snapshot: Snapshot) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for row in &table.rows {
        if let Some(id) = track_identifier(row.track()) {
            if !seen.insert(id) {
                return Err(ValidationError::DuplicateIdentifier {
                    row: row.position,
                    id: id.to_string(),
                    snapshot,
                });
            }
        }
    }
    Ok(())
}

/// No two community rows may be identical after collapsing whitespace
/// runs to single spaces. Comparison is case-sensitive.
fn check_unique_community_rows(head: &Table) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for row in &head.rows {
        if classify(row) == RowKind::System {
            continue;
        }
        let normalized = row.raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if !seen.insert(normalized) {
            return Err(ValidationError::DuplicateCommunityRow {
                row: row.position,
                line: row.raw.clone(),
            });
        }
    }
    Ok(())
}

fn identifier_map(table: &Table) -> HashMap<&str, &Row> {
    let mut map = HashMap::new();
    for row in &table.rows {
        if let Some(id) = track_identifier(row.track()) {
            // Duplicates were rejected up front; first wins is moot.
            map.entry(id).or_insert(row);
        }
    }
    map
}

/// System rows are issued upstream: a listing id present in head but
/// absent from base is an illegal addition.
fn check_no_new_system_rows(
    head: &Table,
    base_ids: &HashMap<&str, &Row>,
) -> Result<(), ValidationError> {
    for row in &head.rows {
        if let Some(id) = track_identifier(row.track()) {
            if !base_ids.contains_key(id) {
                return Err(ValidationError::NewSystemRow {
                    row: row.position,
                    id: id.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// For ids present in both revisions, Track and Date Added must be
/// byte-identical. Company, Role and Application may change, and
/// removing a system row entirely is allowed.
fn check_system_immutability(
    head: &Table,
    base_ids: &HashMap<&str, &Row>,
) -> Result<(), ValidationError> {
    for row in &head.rows {
        let Some(id) = track_identifier(row.track()) else {
            continue;
        };
        let Some(base_row) = base_ids.get(id) else {
            continue;
        };
        if row.track() != base_row.track() {
            return Err(ValidationError::ImmutableFieldChanged {
                row: row.position,
                id: id.to_string(),
                field: "Track",
                base: base_row.track().to_string(),
                head: row.track().to_string(),
            });
        }
        if row.date_added() != base_row.date_added() {
            return Err(ValidationError::ImmutableFieldChanged {
                row: row.position,
                id: id.to_string(),
                field: "Date Added",
                base: base_row.date_added().to_string(),
                head: row.date_added().to_string(),
            });
        }
    }
    Ok(())
}

fn check_community_fields(head: &Table) -> Result<(), ValidationError> {
    for row in &head.rows {
        if classify(row) == RowKind::System {
            continue;
        }
        check_community_row(row)?;
    }
    Ok(())
}

fn check_community_row(row: &Row) -> Result<(), ValidationError> {
    if row.track() != "-" {
        return Err(ValidationError::BadCommunityTrack {
            row: row.position,
            cell: row.track().to_string(),
        });
    }

    let company_url = COMPANY_LINK
        .captures(row.company())
        .and_then(|captures| captures.get(1))
        .map(|url| url.as_str())
        .ok_or_else(|| ValidationError::BadCompanyLink {
            row: row.position,
            cell: row.company().to_string(),
        })?;
    if !is_absolute_http_url(company_url) {
        return Err(ValidationError::BadCompanyUrl {
            row: row.position,
            url: company_url.to_string(),
        });
    }

    let application = row.application();
    if application.contains('<') || application.contains('>') {
        return Err(ValidationError::HtmlInApplication { row: row.position });
    }
    if application.is_empty()
        || !PLAIN_URL.is_match(application)
        || !is_absolute_http_url(application)
    {
        return Err(ValidationError::BadApplicationUrl {
            row: row.position,
            cell: application.to_string(),
        });
    }

    // Table syntax escapes pipes with a backslash; URLs must use %7C.
    if company_url.contains('|') {
        return Err(ValidationError::PipeInUrl {
            row: row.position,
            field: "Company",
        });
    }
    if application.contains('|') {
        return Err(ValidationError::PipeInUrl {
            row: row.position,
            field: "Application",
        });
    }

    let date = row.date_added();
    if !ISO_DATE.is_match(date) || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(ValidationError::BadDate {
            row: row.position,
            cell: date.to_string(),
        });
    }

    Ok(())
}

fn is_absolute_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}
