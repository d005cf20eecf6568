//! Parse and validation error types for jobsgate-core.

use thiserror::Error;

/// Which snapshot a cross-row violation was found in.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Snapshot {
    Base,
    Head,
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Head => write!(f, "head"),
        }
    }
}

/// The document is structurally malformed — no table to validate.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(
        "missing anchors: README must contain '<!-- JOBS_TABLE_START -->' followed by '<!-- JOBS_TABLE_END -->'"
    )]
    MissingAnchors,

    #[error("jobs table must include a header row and a separator row")]
    TruncatedTable,

    #[error(
        "bad header: must be exactly '| Company | Role | Track | Application | Date Added |', got '{0}'"
    )]
    BadHeader(String),

    #[error("bad separator: second row must be a markdown alignment row like '|---|---|:---:|:---:|:---:|', got '{0}'")]
    BadSeparator(String),
}

/// The table parsed but a row violates the rule set.
///
/// Row positions are 1-based within the content-row sequence, so a
/// human can find the offending line without counting header rows.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("row {row}: must have 5 columns, found {found}: {line}")]
    BadShape {
        row: usize,
        found: usize,
        line: String,
    },

    #[error("row {row}: {field} cannot be empty")]
    EmptyField { row: usize, field: &'static str },

    #[error("row {row}: duplicate listing id {id} in {snapshot} revision")]
    DuplicateIdentifier {
        row: usize,
        id: String,
        snapshot: Snapshot,
    },

    #[error("row {row}: duplicate community row: {line}")]
    DuplicateCommunityRow { row: usize, line: String },

    #[error(
        "row {row}: listing id {id} does not exist in the base revision; system rows cannot be added here"
    )]
    NewSystemRow { row: usize, id: String },

    #[error(
        "row {row}: system row {id}: {field} cannot be changed (base '{base}', head '{head}')"
    )]
    ImmutableFieldChanged {
        row: usize,
        id: String,
        field: &'static str,
        base: String,
        head: String,
    },

    #[error("row {row}: community Track must be exactly '-', got '{cell}'")]
    BadCommunityTrack { row: usize, cell: String },

    #[error(
        "row {row}: Company must be a single markdown link like '[Acme](https://acme.example)', got '{cell}'"
    )]
    BadCompanyLink { row: usize, cell: String },

    #[error("row {row}: Company URL is not a valid absolute http(s) URL: {url}")]
    BadCompanyUrl { row: usize, url: String },

    #[error("row {row}: Application must be a plain http(s) URL, got '{cell}'")]
    BadApplicationUrl { row: usize, cell: String },

    #[error("row {row}: do not paste HTML in Application; paste a plain URL only")]
    HtmlInApplication { row: usize },

    #[error("row {row}: {field} URL must not contain a literal '|' (percent-encode it as %7C)")]
    PipeInUrl { row: usize, field: &'static str },

    #[error("row {row}: Date Added must be a real YYYY-MM-DD date, got '{cell}'")]
    BadDate { row: usize, cell: String },
}

impl ValidationError {
    /// 1-based content-row position the violation was found at.
    #[must_use]
    pub const fn row(&self) -> usize {
        match self {
            Self::BadShape { row, .. }
            | Self::EmptyField { row, .. }
            | Self::DuplicateIdentifier { row, .. }
            | Self::DuplicateCommunityRow { row, .. }
            | Self::NewSystemRow { row, .. }
            | Self::ImmutableFieldChanged { row, .. }
            | Self::BadCommunityTrack { row, .. }
            | Self::BadCompanyLink { row, .. }
            | Self::BadCompanyUrl { row, .. }
            | Self::BadApplicationUrl { row, .. }
            | Self::HtmlInApplication { row }
            | Self::PipeInUrl { row, .. }
            | Self::BadDate { row, .. } => *row,
        }
    }
}
