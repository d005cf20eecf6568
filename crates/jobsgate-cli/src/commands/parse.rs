use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use jobsgate_config::JobsgateConfig;
use jobsgate_core::RowKind;

use crate::cli::{GlobalFlags, root_commands::ParseArgs};
use crate::output::output;

#[derive(Debug, Serialize)]
struct ParsedRow {
    position: usize,
    kind: RowKind,
    company: String,
    role: String,
    track: String,
    application: String,
    date_added: String,
}

#[derive(Debug, Serialize)]
struct ParseResponse {
    file: String,
    rows: Vec<ParsedRow>,
}

/// Handle `jobsgate parse`.
///
/// Parses the working-tree README only — no base revision, no rule
/// engine. Useful for checking how a row splits before opening a
/// review.
pub fn run(
    args: &ParseArgs,
    flags: &GlobalFlags,
    config: &JobsgateConfig,
    project_root: &Path,
) -> anyhow::Result<()> {
    let file = args.file.as_deref().unwrap_or(&config.review.readme_path);

    let text = std::fs::read_to_string(project_root.join(file))
        .with_context(|| format!("failed to read '{file}' from the working tree"))?;
    let table = jobsgate_core::parse(&text)?;

    let rows = table
        .rows
        .iter()
        .map(|row| ParsedRow {
            position: row.position,
            kind: jobsgate_core::classify(row),
            company: row.company().to_string(),
            role: row.role().to_string(),
            track: row.track().to_string(),
            application: row.application().to_string(),
            date_added: row.date_added().to_string(),
        })
        .collect();

    let response = ParseResponse {
        file: file.to_string(),
        rows,
    };
    output(&response, flags.format)
}
