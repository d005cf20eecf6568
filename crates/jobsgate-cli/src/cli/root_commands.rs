use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Validate the working-tree jobs table against the base revision.
    Check(CheckArgs),
    /// Parse the working-tree jobs table and print its rows.
    Parse(ParseArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// Base reference to reconcile against (defaults to review.base_ref).
    #[arg(long)]
    pub base_ref: Option<String>,

    /// README path within the repository (defaults to review.readme_path).
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    /// README path within the repository (defaults to review.readme_path).
    #[arg(long)]
    pub file: Option<String>,
}
