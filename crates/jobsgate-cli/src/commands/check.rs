use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use jobsgate_config::JobsgateConfig;

use crate::cli::{GlobalFlags, root_commands::CheckArgs};
use crate::output::output;

#[derive(Debug, Serialize)]
struct CheckResponse {
    valid: bool,
    base_ref: String,
    file: String,
    rows_checked: usize,
    message: String,
}

/// Handle `jobsgate check`.
pub fn run(
    args: &CheckArgs,
    flags: &GlobalFlags,
    config: &JobsgateConfig,
    project_root: &Path,
) -> anyhow::Result<()> {
    let file = args.file.as_deref().unwrap_or(&config.review.readme_path);
    let base_ref = args.base_ref.as_deref().unwrap_or(&config.review.base_ref);

    // The tree path handed to git is repository-relative, so the head
    // read must start from the repository root as well, wherever the
    // tool was launched from.
    let repo_root = jobsgate_git::discover_work_dir(project_root)
        .context("failed to locate the repository working directory")?;

    // Both snapshots must be in hand before any parsing starts.
    let head_text = std::fs::read_to_string(repo_root.join(file))
        .with_context(|| format!("failed to read '{file}' from the working tree"))?;
    let base_text = jobsgate_git::read_file_at_ref(&repo_root, base_ref, file)
        .with_context(|| format!("failed to read '{file}' at base reference '{base_ref}'"))?;

    let base = jobsgate_core::parse(&base_text)
        .with_context(|| format!("base revision ('{base_ref}')"))?;
    let head = jobsgate_core::parse(&head_text)?;
    jobsgate_core::validate(&base, &head)?;

    let response = CheckResponse {
        valid: true,
        base_ref: base_ref.to_string(),
        file: file.to_string(),
        rows_checked: head.rows.len(),
        message: String::from("README jobs table validation passed."),
    };
    output(&response, flags.format)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use jobsgate_config::JobsgateConfig;

    use super::run;
    use crate::cli::root_commands::CheckArgs;
    use crate::cli::{GlobalFlags, OutputFormat};

    const VALID_README: &str = "# Jobs\n\n<!-- JOBS_TABLE_START -->\n| Company | Role | Track | Application | Date Added |\n|---|---|:---:|:---:|:---:|\n| [Acme](https://acme.example/careers) | Engineer | - | https://acme.example/apply | 2025-01-15 |\n<!-- JOBS_TABLE_END -->\n";

    fn init_temp_repo() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::TempDir::new().expect("create tempdir");
        let repo_path = dir.path().to_path_buf();

        run_git(&repo_path, &["init", "--initial-branch=main"]);
        run_git(&repo_path, &["config", "user.email", "test@jobsgate.dev"]);
        run_git(&repo_path, &["config", "user.name", "Jobsgate Test"]);

        (dir, repo_path)
    }

    fn run_git(repo_path: &Path, args: &[&str]) {
        let output = std::process::Command::new("git")
            .args(args)
            .current_dir(repo_path)
            .output()
            .unwrap_or_else(|e| panic!("git {} failed to execute: {e}", args.join(" ")));
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            quiet: true,
            verbose: false,
            project: None,
        }
    }

    #[test]
    fn check_from_nested_directory_uses_repository_readme() {
        let (_dir, repo) = init_temp_repo();
        fs::write(repo.join("README.md"), VALID_README).expect("write readme");
        run_git(&repo, &["add", "README.md"]);
        run_git(&repo, &["commit", "-m", "initial"]);

        // A decoy README where the tool is launched from; the check
        // must pair the repository README with its base revision.
        let nested = repo.join("docs");
        fs::create_dir_all(&nested).expect("create nested dir");
        fs::write(nested.join("README.md"), "# Docs, no jobs table\n").expect("write decoy");

        let args = CheckArgs {
            base_ref: None,
            file: None,
        };
        run(&args, &flags(), &JobsgateConfig::default(), &nested)
            .expect("head must come from the repository root, not the launch directory");
    }
}
