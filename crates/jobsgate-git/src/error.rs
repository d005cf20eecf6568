use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("git error: {0}")]
    Git(String),
    #[error("not a git repository: {0}")]
    NotGitRepo(PathBuf),
    #[error("reference '{0}' not found in repository")]
    RefNotFound(String),
    #[error("'{path}' does not exist at reference '{refname}'")]
    PathNotFound { path: String, refname: String },
    #[error("'{path}' is not valid UTF-8 at the requested reference")]
    NonUtf8 { path: String },
}
