use std::path::{Path, PathBuf};

use crate::error::GitError;

/// Locate the working directory of the repository containing
/// `project_root`.
///
/// Head and base snapshots must resolve paths against the same root:
/// tree paths handed to [`read_file_at_ref`] are relative to the
/// repository, so working-tree reads have to start there too, not at
/// whatever nested directory the tool was launched from.
pub fn discover_work_dir(project_root: &Path) -> Result<PathBuf, GitError> {
    let repo = gix::discover(project_root)
        .map_err(|_| GitError::NotGitRepo(project_root.to_path_buf()))?;
    repo.work_dir()
        .map(Path::to_path_buf)
        .ok_or_else(|| GitError::Git(String::from("repository has no working directory")))
}

/// Read `path` as UTF-8 text from the commit a reference points at.
///
/// The repository is discovered by walking up from `project_root`.
/// `refname` may be a short branch name (`main`), a remote-tracking
/// name (`origin/main`), or a fully qualified ref path; resolution
/// follows the usual git precedence.
pub fn read_file_at_ref(
    project_root: &Path,
    refname: &str,
    path: &str,
) -> Result<String, GitError> {
    let repo = gix::discover(project_root)
        .map_err(|_| GitError::NotGitRepo(project_root.to_path_buf()))?;

    let mut reference = repo
        .find_reference(refname)
        .map_err(|_| GitError::RefNotFound(refname.to_string()))?;
    let commit_id = reference
        .peel_to_id_in_place()
        .map_err(|error| GitError::Git(error.to_string()))?;
    let commit = repo
        .find_commit(commit_id)
        .map_err(|error| GitError::Git(error.to_string()))?;
    let tree = commit
        .tree()
        .map_err(|error| GitError::Git(error.to_string()))?;

    let entry = tree
        .lookup_entry_by_path(path)
        .map_err(|error| GitError::Git(error.to_string()))?
        .ok_or_else(|| GitError::PathNotFound {
            path: path.to_string(),
            refname: refname.to_string(),
        })?;
    let object = entry
        .object()
        .map_err(|error| GitError::Git(error.to_string()))?;

    tracing::debug!(refname, path, bytes = object.data.len(), "read base snapshot");

    String::from_utf8(object.detach().data).map_err(|_| GitError::NonUtf8 {
        path: path.to_string(),
    })
}
