//! Committing the current index.

use git2::{Oid, Repository};

use crate::error::CommitError;

/// Create a commit on HEAD from whatever is currently staged.
///
/// Nothing is added to the index here. On an unborn branch the commit has no
/// parents.
pub fn commit_index(repo: &Repository, message: &str) -> Result<Oid, CommitError> {
    let mut index = repo.index().map_err(CommitError::CommitFailed)?;
    let tree_id = index.write_tree().map_err(CommitError::CommitFailed)?;
    let tree = repo.find_tree(tree_id).map_err(CommitError::CommitFailed)?;

    let sig = repo.signature().map_err(CommitError::ConfigError)?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit().map_err(CommitError::CommitFailed)?),
        Err(e)
            if e.code() == git2::ErrorCode::UnbornBranch
                || e.code() == git2::ErrorCode::NotFound =>
        {
            None
        }
        Err(e) => return Err(CommitError::CommitFailed(e)),
    };
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .map_err(CommitError::CommitFailed)
}

/// Abbreviated id of a commit, as git would print it (`core.abbrev` aware).
pub fn short_commit_id(repo: &Repository, oid: Oid) -> Result<String, CommitError> {
    let commit = repo.find_commit(oid).map_err(CommitError::CommitFailed)?;
    let short = commit
        .as_object()
        .short_id()
        .map_err(CommitError::CommitFailed)?;
    Ok(short.as_str().unwrap_or_default().to_string())
}
