//! Staged diff collection from the index using git2.

use git2::{DiffFormat, ErrorCode, Repository, Tree};
use tracing::debug;

use crate::error::CommitError;

/// Resolve the HEAD tree, distinguishing an unborn branch from real failures.
///
/// Returns `Ok(None)` for repos with no commits, `Ok(Some(tree))` for repos
/// with a valid HEAD, or `Err(CommitError::DiffFailed)` for a corrupt HEAD or
/// missing objects.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, CommitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(CommitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(CommitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Render the staged changes (HEAD vs. index) as unified diff text, the same
/// shape `git diff --cached` prints.
///
/// An empty string means nothing is staged.
pub fn collect_staged_diff(repo: &Repository) -> Result<String, CommitError> {
    let head_tree = resolve_head_tree(repo)?;

    let mut diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(CommitError::DiffFailed)?;
    diff.find_similar(None).map_err(CommitError::DiffFailed)?;

    let mut text = String::new();
    let mut additions = 0usize;
    let mut deletions = 0usize;

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        match origin {
            '+' => additions += 1,
            '-' => deletions += 1,
            _ => {}
        }

        // File and hunk headers carry their own text; content lines need the sigil back.
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));

        true
    })
    .map_err(CommitError::DiffFailed)?;

    debug!(
        "Staged diff: {} files, {} additions, {} deletions",
        diff.deltas().len(),
        additions,
        deletions
    );

    Ok(text)
}
