//! Git operations using git2-rs.

pub mod commit;
pub mod staged;

use std::path::Path;

use git2::{Index, Repository};
use tracing::debug;

use crate::error::GitError;

pub use commit::{commit_index, short_commit_id};
pub use staged::collect_staged_diff;

/// Environment variable git uses to point hooks at an alternate index, e.g.
/// the temporary index built by `git commit -a` or `git commit <paths>`.
pub const INDEX_FILE_ENV: &str = "GIT_INDEX_FILE";

/// Open the repository containing `path`, searching parent directories.
///
/// When `GIT_INDEX_FILE` is set, that index replaces `.git/index`.
pub fn open_repository(path: &Path) -> Result<Repository, GitError> {
    let repo = Repository::discover(path).map_err(GitError::OpenRepository)?;
    if let Some(index_file) = std::env::var_os(INDEX_FILE_ENV).filter(|v| !v.is_empty()) {
        use_index_file(&repo, Path::new(&index_file))?;
    }
    Ok(repo)
}

/// Make `index_file` the index that staged-diff and commit operations read.
///
/// A relative path resolves against the current directory, as git does.
pub fn use_index_file(repo: &Repository, index_file: &Path) -> Result<(), GitError> {
    debug!("Using index file {}", index_file.display());
    let open_err = |source| GitError::OpenIndex {
        path: index_file.to_path_buf(),
        source,
    };
    let mut index = Index::open(index_file).map_err(open_err)?;
    repo.set_index(&mut index).map_err(open_err)
}
