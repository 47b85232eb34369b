//! `prepare-commit-msg` hook installation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use git2::Repository;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::HookError;

/// Hook file name inside `<git-dir>/hooks`.
pub const HOOK_NAME: &str = "prepare-commit-msg";

/// Writes the generated message into the file git hands the hook.
pub const HOOK_SCRIPT: &str = "#!/bin/sh\nexec git dc commit --print > \"$1\"\n";

/// Install the hook into the repository's hooks directory.
///
/// An existing hook with different content is left alone unless `force` is
/// set. Returns the hook's path.
pub fn install_hook(repo: &Repository, force: bool) -> Result<PathBuf, HookError> {
    let hooks_dir = repo.path().join("hooks");
    let hook_path = hooks_dir.join(HOOK_NAME);

    match fs::read(&hook_path) {
        Ok(existing) if existing == HOOK_SCRIPT.as_bytes() => {
            debug!("Hook already installed at {}", hook_path.display());
            return Ok(hook_path);
        }
        Ok(_) if !force => return Err(HookError::AlreadyExists(hook_path)),
        Ok(_) => debug!("Overwriting existing hook at {}", hook_path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(HookError::ReadFailed(e)),
    }

    fs::create_dir_all(&hooks_dir).map_err(HookError::WriteFailed)?;

    let mut file = NamedTempFile::new_in(&hooks_dir).map_err(HookError::WriteFailed)?;
    file.write_all(HOOK_SCRIPT.as_bytes())
        .map_err(HookError::WriteFailed)?;
    make_executable(file.path())?;
    file.persist(&hook_path)
        .map_err(|e| HookError::WriteFailed(e.error))?;

    Ok(hook_path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), HookError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(HookError::WriteFailed)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), HookError> {
    Ok(())
}
