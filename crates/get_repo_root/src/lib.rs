// crates/get_repo_root/src/lib.rs

use anyhow::{Context, Result};
use git2::Repository;
use std::path::{Path, PathBuf};

/// Resolves the root of the repository that contains `start_dir`, walking up
/// the directory tree the way `git rev-parse --show-toplevel` would.
///
/// # Errors
///
/// Returns an error if no repository is found or the repository is bare
/// (has no working directory to rewrite files in).
pub fn get_repo_root(start_dir: &Path) -> Result<PathBuf> {
    let repo = Repository::discover(start_dir).with_context(|| {
        format!(
            "No git repository found from working directory {}",
            start_dir.display()
        )
    })?;
    let root = repo
        .workdir()
        .context("Repository has no working directory")?
        .to_path_buf();
    Ok(root)
}
