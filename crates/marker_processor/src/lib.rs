// crates/marker_processor/src/lib.rs

use anyhow::{bail, Context, Result};
use regex::NoExpand;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use commit_markers::{CHECKED_FILE_RE, COMMIT_ID_MARKER_RE, NOT_FOR_REPO_MARKER, NOT_FOR_REPO_MARKER_RE};
use commit_metadata::head_commit_metadata;
use hook_log::log_event;

/// Decides whether a candidate path takes part in the marker checks at all.
/// Only non-empty paths that point at an existing regular file with one of
/// the checked extensions qualify; everything else is silently skipped by
/// the caller.
pub fn should_check_file(path: &str) -> bool {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return false;
    }
    match fs::metadata(trimmed) {
        Ok(metadata) if metadata.is_file() => CHECKED_FILE_RE.is_match(trimmed),
        Ok(_) => false,
        Err(_) => false,
    }
}

/// Scans the file line by line for the exclusion marker and returns `true`
/// on the first hit. The scan is streaming so a very large file is never
/// fully buffered. A file that cannot be read yields `false`; the error is
/// logged and the file is simply treated as clean.
pub fn has_not_for_repo_marker(path: &Path) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log_event(&format!(
                "An error occurred while checking for {} marker in {}: {}",
                NOT_FOR_REPO_MARKER,
                path.display(),
                err
            ));
            return false;
        }
    };

    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => {
                if NOT_FOR_REPO_MARKER_RE.is_match(&line) {
                    return true;
                }
            }
            Err(err) => {
                log_event(&format!(
                    "An error occurred while checking for {} marker in {}: {}",
                    NOT_FOR_REPO_MARKER,
                    path.display(),
                    err
                ));
                return false;
            }
        }
    }
    false
}

/// Replaces every commit-id marker in the file with metadata from the
/// repository's head commit, writing the file back only when the content
/// actually changed. Returns `Ok(true)` when the file was rewritten and
/// `Ok(false)` when there was nothing to do.
///
/// A file with no marker succeeds even without a repository. Once a marker
/// is present, a missing repository or unreadable HEAD is a hard error: the
/// placeholder must never be committed unresolved.
pub fn replace_commit_id_marker(path: &Path, repo_root: Option<&Path>) -> Result<bool> {
    let current = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if !COMMIT_ID_MARKER_RE.is_match(&current) {
        return Ok(false);
    }

    let Some(repo_root) = repo_root else {
        bail!(
            "No repository root available to resolve the marker in {}",
            path.display()
        );
    };
    let metadata = head_commit_metadata(repo_root).with_context(|| {
        format!(
            "Failed to read head commit metadata for {}",
            repo_root.display()
        )
    })?;

    // The replacement is full of `$` characters; NoExpand keeps them from
    // being read as capture-group references.
    let replacement = metadata.to_marker_replacement();
    let updated = COMMIT_ID_MARKER_RE.replace_all(&current, NoExpand(&replacement));
    if updated.as_ref() != current.as_str() {
        fs::write(path, updated.as_ref())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(true);
    }
    Ok(false)
}
