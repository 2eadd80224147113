// crates/commit_metadata/src/lib.rs

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone};
use git2::Repository;
use std::path::Path;

/// Metadata of the most recent commit reachable from HEAD.
#[derive(Debug, Clone)]
pub struct CommitMetadata {
    /// Full commit SHA hash (40 characters).
    pub hash: String,
    /// Author's name.
    pub author_name: String,
    /// Committer's name.
    pub committer_name: String,
    /// Committer timestamp, carrying the committer's UTC offset.
    pub committed_at: DateTime<FixedOffset>,
}

impl CommitMetadata {
    /// Renders the text every commit-id marker is replaced with:
    /// `$Id: <hash> <author> <committer> <iso-8601 timestamp> (previous commit) $`.
    ///
    /// The result itself matches the marker pattern, so a later run with a
    /// new head commit stamps the file again.
    pub fn to_marker_replacement(&self) -> String {
        format!(
            "$Id: {} {} {} {} (previous commit) $",
            self.hash,
            self.author_name,
            self.committer_name,
            self.committed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }
}

/// Reads the metadata of the latest commit on HEAD for the repository rooted
/// at `repo_root`.
///
/// # Errors
///
/// Returns an error if the repository cannot be opened, HEAD is missing or
/// unborn (no commits yet), or the committer timestamp is malformed. Callers
/// treat any of these as commit-blocking: a marker must never be left
/// unresolved because provenance could not be read.
pub fn head_commit_metadata(repo_root: &Path) -> Result<CommitMetadata> {
    let repo = Repository::open(repo_root).with_context(|| {
        format!("Failed to open git repository at {}", repo_root.display())
    })?;
    let head = repo.head().context("Failed to resolve HEAD")?;
    let commit = head
        .peel_to_commit()
        .context("HEAD does not point at a commit")?;

    let author = commit.author();
    let committer = commit.committer();
    let when = committer.when();
    let offset = FixedOffset::east_opt(when.offset_minutes() * 60)
        .context("Committer timestamp has an invalid UTC offset")?;
    let committed_at = offset
        .timestamp_opt(when.seconds(), 0)
        .single()
        .context("Committer timestamp is out of range")?;

    Ok(CommitMetadata {
        hash: commit.id().to_string(),
        author_name: author.name().unwrap_or_default().to_string(),
        committer_name: committer.name().unwrap_or_default().to_string(),
        committed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process::Command;
    use tempfile::tempdir;

    fn init_git_repo(dir: &Path) {
        Command::new("git")
            .arg("init")
            .current_dir(dir)
            .output()
            .expect("Failed to initialize git repo");
        Command::new("git")
            .args(["config", "user.email", "test@example.com"])
            .current_dir(dir)
            .output()
            .expect("Failed to configure git user.email");
        Command::new("git")
            .args(["config", "user.name", "Test User"])
            .current_dir(dir)
            .output()
            .expect("Failed to configure git user.name");
    }

    fn commit_file(dir: &Path, name: &str, contents: &str, when: &str) {
        fs::write(dir.join(name), contents).expect("Failed to write file");
        Command::new("git")
            .args(["add", name])
            .current_dir(dir)
            .output()
            .expect("Failed to add file");
        Command::new("git")
            .args(["commit", "-m", "commit"])
            .env("GIT_AUTHOR_DATE", when)
            .env("GIT_COMMITTER_DATE", when)
            .current_dir(dir)
            .output()
            .expect("Failed to commit");
    }

    #[test]
    fn test_reads_head_commit() {
        let dir = tempdir().expect("Failed to create temp dir");
        init_git_repo(dir.path());
        commit_file(dir.path(), "a.txt", "hello", "2024-01-01T00:00:00+00:00");

        let metadata = head_commit_metadata(dir.path()).expect("Expected metadata");
        assert_eq!(metadata.hash.len(), 40);
        assert!(metadata.hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(metadata.author_name, "Test User");
        assert_eq!(metadata.committer_name, "Test User");
        assert_eq!(
            metadata
                .committed_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            "2024-01-01T00:00:00Z"
        );
    }

    #[test]
    fn test_reads_latest_commit_of_several() {
        let dir = tempdir().expect("Failed to create temp dir");
        init_git_repo(dir.path());
        commit_file(dir.path(), "a.txt", "one", "2024-01-01T00:00:00+00:00");
        let first = head_commit_metadata(dir.path()).unwrap();
        commit_file(dir.path(), "a.txt", "two", "2024-02-01T00:00:00+00:00");

        let second = head_commit_metadata(dir.path()).unwrap();
        assert_ne!(first.hash, second.hash);
        assert_eq!(
            second
                .committed_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            "2024-02-01T00:00:00Z"
        );
    }

    #[test]
    fn test_committer_offset_is_preserved() {
        let dir = tempdir().expect("Failed to create temp dir");
        init_git_repo(dir.path());
        commit_file(dir.path(), "a.txt", "hello", "2024-06-15T10:30:00+02:00");

        let metadata = head_commit_metadata(dir.path()).expect("Expected metadata");
        assert_eq!(
            metadata
                .committed_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            "2024-06-15T10:30:00+02:00"
        );
    }

    #[test]
    fn test_fails_without_repository() {
        let dir = tempdir().expect("Failed to create temp dir");
        assert!(head_commit_metadata(dir.path()).is_err());
    }

    #[test]
    fn test_fails_on_unborn_head() {
        let dir = tempdir().expect("Failed to create temp dir");
        init_git_repo(dir.path());
        // No commit yet, so HEAD points at a branch that does not exist.
        assert!(head_commit_metadata(dir.path()).is_err());
    }

    #[test]
    fn test_marker_replacement_format() {
        let metadata = CommitMetadata {
            hash: "abc123".to_string(),
            author_name: "Jane".to_string(),
            committer_name: "Jane".to_string(),
            committed_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap(),
        };
        assert_eq!(
            metadata.to_marker_replacement(),
            "$Id: abc123 Jane Jane 2024-01-01T00:00:00Z (previous commit) $"
        );
    }
}
