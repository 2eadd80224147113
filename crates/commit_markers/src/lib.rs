// crates/commit_markers/src/lib.rs

//! Marker tokens shared throughout the pre-commit tool-chain.

use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder token replaced with commit metadata.
pub const COMMIT_ID_MARKER: &str = "$Id$";

/// Token that bars a file from ever being committed.
pub const NOT_FOR_REPO_MARKER: &str = "$NotForRepo$";

/// Matches every `$Id ... $` occurrence; the inner capture is non-greedy so
/// several markers on one line stay separate matches.
pub static COMMIT_ID_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$Id(.*?)\$").unwrap());

/// Case-insensitive match for the exclusion marker within a single line.
pub static NOT_FOR_REPO_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\$NotForRepo\$").unwrap());

/// Extensions of the file types the hook checks.
pub static CHECKED_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^.*\.(cs|java|aql|hsc)$").unwrap());
