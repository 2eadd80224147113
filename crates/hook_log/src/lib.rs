// crates/hook_log/src/lib.rs

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Name of the append-only log file, created next to wherever the hook runs.
pub const LOG_FILE_NAME: &str = "GithookPreCommit.log";

/// Appends a timestamped line to the hook log in the current working
/// directory. Logging is best effort: a failure to open or write the log is
/// swallowed so diagnostics can never block a commit.
pub fn log_event(message: &str) {
    log_event_in(Path::new("."), message);
}

/// Appends a timestamped line to the hook log inside `dir`.
pub fn log_event_in(dir: &Path, message: &str) {
    let line = format!(
        "{} - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        message
    );
    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
        .and_then(|mut file| writeln!(file, "{}", line));
}
