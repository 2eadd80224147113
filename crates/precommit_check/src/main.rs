// crates/precommit_check/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

use commit_markers::{COMMIT_ID_MARKER, NOT_FOR_REPO_MARKER};
use get_repo_root::get_repo_root;
use hook_log::log_event;
use marker_processor::{has_not_for_repo_marker, replace_commit_id_marker, should_check_file};

fn main() -> Result<()> {
    let matches = Command::new("precommit_check")
        .version("0.1.0")
        .about("Git pre-commit hook: blocks $NotForRepo$ files and stamps $Id$ markers")
        .arg(
            Arg::new("affected_files")
                .required(true)
                .num_args(1)
                .help("Path to a file listing the staged paths, one per line"),
        )
        .get_matches();

    let list_path = matches.get_one::<String>("affected_files").unwrap();
    let affected = fs::read_to_string(list_path)
        .context("An error occurred while reading the files that need to be committed")?;

    // Resolved once per run; HEAD cannot move underneath a pre-commit hook.
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let repo_root = match get_repo_root(&current_dir) {
        Ok(root) => {
            log_event(&format!("Repository root resolved to {}.", root.display()));
            Some(root)
        }
        Err(err) => {
            log_event(&format!(
                "No repository root could be resolved from {}: {:#}",
                current_dir.display(),
                err
            ));
            None
        }
    };

    for line in affected.lines() {
        let path_str = line.trim();
        if !should_check_file(path_str) {
            log_event(&format!("{} is skipped.", path_str));
            continue;
        }
        let path = Path::new(path_str);

        if has_not_for_repo_marker(path) {
            let message = format!("{} marker found in {}", NOT_FOR_REPO_MARKER, path_str);
            log_event(&message);
            eprintln!("{}", message);
            process::exit(1);
        }

        match replace_commit_id_marker(path, repo_root.as_deref()) {
            Ok(true) => {
                log_event(&format!("{} marker in {} replaced.", COMMIT_ID_MARKER, path_str));
            }
            Ok(false) => {}
            Err(err) => {
                let message =
                    format!("{} marker in {} could not be replaced", COMMIT_ID_MARKER, path_str);
                log_event(&format!("{}: {:#}", message, err));
                eprintln!("{}", message);
                process::exit(1);
            }
        }
    }

    Ok(())
}
