// Renders the environment exports that put the SUMO binaries on the user's
// PATH and, only when asked, appends them to a shell profile.

use crate::errors::{SetupError, SetupResult};
use crate::{log_debug, log_info};
use colored::Colorize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

const PROFILE_MARKER: &str = "# Added by setup-sumo";

/// The two lines the user adds to their profile. Both carry the literal
/// target path so they work without any other variable being set.
pub fn export_lines(home_var: &str, target: &Path) -> Vec<String> {
    let target = target.display();
    vec![
        format!("export {home_var}=\"{target}\""),
        format!("export PATH=\"{target}:$PATH\""),
    ]
}

/// Checks whether `needle_lines` appears as a contiguous block in
/// `haystack_lines`, ignoring surrounding whitespace. An empty needle is
/// always contained.
pub fn contains_multiline_block(haystack_lines: &[String], needle_lines: &[String]) -> bool {
    if needle_lines.is_empty() {
        return true;
    }
    if haystack_lines.len() < needle_lines.len() {
        return false;
    }

    haystack_lines.windows(needle_lines.len()).any(|window| {
        window
            .iter()
            .zip(needle_lines)
            .all(|(have, want)| have.trim() == want.trim())
    })
}

/// Appends `lines` to the rc file unless they are already there.
/// Returns `true` when the file was changed.
pub fn persist_exports(rc_path: &Path, lines: &[String]) -> SetupResult<bool> {
    let fail = |source: io::Error| SetupError::ShellProfile {
        path: rc_path.to_path_buf(),
        source,
    };

    let existing = match fs::read_to_string(rc_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(fail(e)),
    };
    let existing_lines: Vec<String> = existing.lines().map(str::to_string).collect();

    if contains_multiline_block(&existing_lines, lines) {
        log_debug!(
            "[SUMO::Shell] Exports already present in {}",
            rc_path.display()
        );
        return Ok(false);
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(rc_path)
        .map_err(fail)?;

    let mut block = String::new();
    if !existing.is_empty() && !existing.ends_with('\n') {
        block.push('\n');
    }
    block.push('\n');
    block.push_str(PROFILE_MARKER);
    block.push('\n');
    for line in lines {
        block.push_str(line);
        block.push('\n');
    }
    file.write_all(block.as_bytes()).map_err(fail)?;

    log_info!(
        "[SUMO::Shell] Added SUMO exports to {}",
        rc_path.display().to_string().green()
    );
    Ok(true)
}
