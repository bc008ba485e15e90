use crate::log_debug;
use colored::Colorize;
use std::io;
use std::path::Path;

/// Adds the execute bits to every regular file under `dir`, like `chmod +x`
/// applied recursively. Returns how many files were touched.
#[cfg(unix)]
pub fn mark_executable(dir: &Path) -> io::Result<usize> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let mut touched = 0;
    for entry in walkdir::WalkDir::new(dir) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let mut permissions = entry.metadata().map_err(io::Error::from)?.permissions();
        let mode = permissions.mode();
        if mode & 0o111 != 0o111 {
            permissions.set_mode(mode | 0o111);
            fs::set_permissions(entry.path(), permissions)?;
        }
        touched += 1;
    }

    log_debug!(
        "[SUMO::Permissions] Marked {} file(s) executable under {}",
        touched,
        dir.display().to_string().cyan()
    );
    Ok(touched)
}

/// Executability is not a permission bit outside Unix.
#[cfg(not(unix))]
pub fn mark_executable(dir: &Path) -> io::Result<usize> {
    log_debug!(
        "[SUMO::Permissions] Skipping permission pass on this platform for {}",
        dir.display().to_string().cyan()
    );
    Ok(0)
}
