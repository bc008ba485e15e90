// Snapshot of the ambient process environment the installer depends on.
// Captured once in `main` and passed down explicitly; nothing below this
// module reads `HOME` or `PATH` on its own.

use crate::errors::{SetupError, SetupResult};
use crate::log_debug;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct HostEnvironment {
    pub home: PathBuf,
    pub search_path: Option<OsString>,
}

impl HostEnvironment {
    pub fn new(home: impl Into<PathBuf>, search_path: Option<OsString>) -> Self {
        Self {
            home: home.into(),
            search_path,
        }
    }

    /// Reads the home directory and `PATH` of the running process.
    pub fn from_process() -> SetupResult<Self> {
        let home = dirs::home_dir().ok_or(SetupError::HomeDirUnavailable)?;
        let search_path = env::var_os("PATH");
        log_debug!(
            "[SUMO::Host] home={} PATH set={}",
            home.display(),
            search_path.is_some()
        );
        Ok(Self::new(home, search_path))
    }

    /// Locates `program` the way a shell would.
    ///
    /// Names containing a path separator are checked as given, relative ones
    /// against the home directory. Bare names are looked up in each
    /// `search_path` entry, first executable file wins.
    pub fn find_program(&self, program: &str) -> Option<PathBuf> {
        if program.is_empty() {
            return None;
        }
        match which::which_in(program, self.search_path.as_ref(), &self.home) {
            Ok(found) => Some(found),
            Err(e) => {
                log_debug!("[SUMO::Host] '{}' not found: {}", program, e);
                None
            }
        }
    }
}
