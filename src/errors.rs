// Error type shared by every installation step.
//
// Only `MissingPackageManager` always ends a run. Every other variant is
// recorded and skipped past under the best-effort policy, or ends the run
// under fail-fast.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("could not determine the user's home directory")]
    HomeDirUnavailable,

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The package manager is not on the search path. `hint` is a shell
    /// command that installs it.
    #[error("'{program}' was not found on PATH. Install it with: {hint}")]
    MissingPackageManager { program: String, hint: String },

    #[error("could not start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' exited with {status}")]
    CommandFailed { command: String, status: String },

    #[error("could not prepare directory {}: {source}", .path.display())]
    TargetDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("cannot tell the archive format of '{0}'")]
    UnsupportedArchive(String),

    #[error("could not extract {}: {source}", .path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not remove archive {}: {source}", .path.display())]
    RemoveArchive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not mark files under {} executable: {source}", .path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not update shell profile {}: {source}", .path.display())]
    ShellProfile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type SetupResult<T> = Result<T, SetupError>;
