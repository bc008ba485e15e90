// The two halves of a SUMO installation.

/// Installs native dependencies through the host package manager
/// (Homebrew on macOS, apt-get on Ubuntu).
pub(crate) mod package_manager;

/// Downloads and unpacks the prebuilt SUMO binaries into the target directory.
pub(crate) mod archive;
