//! # Archive Installer
//!
//! Places the prebuilt SUMO binaries in the target directory: create the
//! directory, download the archive into it, unpack it there, delete the
//! archive and mark everything executable.
//!
//! All of this happens inside an [`InstallScope`]. The scope stands in for
//! `pushd`/`popd`: every path is built relative to the target directory it
//! holds, and the process-wide working directory is never touched.

use crate::errors::{SetupError, SetupResult};
use crate::libs::utilities::assets::{ArchiveFetcher, ArchiveKind};
use crate::libs::utilities::{binary, compression};
use crate::{log_debug, log_info};
use colored::Colorize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct InstallScope<'a> {
    target: &'a Path,
}

impl<'a> InstallScope<'a> {
    pub fn new(target: &'a Path) -> Self {
        log_debug!("[SUMO::Archive] Entering {}", target.display().to_string().cyan());
        Self { target }
    }

    pub fn target(&self) -> &Path {
        self.target
    }

    /// Creates the target directory if needed. With `clean` the previous
    /// contents are removed first; otherwise they are left alone.
    pub fn prepare(&self, clean: bool) -> SetupResult<()> {
        let fail = |source: io::Error| SetupError::TargetDir {
            path: self.target.to_path_buf(),
            source,
        };

        fs::create_dir_all(self.target).map_err(fail)?;
        if clean {
            log_info!(
                "[SUMO::Archive] Clearing {}",
                self.target.display().to_string().yellow()
            );
            for entry in fs::read_dir(self.target).map_err(fail)? {
                let path = entry.map_err(fail)?.path();
                if path.is_dir() {
                    fs::remove_dir_all(&path).map_err(fail)?;
                } else {
                    fs::remove_file(&path).map_err(fail)?;
                }
            }
        }
        Ok(())
    }

    /// Where the archive named `file_name` is downloaded to.
    pub fn archive_path(&self, file_name: &str) -> PathBuf {
        self.target.join(file_name)
    }

    /// Fetches `url` into `archive`. A leftover archive from an interrupted
    /// run is deleted first so a failed download never extracts stale bytes.
    pub fn download<F: ArchiveFetcher>(&self, fetcher: &F, url: &str, archive: &Path) -> SetupResult<()> {
        self.remove_archive(archive)?;
        log_info!("[SUMO::Archive] Downloading {}", url.blue());
        fetcher.fetch(url, archive)
    }

    pub fn extract(&self, archive: &Path, kind: ArchiveKind) -> SetupResult<()> {
        log_info!(
            "[SUMO::Archive] Extracting {} into {}",
            archive.display(),
            self.target.display().to_string().cyan()
        );
        compression::extract_archive(archive, self.target, kind).map_err(|source| {
            SetupError::Extract {
                path: archive.to_path_buf(),
                source,
            }
        })
    }

    /// Deletes the downloaded archive. An archive that was never written
    /// counts as removed.
    pub fn remove_archive(&self, archive: &Path) -> SetupResult<()> {
        match fs::remove_file(archive) {
            Ok(()) => {
                log_debug!("[SUMO::Archive] Removed {}", archive.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SetupError::RemoveArchive {
                path: archive.to_path_buf(),
                source,
            }),
        }
    }

    pub fn mark_executable(&self) -> SetupResult<usize> {
        binary::mark_executable(self.target).map_err(|source| SetupError::Permissions {
            path: self.target.to_path_buf(),
            source,
        })
    }
}

impl Drop for InstallScope<'_> {
    fn drop(&mut self) {
        log_debug!("[SUMO::Archive] Leaving {}", self.target.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{OfflineFetcher, StaticFetcher, tar_xz_archive};
    use tempfile::TempDir;

    #[test]
    fn prepare_is_idempotent_and_keeps_contents() {
        let home = TempDir::new().unwrap();
        let target = home.path().join("sumo_binaries/bin");
        let scope = InstallScope::new(&target);

        scope.prepare(false).unwrap();
        fs::write(target.join("keep"), "x").unwrap();
        scope.prepare(false).unwrap();

        assert!(target.join("keep").exists());
    }

    #[test]
    fn clean_prepare_empties_the_directory() {
        let home = TempDir::new().unwrap();
        let target = home.path().join("bin");
        fs::create_dir_all(target.join("old/nested")).unwrap();
        fs::write(target.join("stale"), "x").unwrap();

        InstallScope::new(&target).prepare(true).unwrap();

        assert!(target.is_dir());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn download_extract_and_remove_inside_the_target() {
        let home = TempDir::new().unwrap();
        let target = home.path().join("bin");
        let scope = InstallScope::new(&target);
        scope.prepare(false).unwrap();

        let fetcher = StaticFetcher::new(tar_xz_archive(&[("sumo-gui", b"gui")]));
        let archive = scope.archive_path("binaries-mac.tar.xz");
        assert_eq!(archive, target.join("binaries-mac.tar.xz"));

        scope.download(&fetcher, "https://example.com/binaries-mac.tar.xz", &archive).unwrap();
        scope.extract(&archive, ArchiveKind::TarXz).unwrap();
        scope.remove_archive(&archive).unwrap();

        assert!(!archive.exists());
        assert_eq!(fs::read(target.join("sumo-gui")).unwrap(), b"gui");
    }

    #[test]
    fn offline_download_leaves_nothing_to_remove() {
        let home = TempDir::new().unwrap();
        let target = home.path().join("bin");
        let scope = InstallScope::new(&target);
        scope.prepare(false).unwrap();
        let archive = scope.archive_path("binaries.tar.xz");

        let err = scope
            .download(&OfflineFetcher, "https://example.com/binaries.tar.xz", &archive)
            .unwrap_err();
        assert!(matches!(err, SetupError::Download { .. }));
        assert!(matches!(
            scope.extract(&archive, ArchiveKind::TarXz),
            Err(SetupError::Extract { .. })
        ));
        scope.remove_archive(&archive).unwrap();
    }

    #[test]
    fn failed_download_does_not_reuse_a_stale_archive() {
        let home = TempDir::new().unwrap();
        let target = home.path().join("bin");
        let scope = InstallScope::new(&target);
        scope.prepare(false).unwrap();
        let archive = scope.archive_path("binaries.tar.xz");
        fs::write(&archive, tar_xz_archive(&[("sumo", b"old")])).unwrap();

        assert!(scope
            .download(&OfflineFetcher, "https://example.com/binaries.tar.xz", &archive)
            .is_err());
        assert!(!archive.exists());
        assert!(scope.extract(&archive, ArchiveKind::TarXz).is_err());
        assert!(!target.join("sumo").exists());
    }
}
