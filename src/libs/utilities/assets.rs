// Downloading the SUMO archive and figuring out what kind of archive it is.

use crate::errors::{SetupError, SetupResult};
use crate::{log_debug, log_error};
use colored::Colorize;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

/// Archive formats the installer knows how to unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    TarGz,
    TarBz2,
    TarXz,
    Tar,
    Zip,
}

impl ArchiveKind {
    /// Detects the format from the file name. Compound extensions are checked
    /// before single ones so `.tar.gz` never reads as plain `.gz`.
    pub fn from_file_name(file_name: &str) -> SetupResult<Self> {
        let lower = file_name.to_lowercase();
        let kind = if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            ArchiveKind::TarGz
        } else if lower.ends_with(".tar.bz2") || lower.ends_with(".tbz") || lower.ends_with(".tbz2") {
            ArchiveKind::TarBz2
        } else if lower.ends_with(".tar.xz") || lower.ends_with(".txz") {
            ArchiveKind::TarXz
        } else if lower.ends_with(".tar") {
            ArchiveKind::Tar
        } else if lower.ends_with(".zip") {
            ArchiveKind::Zip
        } else {
            return Err(SetupError::UnsupportedArchive(file_name.to_string()));
        };
        Ok(kind)
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArchiveKind::TarGz => "tar.gz",
            ArchiveKind::TarBz2 => "tar.bz2",
            ArchiveKind::TarXz => "tar.xz",
            ArchiveKind::Tar => "tar",
            ArchiveKind::Zip => "zip",
        };
        f.write_str(name)
    }
}

/// Last path segment of a URL, ignoring any query string or fragment.
pub fn archive_file_name(url: &str) -> Option<String> {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme.split(['?', '#']).next().unwrap_or_default();
    let (_, path) = path.split_once('/')?;
    path.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Fetches the archive to a local file.
pub trait ArchiveFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> SetupResult<()>;
}

/// Plain HTTP(S) download. No retries and no timeout.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("setup-sumo/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> SetupResult<()> {
        log_debug!("[SUMO::Download] Starting download from URL: {}", url.blue());

        let response = self.agent.get(url).call().map_err(|e| {
            log_error!("[SUMO::Download] HTTP request failed for {}: {}", url.red(), e);
            SetupError::Download {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let io_failure = |e: io::Error| SetupError::Download {
            url: url.to_string(),
            reason: format!("writing {}: {e}", dest.display()),
        };
        let mut file = File::create(dest).map_err(io_failure)?;
        let mut reader = response.into_reader();
        io::copy(&mut reader, &mut file).map_err(io_failure)?;

        log_debug!(
            "[SUMO::Download] File downloaded successfully to {}",
            dest.display().to_string().green()
        );
        Ok(())
    }
}
