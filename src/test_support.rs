// Fixtures shared by the unit tests: fake processes, fake downloads and
// in-memory archives built with the same crates the installer unpacks with.

use crate::errors::{SetupError, SetupResult};
use crate::libs::process::{CommandOutcome, CommandRunner};
use crate::libs::utilities::assets::ArchiveFetcher;
use std::cell::RefCell;
use std::fs;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

/// Writes an executable shell stub named `name` into `dir`.
#[cfg(unix)]
pub fn fake_executable(dir: &Path, name: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn tar_bytes<W: Write>(writer: W, files: &[(&str, &[u8])]) -> W {
    let mut builder = tar::Builder::new(writer);
    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *data).unwrap();
    }
    builder.into_inner().unwrap()
}

pub fn tar_xz_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
    tar_bytes(encoder, files).finish().unwrap()
}

pub fn tar_gz_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    tar_bytes(encoder, files).finish().unwrap()
}

pub fn zip_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in files {
        writer
            .start_file(*name, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Records every invocation instead of running it. Invocations whose last
/// argument is listed in `failing` report exit code 1.
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
    pub failing: Vec<String>,
}

impl RecordingRunner {
    pub fn failing_on(packages: &[&str]) -> Self {
        Self {
            calls: RefCell::default(),
            failing: packages.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.borrow().clone()
    }

    /// The last argument of every call, which is the package name for installs.
    pub fn installed(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|(_, args)| args.last().cloned())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<CommandOutcome> {
        self.calls
            .borrow_mut()
            .push((program.to_path_buf(), args.to_vec()));
        let fails = args.last().is_some_and(|last| self.failing.contains(last));
        Ok(CommandOutcome {
            success: !fails,
            code: Some(if fails { 1 } else { 0 }),
        })
    }
}

/// Serves fixed bytes for any URL and counts downloads.
pub struct StaticFetcher {
    pub bytes: Vec<u8>,
    pub fetches: RefCell<usize>,
}

impl StaticFetcher {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            fetches: RefCell::new(0),
        }
    }
}

impl ArchiveFetcher for StaticFetcher {
    fn fetch(&self, _url: &str, dest: &Path) -> SetupResult<()> {
        *self.fetches.borrow_mut() += 1;
        fs::write(dest, &self.bytes).unwrap();
        Ok(())
    }
}

/// Behaves like an unreachable network.
pub struct OfflineFetcher;

impl ArchiveFetcher for OfflineFetcher {
    fn fetch(&self, url: &str, _dest: &Path) -> SetupResult<()> {
        Err(SetupError::Download {
            url: url.to_string(),
            reason: "network unreachable".to_string(),
        })
    }
}
