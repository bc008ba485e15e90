// Unpacks the downloaded SUMO archive in place.

use crate::libs::utilities::assets::ArchiveKind;
use crate::log_debug;
use bzip2::read::BzDecoder;
use colored::Colorize;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tar::Archive;
use xz2::read::XzDecoder;
use zip::ZipArchive;

/// Extracts `src` directly into `dest`, which must already exist.
/// Existing files with the same names are overwritten.
pub fn extract_archive(src: &Path, dest: &Path, kind: ArchiveKind) -> io::Result<()> {
    log_debug!(
        "[SUMO::Extract] Extracting {} archive {} into {}",
        kind,
        src.display().to_string().blue(),
        dest.display().to_string().cyan()
    );

    let file = File::open(src)?;
    match kind {
        ArchiveKind::TarGz => unpack_tar(GzDecoder::new(file), dest)?,
        ArchiveKind::TarBz2 => unpack_tar(BzDecoder::new(file), dest)?,
        ArchiveKind::TarXz => unpack_tar(XzDecoder::new(file), dest)?,
        ArchiveKind::Tar => unpack_tar(file, dest)?,
        ArchiveKind::Zip => {
            let mut archive = ZipArchive::new(file)?;
            archive.extract(dest)?;
        }
    }

    log_debug!("[SUMO::Extract] Archive contents available at {}", dest.display().to_string().green());
    Ok(())
}

fn unpack_tar<R: Read>(reader: R, dest: &Path) -> io::Result<()> {
    let mut archive = Archive::new(reader);
    archive.set_overwrite(true);
    archive.unpack(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{tar_gz_archive, tar_xz_archive, zip_archive};
    use std::fs;
    use tempfile::TempDir;

    const FILES: &[(&str, &[u8])] = &[("sumo", b"#!/bin/sh\necho sumo\n"), ("tools/netconvert", b"bin")];

    fn assert_unpacked(dest: &Path) {
        assert_eq!(fs::read(dest.join("sumo")).unwrap(), FILES[0].1);
        assert_eq!(fs::read(dest.join("tools/netconvert")).unwrap(), FILES[1].1);
    }

    #[test]
    fn unpacks_tar_xz() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("binaries.tar.xz");
        fs::write(&src, tar_xz_archive(FILES)).unwrap();
        let dest = dir.path().join("out");
        fs::create_dir(&dest).unwrap();

        extract_archive(&src, &dest, ArchiveKind::TarXz).unwrap();
        assert_unpacked(&dest);
    }

    #[test]
    fn unpacks_tar_gz_over_existing_files() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("binaries.tar.gz");
        fs::write(&src, tar_gz_archive(FILES)).unwrap();
        let dest = dir.path().join("out");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("sumo"), "stale").unwrap();

        extract_archive(&src, &dest, ArchiveKind::TarGz).unwrap();
        assert_unpacked(&dest);
    }

    #[test]
    fn unpacks_zip() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("binaries.zip");
        fs::write(&src, zip_archive(FILES)).unwrap();
        let dest = dir.path().join("out");
        fs::create_dir(&dest).unwrap();

        extract_archive(&src, &dest, ArchiveKind::Zip).unwrap();
        assert_unpacked(&dest);
    }

    #[test]
    fn corrupt_archive_is_an_error() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("binaries.tar.xz");
        fs::write(&src, b"definitely not xz").unwrap();

        assert!(extract_archive(&src, dir.path(), ArchiveKind::TarXz).is_err());
    }
}
