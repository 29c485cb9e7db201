use crate::core::path::ensure_dir;
use crate::core::{SetupError, SetupResult};
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::Archive;
use zip::ZipArchive;

/// Unpacks release archives (tar.gz, zip) into a destination directory.
///
/// Archives keep their own top-level directory, so `luarocks-3.11.1.tar.gz`
/// lands at `<dest>/luarocks-3.11.1`. Nothing is cleaned up on failure.
pub struct ArchiveExtractor {
    dest_dir: PathBuf,
}

impl ArchiveExtractor {
    pub fn new(dest_dir: PathBuf) -> Self {
        Self { dest_dir }
    }

    pub fn extract_targz(&self, archive_path: &Path) -> SetupResult<()> {
        let file = File::open(archive_path)?;
        let mut archive = Archive::new(GzDecoder::new(file));

        ensure_dir(&self.dest_dir)?;
        archive
            .unpack(&self.dest_dir)
            .map_err(|e| SetupError::Extract {
                archive: archive_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            "Extracted {} to {}",
            archive_path.display(),
            self.dest_dir.display()
        );
        Ok(())
    }

    pub fn extract_zip(&self, archive_path: &Path) -> SetupResult<()> {
        let file = File::open(archive_path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| SetupError::Extract {
            archive: archive_path.to_path_buf(),
            reason: format!("Invalid zip: {}", e),
        })?;

        ensure_dir(&self.dest_dir)?;
        archive
            .extract(&self.dest_dir)
            .map_err(|e| SetupError::Extract {
                archive: archive_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            "Extracted {} to {}",
            archive_path.display(),
            self.dest_dir.display()
        );
        Ok(())
    }
}
