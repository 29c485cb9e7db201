mod extractor;

pub use extractor::ArchiveExtractor;

use crate::core::path::ensure_dir;
use crate::core::{SetupError, SetupResult};
use reqwest::Client;
use std::path::{Path, PathBuf};

/// Downloads release archives and unpacks them
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// Download `url` into `dest_dir`, returning the path of the saved file
    async fn download(&self, url: &str, dest_dir: &Path) -> SetupResult<PathBuf>;

    fn extract_zip(&self, archive: &Path, dest_dir: &Path) -> SetupResult<()>;

    fn extract_tar(&self, archive: &Path, dest_dir: &Path) -> SetupResult<()>;
}

/// Fetches LuaRocks releases over HTTP
pub struct ReleaseFetcher {
    client: Client,
}

impl ReleaseFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReleaseFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// File name for a downloaded URL (last path segment, query stripped)
fn file_name_for(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("download")
        .to_string()
}

impl Fetcher for ReleaseFetcher {
    async fn download(&self, url: &str, dest_dir: &Path) -> SetupResult<PathBuf> {
        tracing::info!("Downloading {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SetupError::Download {
                url: url.to_string(),
                reason: format!("HTTP status {}", response.status()),
            });
        }

        let bytes = response.bytes().await?;
        ensure_dir(dest_dir)?;
        let dest_path = dest_dir.join(file_name_for(url));
        std::fs::write(&dest_path, &bytes)?;

        tracing::debug!("Saved {} bytes to {}", bytes.len(), dest_path.display());
        Ok(dest_path)
    }

    fn extract_zip(&self, archive: &Path, dest_dir: &Path) -> SetupResult<()> {
        ArchiveExtractor::new(dest_dir.to_path_buf()).extract_zip(archive)
    }

    fn extract_tar(&self, archive: &Path, dest_dir: &Path) -> SetupResult<()> {
        ArchiveExtractor::new(dest_dir.to_path_buf()).extract_targz(archive)
    }
}
