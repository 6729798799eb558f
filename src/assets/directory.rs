use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::assets::sniff::well_formed_image;
use crate::assets::traits::AssetSink;
use crate::config::Config;
use crate::errors::{ApodError, ApodResult};

const ASSET_EXTENSION: &str = "jpg";

/// Stores each asset as `{dir}/{date}.jpg`.
pub struct DirectoryAssetSink {
    client: Client,
    dir: PathBuf,
}

impl DirectoryAssetSink {
    pub fn new<P: Into<PathBuf>>(dir: P, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            dir: dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.image_dir.clone(), config.timeout)
    }

    pub fn asset_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.{}", date, ASSET_EXTENSION))
    }

    fn partial_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.{}.part", date, ASSET_EXTENSION))
    }

    /// Write through a sibling `.part` file so a crash never leaves a
    /// half-written file at the final path
    fn write_atomic(&self, date: NaiveDate, bytes: &[u8]) -> ApodResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let partial = self.partial_path(date);
        let target = self.asset_path(date);

        fs::write(&partial, bytes)?;
        if let Err(e) = fs::rename(&partial, &target) {
            fs::remove_file(&partial).ok();
            return Err(e.into());
        }

        Ok(target)
    }
}

impl AssetSink for DirectoryAssetSink {
    fn stored(&self, date: NaiveDate) -> Option<PathBuf> {
        let path = self.asset_path(date);
        path.is_file().then_some(path)
    }

    fn fetch_and_store(&self, url: &str, date: NaiveDate) -> ApodResult<PathBuf> {
        tracing::debug!(%url, %date, "Downloading asset");

        let bytes = self.client.get(url).send()?.error_for_status()?.bytes()?;
        let path = self.write_atomic(date, &bytes)?;

        tracing::info!(path = %path.display(), size = bytes.len(), "Saved image");
        Ok(path)
    }

    fn verify(&self, path: &Path) -> ApodResult<()> {
        let bytes = fs::read(path)?;
        match well_formed_image(&bytes) {
            Some(format) => {
                tracing::debug!(path = %path.display(), %format, "Image verified");
                Ok(())
            }
            None => Err(ApodError::CorruptAsset(path.to_path_buf())),
        }
    }

    fn discard(&self, path: &Path) -> ApodResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
