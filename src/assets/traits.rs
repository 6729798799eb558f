use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::errors::ApodResult;

/// Turns a record's asset URL into a locally stored file keyed by date.
#[cfg_attr(test, mockall::automock)]
pub trait AssetSink: Send + Sync {
    /// Path of the asset for `date` if it is already on disk
    fn stored(&self, date: NaiveDate) -> Option<PathBuf>;

    /// Download `url` and persist it under the path derived from `date`
    fn fetch_and_store(&self, url: &str, date: NaiveDate) -> ApodResult<PathBuf>;

    /// Check that a stored file is a well-formed image
    fn verify(&self, path: &Path) -> ApodResult<()>;

    /// Remove a stored file
    fn discard(&self, path: &Path) -> ApodResult<()>;
}
