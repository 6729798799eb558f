use std::path::PathBuf;

use crate::assets::AssetSink;
use crate::domain::{ApodRecord, ResultSet};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Download `hdurl` when the record has one
    pub prefer_hd: bool,
    /// Check stored files and drop the ones that are not valid images
    pub verify: bool,
}

/// What happened to one record's asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    NotImage,
    MissingDate,
    MissingUrl,
    AlreadyPresent(PathBuf),
    Stored(PathBuf),
    Failed(String),
    Corrupt(PathBuf),
}

impl AssetOutcome {
    /// The asset is on disk (and valid, when verification is on)
    pub fn is_available(&self) -> bool {
        matches!(self, AssetOutcome::AlreadyPresent(_) | AssetOutcome::Stored(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub stored: usize,
    pub already_present: usize,
    pub not_image: usize,
    pub missing_date: usize,
    pub missing_url: usize,
    pub failed: usize,
    pub corrupt: usize,
}

impl ReconcileSummary {
    fn record(&mut self, outcome: &AssetOutcome) {
        match outcome {
            AssetOutcome::NotImage => self.not_image += 1,
            AssetOutcome::MissingDate => self.missing_date += 1,
            AssetOutcome::MissingUrl => self.missing_url += 1,
            AssetOutcome::AlreadyPresent(_) => self.already_present += 1,
            AssetOutcome::Stored(_) => self.stored += 1,
            AssetOutcome::Failed(_) => self.failed += 1,
            AssetOutcome::Corrupt(_) => self.corrupt += 1,
        }
    }

    pub fn available(&self) -> usize {
        self.stored + self.already_present
    }

    pub fn skipped(&self) -> usize {
        self.not_image + self.missing_date + self.missing_url
    }

    pub fn total(&self) -> usize {
        self.available() + self.skipped() + self.failed + self.corrupt
    }
}

pub struct ReconcileService<A: AssetSink> {
    sink: A,
    options: ReconcileOptions,
}

impl<A: AssetSink> ReconcileService<A> {
    pub fn new(sink: A, options: ReconcileOptions) -> Self {
        Self { sink, options }
    }

    /// Make sure one record's asset is on disk
    pub fn resolve(&self, record: &ApodRecord) -> AssetOutcome {
        if !record.is_image() {
            tracing::debug!(date = %record.label(), media_type = ?record.media_type, "Not an image, skipping");
            return AssetOutcome::NotImage;
        }

        let Some(date) = record.date else {
            tracing::warn!("Record has no date, skipping image download");
            return AssetOutcome::MissingDate;
        };

        let Some(url) = record.asset_url(self.options.prefer_hd) else {
            tracing::warn!(%date, "No image 'url' found, skipping image download");
            return AssetOutcome::MissingUrl;
        };

        if let Some(path) = self.sink.stored(date) {
            if !self.options.verify {
                return AssetOutcome::AlreadyPresent(path);
            }
            match self.sink.verify(&path) {
                Ok(()) => return AssetOutcome::AlreadyPresent(path),
                Err(e) => {
                    tracing::warn!(%date, error = %e, "Stored image is corrupt, downloading again");
                    if let Err(e) = self.sink.discard(&path) {
                        return AssetOutcome::Failed(e.to_string());
                    }
                }
            }
        }

        let path = match self.sink.fetch_and_store(&url, date) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!(%date, %url, error = %e, "Image download failed");
                return AssetOutcome::Failed(e.to_string());
            }
        };

        if self.options.verify {
            if let Err(e) = self.sink.verify(&path) {
                tracing::warn!(%date, error = %e, "Downloaded image is corrupt, removing");
                if let Err(e) = self.sink.discard(&path) {
                    tracing::error!(path = %path.display(), error = %e, "Could not remove corrupt image");
                }
                return AssetOutcome::Corrupt(path);
            }
        }

        AssetOutcome::Stored(path)
    }

    /// Resolve every record's asset; the records themselves are left untouched.
    pub fn reconcile(&self, records: &[ApodRecord]) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        for record in records {
            summary.record(&self.resolve(record));
        }
        log_summary(&summary);
        summary
    }

    /// Resolve every record's asset and keep only the records whose asset is
    /// available afterwards.
    pub fn reconcile_clean(&self, records: Vec<ApodRecord>) -> (ResultSet, ReconcileSummary) {
        let mut summary = ReconcileSummary::default();
        let mut kept = ResultSet::new();

        for record in records {
            let outcome = self.resolve(&record);
            summary.record(&outcome);
            if outcome.is_available() {
                kept.push(record);
            }
        }

        log_summary(&summary);
        (kept, summary)
    }
}

fn log_summary(summary: &ReconcileSummary) {
    tracing::info!(
        stored = summary.stored,
        already_present = summary.already_present,
        skipped = summary.skipped(),
        failed = summary.failed,
        corrupt = summary.corrupt,
        "Image reconciliation finished"
    );
}
