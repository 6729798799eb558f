use super::{DateRange, ResultSet};
use crate::errors::ApodError;

/// A chunk whose request failed and contributed no records.
#[derive(Debug)]
pub struct ChunkFailure {
    pub range: DateRange,
    pub error: ApodError,
}

impl ChunkFailure {
    pub fn new(range: DateRange, error: ApodError) -> Self {
        Self { range, error }
    }
}

/// Records gathered over a run plus every chunk that was skipped.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub records: ResultSet,
    pub failures: Vec<ChunkFailure>,
    pub chunks_attempted: usize,
}

/// Returned by [`FetchReport::into_result`] when coverage has gaps.
#[derive(Debug)]
pub struct PartialFetch {
    pub records: ResultSet,
    pub failures: Vec<ChunkFailure>,
}

impl FetchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Days that were requested but never answered
    pub fn missing_days(&self) -> i64 {
        self.failures.iter().map(|f| f.range.span_days() + 1).sum()
    }

    pub fn into_result(self) -> Result<ResultSet, PartialFetch> {
        if self.failures.is_empty() {
            Ok(self.records)
        } else {
            Err(PartialFetch {
                records: self.records,
                failures: self.failures,
            })
        }
    }
}
