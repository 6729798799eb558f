use crate::domain::{ChunkFailure, DateRange, FetchReport};
use crate::sources::RecordSource;

pub struct FetchService<S: RecordSource> {
    source: S,
    max_chunk_days: u32,
}

impl<S: RecordSource> FetchService<S> {
    pub fn new(source: S, max_chunk_days: u32) -> Self {
        Self {
            source,
            max_chunk_days,
        }
    }

    /// The sub-ranges `fetch` will request, in order
    pub fn plan(&self, range: &DateRange) -> Vec<DateRange> {
        range.chunks(self.max_chunk_days).collect()
    }

    /// Walk the range chunk by chunk and gather every record.
    ///
    /// A failed chunk contributes nothing and is recorded in the report; the
    /// walk always continues with the next chunk.
    pub fn fetch(&self, range: &DateRange) -> FetchReport {
        let mut report = FetchReport::default();

        for chunk in range.chunks(self.max_chunk_days) {
            report.chunks_attempted += 1;
            tracing::info!("Fetching data from {} to {}...", chunk.start(), chunk.end());

            match self.source.fetch_range(&chunk) {
                Ok(records) => {
                    let received = records.len();
                    let stray = records
                        .iter()
                        .filter_map(|r| r.date)
                        .filter(|d| !chunk.contains(*d))
                        .count();
                    if stray > 0 {
                        tracing::warn!(chunk = %chunk, stray, "Source returned records outside the requested dates");
                    }
                    let accepted = report.records.extend(records);
                    tracing::debug!(chunk = %chunk, received, accepted, "Chunk complete");
                }
                Err(e) => {
                    if e.is_timeout() {
                        tracing::warn!(
                            "Timeout occurred for chunk starting {}. Skipping.",
                            chunk.start()
                        );
                    } else {
                        tracing::error!(chunk = %chunk, error = %e, "Chunk request failed");
                    }
                    report.failures.push(ChunkFailure::new(chunk, e));
                }
            }
        }

        tracing::info!(
            records = report.records.len(),
            chunks = report.chunks_attempted,
            failed = report.failures.len(),
            "Fetch finished"
        );

        report
    }
}
