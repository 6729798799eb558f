use crate::domain::{ApodRecord, DateRange};
use crate::errors::ApodResult;

#[cfg_attr(test, mockall::automock)]
pub trait RecordSource: Send + Sync {
    /// Fetch every record in the inclusive range, in the source's order
    fn fetch_range(&self, range: &DateRange) -> ApodResult<Vec<ApodRecord>>;
}
