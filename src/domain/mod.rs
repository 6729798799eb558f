pub mod date_range;
pub mod fetch_report;
pub mod record;
pub mod result_set;

pub use date_range::{Chunks, DateRange};
pub use fetch_report::{ChunkFailure, FetchReport, PartialFetch};
pub use record::{ApodRecord, MediaKind};
pub use result_set::ResultSet;
