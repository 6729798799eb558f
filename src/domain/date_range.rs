use std::fmt;

use chrono::{Days, NaiveDate};

use crate::errors::{ApodError, ApodResult};

/// Inclusive calendar range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ApodResult<Self> {
        if start > end {
            return Err(ApodError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Days between start and end; zero for a single-day range
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Split into contiguous sub-ranges whose span is at most `max_span_days`.
    ///
    /// Each chunk ends at `min(cursor + max_span_days, end)` and the next one
    /// starts the following day, so a chunk covers up to `max_span_days + 1`
    /// calendar days.
    pub fn chunks(&self, max_span_days: u32) -> Chunks {
        Chunks {
            cursor: Some(self.start),
            end: self.end,
            max_span_days,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone)]
pub struct Chunks {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
    max_span_days: u32,
}

impl Iterator for Chunks {
    type Item = DateRange;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor.filter(|c| *c <= self.end)?;

        let chunk_end = start
            .checked_add_days(Days::new(u64::from(self.max_span_days)))
            .map_or(self.end, |d| d.min(self.end));

        // succ_opt is None only at NaiveDate::MAX, which also ends iteration
        self.cursor = chunk_end.succ_opt();

        Some(DateRange {
            start,
            end: chunk_end,
        })
    }
}
