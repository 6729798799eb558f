use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::ApodRecord;

/// Ordered, append-only collection of records for one run.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    records: Vec<ApodRecord>,
    seen_dates: HashSet<NaiveDate>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, refusing a second record for a date already held.
    ///
    /// Records without a date are always accepted.
    pub fn push(&mut self, record: ApodRecord) -> bool {
        if let Some(date) = record.date {
            if !self.seen_dates.insert(date) {
                tracing::warn!(%date, "Duplicate record for date, keeping the first one");
                return false;
            }
        }
        self.records.push(record);
        true
    }

    /// Append records in order; returns how many were accepted
    pub fn extend<I: IntoIterator<Item = ApodRecord>>(&mut self, records: I) -> usize {
        let mut accepted = 0;
        for record in records {
            if self.push(record) {
                accepted += 1;
            }
        }
        accepted
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApodRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[ApodRecord] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<ApodRecord> {
        self.records
    }
}

impl FromIterator<ApodRecord> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ApodRecord>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ApodRecord;
    type IntoIter = std::slice::Iter<'a, ApodRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}
