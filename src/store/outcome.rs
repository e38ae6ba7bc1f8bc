//! Operation outcomes
//!
//! The default failure policy is lenient: most operations log and
//! return an empty, zero, or partial result, so "no data matched" and
//! "the store call failed" look the same. These outcome types keep that
//! lenient read while carrying the absorbed error as an optional
//! diagnostic, so strict callers can opt in without changing anyone
//! else's behavior.

use super::errors::StoreError;
use super::record::Record;

/// Outcome of a read operation (get / get_sorted).
#[derive(Debug, Default)]
pub struct QueryOutcome {
    records: Vec<Record>,
    diagnostic: Option<StoreError>,
    degraded: bool,
}

impl QueryOutcome {
    /// A fully successful read.
    pub fn clean(records: Vec<Record>) -> Self {
        Self {
            records,
            diagnostic: None,
            degraded: false,
        }
    }

    /// A read that succeeded only after downgrading (sorted fell back
    /// to unsorted).
    pub fn degraded(records: Vec<Record>, diagnostic: StoreError) -> Self {
        Self {
            records,
            diagnostic: Some(diagnostic),
            degraded: true,
        }
    }

    /// A failed read, absorbed into an empty result.
    pub fn failed(diagnostic: StoreError) -> Self {
        Self {
            records: Vec::new(),
            diagnostic: Some(diagnostic),
            degraded: false,
        }
    }

    /// The records, empty on failure. This is the default lenient read.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the outcome, yielding the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// The absorbed error, if the read failed or was downgraded.
    pub fn diagnostic(&self) -> Option<&StoreError> {
        self.diagnostic.as_ref()
    }

    /// Whether the sorted path fell back to an unsorted fetch.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Whether the read completed without any absorbed error.
    pub fn is_clean(&self) -> bool {
        self.diagnostic.is_none()
    }
}

/// Outcome of a best-effort write operation (insert / update / remove).
#[derive(Debug, Default)]
pub struct WriteOutcome {
    applied: u64,
    diagnostic: Option<StoreError>,
}

impl WriteOutcome {
    pub fn new(applied: u64) -> Self {
        Self {
            applied,
            diagnostic: None,
        }
    }

    pub fn with_diagnostic(applied: u64, diagnostic: StoreError) -> Self {
        Self {
            applied,
            diagnostic: Some(diagnostic),
        }
    }

    /// How many documents the write touched (inserted, replaced, or
    /// removed).
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// The first absorbed error, if any part of the write failed.
    pub fn diagnostic(&self) -> Option<&StoreError> {
        self.diagnostic.as_ref()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostic.is_none()
    }
}

/// Outcome of a count operation.
///
/// A failed count reports zero, indistinguishable from a true zero by
/// the lenient read; the diagnostic disambiguates.
#[derive(Debug, Default)]
pub struct CountOutcome {
    count: u64,
    diagnostic: Option<StoreError>,
}

impl CountOutcome {
    pub fn new(count: u64) -> Self {
        Self {
            count,
            diagnostic: None,
        }
    }

    pub fn failed(diagnostic: StoreError) -> Self {
        Self {
            count: 0,
            diagnostic: Some(diagnostic),
        }
    }

    /// The count, zero on failure.
    pub fn get(&self) -> u64 {
        self.count
    }

    pub fn diagnostic(&self) -> Option<&StoreError> {
        self.diagnostic.as_ref()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostic.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_query_reads_empty() {
        let outcome = QueryOutcome::failed(StoreError::Query("boom".into()));
        assert!(outcome.records().is_empty());
        assert!(!outcome.is_clean());
        assert!(!outcome.is_degraded());
    }

    #[test]
    fn test_degraded_query_keeps_records() {
        let records = vec![Record::new("m", "t")];
        let outcome = QueryOutcome::degraded(records, StoreError::UnsupportedSort("k".into()));
        assert_eq!(outcome.records().len(), 1);
        assert!(outcome.is_degraded());
        assert!(outcome.diagnostic().is_some());
    }

    #[test]
    fn test_failed_count_is_zero() {
        let outcome = CountOutcome::failed(StoreError::Query("boom".into()));
        assert_eq!(outcome.get(), 0);
        assert!(!outcome.is_clean());
    }

    #[test]
    fn test_clean_write_has_no_diagnostic() {
        let outcome = WriteOutcome::new(3);
        assert_eq!(outcome.applied(), 3);
        assert!(outcome.is_clean());
    }
}
