//! Id allocation for new records

use crate::config::IdAllocation;
use crate::error::{Error, Result};
use crate::types::HostRecord;

/// Derives the id of the next inserted record
///
/// With [`IdAllocation::LastRecord`] only the final record in storage order
/// is looked at. Deleting that record lets its id be issued again, and a
/// directory whose last record is not its largest id can yield a duplicate.
/// [`IdAllocation::Max`] scans all records instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdAllocator {
    strategy: IdAllocation,
}

impl IdAllocator {
    /// Create an allocator with the given strategy
    pub fn new(strategy: IdAllocation) -> Self {
        Self { strategy }
    }

    /// Id for a record appended to `records`
    ///
    /// Fails with `StorageUnavailable` when the base id is already
    /// `u64::MAX`; only a hand-edited document can get there.
    pub fn next(&self, records: &[HostRecord]) -> Result<u64> {
        let base = match self.strategy {
            IdAllocation::LastRecord => records.last().map(|record| record.id),
            IdAllocation::Max => records.iter().map(|record| record.id).max(),
        };
        match base {
            None => Ok(1),
            Some(id) => id
                .checked_add(1)
                .ok_or_else(|| Error::storage(format!("id space exhausted after id {}", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(ids: &[u64]) -> Vec<HostRecord> {
        ids.iter()
            .map(|id| HostRecord::new(*id, format!("h{}", id), "10.0.0.1"))
            .collect()
    }

    #[test]
    fn test_empty_starts_at_one() {
        assert_eq!(IdAllocator::new(IdAllocation::LastRecord).next(&[]).unwrap(), 1);
        assert_eq!(IdAllocator::new(IdAllocation::Max).next(&[]).unwrap(), 1);
    }

    #[test]
    fn test_last_record_uses_storage_order() {
        let allocator = IdAllocator::new(IdAllocation::LastRecord);
        assert_eq!(allocator.next(&records(&[1, 2, 3])).unwrap(), 4);
        // Not the maximum: only the trailing record counts
        assert_eq!(allocator.next(&records(&[5, 2])).unwrap(), 3);
    }

    #[test]
    fn test_max_scans_all_records() {
        let allocator = IdAllocator::new(IdAllocation::Max);
        assert_eq!(allocator.next(&records(&[5, 2])).unwrap(), 6);
        assert_eq!(allocator.next(&records(&[1, 2, 3])).unwrap(), 4);
    }

    #[test]
    fn test_exhausted_id_space_is_an_error() {
        let full = records(&[u64::MAX]);
        for strategy in [IdAllocation::LastRecord, IdAllocation::Max] {
            let err = IdAllocator::new(strategy).next(&full).unwrap_err();
            assert!(matches!(err, Error::StorageUnavailable(_)), "{:?}", err);
        }
    }
}
