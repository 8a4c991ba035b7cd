//! Status buckets for list views.

use serde::Serialize;

use pricebook_core::Timestamp;

use crate::display_status::{DisplayStatus, classify};
use crate::price_list::PriceListRecord;

/// Order list views render buckets in unless they choose otherwise.
pub const DEFAULT_DISPLAY_ORDER: [DisplayStatus; 4] = [
    DisplayStatus::Active,
    DisplayStatus::Scheduled,
    DisplayStatus::Draft,
    DisplayStatus::Expired,
];

/// Price lists partitioned by display status.
///
/// Every input record sits in exactly one bucket, and each bucket keeps input
/// order. Empty buckets are normal; whether to show them is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusGroups<'r> {
    buckets: [Vec<&'r PriceListRecord>; 4],
}

impl<'r> StatusGroups<'r> {
    pub fn get(&self, status: DisplayStatus) -> &[&'r PriceListRecord] {
        &self.buckets[status.index()]
    }

    /// Total number of records across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts {
            scheduled: self.get(DisplayStatus::Scheduled).len(),
            expired: self.get(DisplayStatus::Expired).len(),
            active: self.get(DisplayStatus::Active).len(),
            draft: self.get(DisplayStatus::Draft).len(),
        }
    }

    /// Buckets in the given order (empty ones included).
    pub fn iter_in<'g>(
        &'g self,
        order: &'g [DisplayStatus],
    ) -> impl Iterator<Item = (DisplayStatus, &'g [&'r PriceListRecord])> + 'g {
        order.iter().map(move |&status| (status, self.get(status)))
    }

    /// Buckets in the given order, skipping empty ones.
    pub fn non_empty_in<'g>(
        &'g self,
        order: &'g [DisplayStatus],
    ) -> impl Iterator<Item = (DisplayStatus, &'g [&'r PriceListRecord])> + 'g {
        self.iter_in(order).filter(|(_, records)| !records.is_empty())
    }

    fn push(&mut self, status: DisplayStatus, record: &'r PriceListRecord) {
        self.buckets[status.index()].push(record);
    }
}

/// Per-status counts (stats cards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    pub scheduled: usize,
    pub expired: usize,
    pub active: usize,
    pub draft: usize,
}

impl StatusCounts {
    pub fn get(&self, status: DisplayStatus) -> usize {
        match status {
            DisplayStatus::Scheduled => self.scheduled,
            DisplayStatus::Expired => self.expired,
            DisplayStatus::Active => self.active,
            DisplayStatus::Draft => self.draft,
        }
    }

    pub fn total(&self) -> usize {
        self.scheduled + self.expired + self.active + self.draft
    }
}

/// Classify every record at `now` and bucket it (stable partition).
pub fn group_by_status<'r, I>(records: I, now: Timestamp) -> StatusGroups<'r>
where
    I: IntoIterator<Item = &'r PriceListRecord>,
{
    let mut groups = StatusGroups::default();
    for record in records {
        groups.push(classify(record, now), record);
    }
    groups
}
