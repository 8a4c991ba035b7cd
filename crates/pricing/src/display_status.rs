//! Price-list display status.
//!
//! The status shown to users is derived on every read from the record's flag,
//! its time window, and a caller-supplied `now`. It is never stored, so it can
//! never go stale.

use serde::{Deserialize, Serialize};

use pricebook_core::Timestamp;

use crate::price_list::{PriceListRecord, PriceListStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Scheduled,
    Expired,
    Active,
    Draft,
}

impl DisplayStatus {
    /// All statuses, in classification precedence order.
    pub const ALL: [DisplayStatus; 4] = [
        DisplayStatus::Scheduled,
        DisplayStatus::Expired,
        DisplayStatus::Active,
        DisplayStatus::Draft,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayStatus::Scheduled => "scheduled",
            DisplayStatus::Expired => "expired",
            DisplayStatus::Active => "active",
            DisplayStatus::Draft => "draft",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            DisplayStatus::Scheduled => 0,
            DisplayStatus::Expired => 1,
            DisplayStatus::Active => 2,
            DisplayStatus::Draft => 3,
        }
    }
}

impl core::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a price list at instant `now`.
///
/// First matching rule wins:
/// 1. starts in the future -> `Scheduled` (even when flagged active)
/// 2. ended before `now` -> `Expired`
/// 3. flagged active -> `Active`
/// 4. otherwise -> `Draft`
///
/// An inverted window (`starts_at > ends_at`) is not treated as an error; the
/// rule order alone decides.
pub fn classify(record: &PriceListRecord, now: Timestamp) -> DisplayStatus {
    classify_window(record.status, record.starts_at, record.ends_at, now)
}

/// [`classify`] over the raw inputs.
pub fn classify_window(
    status: PriceListStatus,
    starts_at: Option<Timestamp>,
    ends_at: Option<Timestamp>,
    now: Timestamp,
) -> DisplayStatus {
    if starts_at.is_some_and(|starts_at| starts_at > now) {
        DisplayStatus::Scheduled
    } else if ends_at.is_some_and(|ends_at| ends_at < now) {
        DisplayStatus::Expired
    } else if status == PriceListStatus::Active {
        DisplayStatus::Active
    } else {
        DisplayStatus::Draft
    }
}

impl PriceListRecord {
    /// Method form of [`classify`].
    pub fn display_status(&self, now: Timestamp) -> DisplayStatus {
        classify(self, now)
    }
}
