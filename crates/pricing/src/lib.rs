//! Pricing domain module.
//!
//! Price-list status classification and grouping, the presentation table that
//! every rendering surface shares, and price-set creation rules. Everything
//! here is deterministic domain logic (no IO, no clock reads: callers pass `now`).

pub mod display_status;
pub mod grouping;
pub mod presentation;
pub mod price_list;
pub mod price_set;

pub use display_status::{DisplayStatus, classify, classify_window};
pub use grouping::{DEFAULT_DISPLAY_ORDER, StatusCounts, StatusGroups, group_by_status};
pub use presentation::{
    BadgeColor, ColorTier, DateRow, Icon, Locale, PriceListCard, Presentation, schedule_rows,
};
pub use price_list::{
    PRICE_LIST_FIELDS, ParsedPriceLists, PriceListParseError, PriceListRecord, PriceListStatus,
    parse_price_lists, parse_price_lists_lossy,
};
pub use price_set::{CreatePrice, CreatePriceSet, Price, PriceSet};
