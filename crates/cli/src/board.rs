//! Plain-text price-list board.

use std::fmt::Write;

use pricebook_core::Timestamp;
use pricebook_pricing::{
    DEFAULT_DISPLAY_ORDER, Locale, PriceListCard, PriceListRecord, group_by_status,
};

/// Totals, per-status counts, then one section per bucket in display order.
/// Empty buckets are skipped unless `show_empty` is set.
pub fn render(records: &[PriceListRecord], now: Timestamp, locale: Locale, show_empty: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", locale.heading());

    if records.is_empty() {
        let _ = writeln!(out, "{}", locale.empty_state());
        return out;
    }

    let groups = group_by_status(records, now);
    let counts = groups.counts();
    let _ = writeln!(out, "{}: {}", locale.total_label(), counts.total());
    let stats: Vec<String> = DEFAULT_DISPLAY_ORDER
        .iter()
        .map(|&s| format!("{}: {}", s.group_title(locale), counts.get(s)))
        .collect();
    let _ = writeln!(out, "{}", stats.join(" | "));

    for (status, bucket) in groups.iter_in(&DEFAULT_DISPLAY_ORDER) {
        if bucket.is_empty() && !show_empty {
            continue;
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "== {} ({}) ==", status.group_title(locale), bucket.len());
        for record in bucket {
            write_card(&mut out, &PriceListCard::with_status(record, status, locale), locale);
        }
    }
    out
}

fn write_card(out: &mut String, card: &PriceListCard, locale: Locale) {
    let badge = &card.presentation;
    let _ = writeln!(
        out,
        "- {} [{} {}: {}] {}",
        card.title,
        badge.icon.as_str(),
        badge.color.as_str(),
        badge.label,
        card.link
    );
    for row in &card.schedule {
        let _ = writeln!(out, "    {} {}", row.label, row.value);
    }
    let _ = writeln!(out, "    {}", card.description);
    let _ = writeln!(out, "    {} {}", locale.updated_label(), card.updated);
}

/// `id<TAB>status` per record, input order.
pub fn classify_lines(records: &[PriceListRecord], now: Timestamp) -> String {
    records
        .iter()
        .map(|r| format!("{}\t{}\n", r.id, r.display_status(now)))
        .collect()
}
