//! Presentation table for display statuses and price-list cards.
//!
//! Pure configuration: every surface that shows a price list reads labels,
//! colours and icons from here, so the badge and the group heading can never
//! disagree.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use pricebook_core::{DomainError, Timestamp};

use crate::display_status::{DisplayStatus, classify};
use crate::price_list::PriceListRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    pub fn format_date(self, ts: Timestamp) -> String {
        match self {
            Locale::En => ts.format("%-m/%-d/%Y").to_string(),
            Locale::Ru => ts.format("%d.%m.%Y").to_string(),
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Locale::En => "Price lists",
            Locale::Ru => "Управление прайс-листами",
        }
    }

    pub fn total_label(self) -> &'static str {
        match self {
            Locale::En => "Total",
            Locale::Ru => "Всего",
        }
    }

    pub fn empty_state(self) -> &'static str {
        match self {
            Locale::En => "No price lists found",
            Locale::Ru => "Прайс-листы не найдены",
        }
    }

    pub fn no_description(self) -> &'static str {
        match self {
            Locale::En => "No description",
            Locale::Ru => "Без описания",
        }
    }

    pub fn updated_label(self) -> &'static str {
        match self {
            Locale::En => "Updated:",
            Locale::Ru => "Обновлено:",
        }
    }

    pub fn starts_label(self) -> &'static str {
        match self {
            Locale::En => "Starts:",
            Locale::Ru => "Начало:",
        }
    }

    pub fn ends_label(self) -> &'static str {
        match self {
            Locale::En => "Ends:",
            Locale::Ru => "Окончание:",
        }
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    /// Accepts `en`, `ru` and region-qualified tags (`en-US`, `ru_RU`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        let language = tag.split(['-', '_']).next().unwrap_or_default();
        match language {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            _ => Err(DomainError::validation(format!("unsupported locale: {s:?}"))),
        }
    }
}

impl core::fmt::Display for Locale {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic colour tier of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTier {
    Warning,
    Danger,
    Success,
    Neutral,
}

/// Concrete badge colour in the admin UI palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Orange,
    Red,
    Green,
    Grey,
}

impl BadgeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeColor::Orange => "orange",
            BadgeColor::Red => "red",
            BadgeColor::Green => "green",
            BadgeColor::Grey => "grey",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Clock,
    XCircle,
    CheckCircle,
    PauseCircle,
}

impl Icon {
    pub fn as_str(self) -> &'static str {
        match self {
            Icon::Clock => "clock",
            Icon::XCircle => "x-circle",
            Icon::CheckCircle => "check-circle",
            Icon::PauseCircle => "pause-circle",
        }
    }
}

/// How a single status is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub label: &'static str,
    pub tier: ColorTier,
    pub color: BadgeColor,
    pub icon: Icon,
}

impl DisplayStatus {
    pub fn presentation(self, locale: Locale) -> Presentation {
        let (tier, color, icon) = match self {
            DisplayStatus::Scheduled => (ColorTier::Warning, BadgeColor::Orange, Icon::Clock),
            DisplayStatus::Expired => (ColorTier::Danger, BadgeColor::Red, Icon::XCircle),
            DisplayStatus::Active => (ColorTier::Success, BadgeColor::Green, Icon::CheckCircle),
            DisplayStatus::Draft => (ColorTier::Neutral, BadgeColor::Grey, Icon::PauseCircle),
        };
        Presentation {
            label: self.label(locale),
            tier,
            color,
            icon,
        }
    }

    /// Badge label (singular).
    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, DisplayStatus::Scheduled) => "Scheduled",
            (Locale::En, DisplayStatus::Expired) => "Expired",
            (Locale::En, DisplayStatus::Active) => "Active",
            (Locale::En, DisplayStatus::Draft) => "Draft",
            (Locale::Ru, DisplayStatus::Scheduled) => "Запланирован",
            (Locale::Ru, DisplayStatus::Expired) => "Истек",
            (Locale::Ru, DisplayStatus::Active) => "Активен",
            (Locale::Ru, DisplayStatus::Draft) => "Черновик",
        }
    }

    /// Group heading / stats card title (plural).
    pub fn group_title(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, DisplayStatus::Scheduled) => "Scheduled",
            (Locale::En, DisplayStatus::Expired) => "Expired",
            (Locale::En, DisplayStatus::Active) => "Active",
            (Locale::En, DisplayStatus::Draft) => "Drafts",
            (Locale::Ru, DisplayStatus::Scheduled) => "Запланированные",
            (Locale::Ru, DisplayStatus::Expired) => "Истекшие",
            (Locale::Ru, DisplayStatus::Active) => "Активные",
            (Locale::Ru, DisplayStatus::Draft) => "Черновики",
        }
    }
}

/// One labelled date line on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRow {
    pub label: &'static str,
    /// Formatted date, or `-` when the record has none.
    pub value: String,
}

/// Window dates a card shows for its status: start and end while scheduled,
/// end only once expired, nothing otherwise.
pub fn schedule_rows(record: &PriceListRecord, status: DisplayStatus, locale: Locale) -> Vec<DateRow> {
    let row = |label, ts: Option<Timestamp>| DateRow {
        label,
        value: ts.map_or_else(|| "-".to_string(), |ts| locale.format_date(ts)),
    };
    match status {
        DisplayStatus::Scheduled => vec![
            row(locale.starts_label(), record.starts_at),
            row(locale.ends_label(), record.ends_at),
        ],
        DisplayStatus::Expired => vec![row(locale.ends_label(), record.ends_at)],
        DisplayStatus::Active | DisplayStatus::Draft => Vec::new(),
    }
}

/// Everything a surface needs to render one price-list card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceListCard {
    pub id: String,
    pub title: String,
    pub link: String,
    pub status: DisplayStatus,
    pub presentation: Presentation,
    pub schedule: Vec<DateRow>,
    pub description: String,
    pub updated: String,
}

impl PriceListCard {
    pub fn build(record: &PriceListRecord, now: Timestamp, locale: Locale) -> Self {
        Self::with_status(record, classify(record, now), locale)
    }

    /// Build for an already-classified record (e.g. straight out of a bucket).
    pub fn with_status(record: &PriceListRecord, status: DisplayStatus, locale: Locale) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            link: format!("/price-lists/{}", record.id),
            status,
            presentation: status.presentation(locale),
            schedule: schedule_rows(record, status, locale),
            description: record
                .description()
                .unwrap_or(locale.no_description())
                .to_string(),
            updated: locale.format_date(record.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_list::PriceListStatus;
    use pricebook_core::{PriceListId, parse_timestamp};

    fn ts(s: &str) -> Timestamp {
        parse_timestamp(s).unwrap()
    }

    fn record(status: PriceListStatus) -> PriceListRecord {
        PriceListRecord::new(
            PriceListId::parse("plist_1").unwrap(),
            "Spring",
            status,
            ts("2024-03-05T10:00:00Z"),
        )
    }

    #[test]
    fn presentation_table_en() {
        let rows: Vec<(&str, ColorTier, BadgeColor, Icon)> = DisplayStatus::ALL
            .into_iter()
            .map(|s| {
                let p = s.presentation(Locale::En);
                (p.label, p.tier, p.color, p.icon)
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Scheduled", ColorTier::Warning, BadgeColor::Orange, Icon::Clock),
                ("Expired", ColorTier::Danger, BadgeColor::Red, Icon::XCircle),
                ("Active", ColorTier::Success, BadgeColor::Green, Icon::CheckCircle),
                ("Draft", ColorTier::Neutral, BadgeColor::Grey, Icon::PauseCircle),
            ]
        );
    }

    #[test]
    fn presentation_labels_ru() {
        assert_eq!(DisplayStatus::Scheduled.label(Locale::Ru), "Запланирован");
        assert_eq!(DisplayStatus::Expired.label(Locale::Ru), "Истек");
        assert_eq!(DisplayStatus::Active.label(Locale::Ru), "Активен");
        assert_eq!(DisplayStatus::Draft.label(Locale::Ru), "Черновик");
        assert_eq!(DisplayStatus::Draft.group_title(Locale::Ru), "Черновики");
        assert_eq!(DisplayStatus::Draft.group_title(Locale::En), "Drafts");
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("ru-RU".parse::<Locale>().unwrap(), Locale::Ru);
        assert_eq!(" EN_us ".parse::<Locale>().unwrap(), Locale::En);
        assert!(matches!("de".parse::<Locale>(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn dates_are_formatted_per_locale() {
        let t = ts("2024-03-05");
        assert_eq!(Locale::Ru.format_date(t), "05.03.2024");
        assert_eq!(Locale::En.format_date(t), "3/5/2024");
    }

    #[test]
    fn scheduled_card_shows_start_and_end() {
        let r = record(PriceListStatus::Draft).starting_at(ts("2099-01-01"));
        let rows = schedule_rows(&r, DisplayStatus::Scheduled, Locale::Ru);
        assert_eq!(
            rows,
            vec![
                DateRow { label: "Начало:", value: "01.01.2099".to_string() },
                DateRow { label: "Окончание:", value: "-".to_string() },
            ]
        );
    }

    #[test]
    fn expired_card_shows_end_only() {
        let r = record(PriceListStatus::Active).ending_at(ts("2020-01-01"));
        let rows = schedule_rows(&r, DisplayStatus::Expired, Locale::En);
        assert_eq!(rows, vec![DateRow { label: "Ends:", value: "1/1/2020".to_string() }]);
    }

    #[test]
    fn live_cards_show_no_window() {
        let r = record(PriceListStatus::Active)
            .starting_at(ts("2020-01-01"))
            .ending_at(ts("2099-01-01"));
        assert!(schedule_rows(&r, DisplayStatus::Active, Locale::En).is_empty());
        assert!(schedule_rows(&r, DisplayStatus::Draft, Locale::En).is_empty());
    }

    #[test]
    fn card_uses_classifier_and_fallbacks() {
        let r = record(PriceListStatus::Active);
        let card = PriceListCard::build(&r, ts("2024-04-01"), Locale::Ru);

        assert_eq!(card.status, DisplayStatus::Active);
        assert_eq!(card.presentation.label, "Активен");
        assert_eq!(card.description, "Без описания");
        assert_eq!(card.updated, "05.03.2024");
        assert_eq!(card.link, "/price-lists/plist_1");

        let described = r.with_description("Seasonal discounts");
        let card = PriceListCard::build(&described, ts("2024-04-01"), Locale::En);
        assert_eq!(card.description, "Seasonal discounts");
    }
}
