use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use pricebook_core::time::iso8601;
use pricebook_core::{Entity, PriceListId, Timestamp};

/// Fields requested from the record source for list views.
pub const PRICE_LIST_FIELDS: &str = "id,title,status,description,updated_at,starts_at,ends_at";

/// Explicit, authoritative price-list flag (independent of the time window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceListStatus {
    Active,
    Draft,
}

/// A price list as supplied by the host platform (read-only here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceListRecord {
    pub id: PriceListId,
    pub title: String,
    pub status: PriceListStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "iso8601")]
    pub updated_at: Timestamp,
    /// Not live before this instant.
    #[serde(default, with = "iso8601::option")]
    pub starts_at: Option<Timestamp>,
    /// Not live after this instant.
    #[serde(default, with = "iso8601::option")]
    pub ends_at: Option<Timestamp>,
}

impl PriceListRecord {
    pub fn new(
        id: PriceListId,
        title: impl Into<String>,
        status: PriceListStatus,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            status,
            description: None,
            updated_at,
            starts_at: None,
            ends_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn starting_at(mut self, starts_at: Timestamp) -> Self {
        self.starts_at = Some(starts_at);
        self
    }

    pub fn ending_at(mut self, ends_at: Timestamp) -> Self {
        self.ends_at = Some(ends_at);
        self
    }

    /// Description, treating blank text as absent.
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

impl Entity for PriceListRecord {
    type Id = PriceListId;

    const KIND: &'static str = "price_list";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Why a list response could not be read.
#[derive(Debug, Error)]
pub enum PriceListParseError {
    #[error("price lists are not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("expected an array of price lists or an object with a `price_lists` array, got {0}")]
    Shape(&'static str),

    #[error(
        "price list at index {index}{}{}: {source}",
        .id.as_ref().map(|id| format!(" ({id})")).unwrap_or_default(),
        .field.map(|field| format!(", field `{field}`")).unwrap_or_default()
    )]
    Record {
        index: usize,
        id: Option<String>,
        field: Option<&'static str>,
        source: serde_json::Error,
    },
}

/// Records that parsed, plus one error per record that did not.
#[derive(Debug, Default)]
pub struct ParsedPriceLists {
    pub records: Vec<PriceListRecord>,
    pub rejected: Vec<PriceListParseError>,
}

/// Parse a list response (`{"price_lists": [...]}`) or a bare JSON array.
///
/// The first bad record fails the whole call; the error names its index, id and field.
pub fn parse_price_lists(json: &str) -> Result<Vec<PriceListRecord>, PriceListParseError> {
    list_items(json)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item))
        .collect()
}

/// Like [`parse_price_lists`], but a bad record is set aside instead of failing the list.
///
/// Only an unreadable top level (bad JSON, wrong shape) is an error.
pub fn parse_price_lists_lossy(json: &str) -> Result<ParsedPriceLists, PriceListParseError> {
    let mut parsed = ParsedPriceLists::default();
    for (index, item) in list_items(json)?.into_iter().enumerate() {
        match parse_record(index, item) {
            Ok(record) => parsed.records.push(record),
            Err(err) => parsed.rejected.push(err),
        }
    }
    Ok(parsed)
}

fn list_items(json: &str) -> Result<Vec<Value>, PriceListParseError> {
    let value: Value = serde_json::from_str(json).map_err(PriceListParseError::Json)?;
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut page) => match page.remove("price_lists") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(PriceListParseError::Shape(json_kind(&other))),
            None => Err(PriceListParseError::Shape("an object without `price_lists`")),
        },
        other => Err(PriceListParseError::Shape(json_kind(&other))),
    }
}

fn parse_record(index: usize, item: Value) -> Result<PriceListRecord, PriceListParseError> {
    PriceListRecord::deserialize(&item).map_err(|source| PriceListParseError::Record {
        index,
        id: item.get("id").and_then(Value::as_str).map(str::to_owned),
        field: offending_field(&item),
        source,
    })
}

/// First present field whose value does not deserialize on its own.
fn offending_field(item: &Value) -> Option<&'static str> {
    let checks: [(&'static str, fn(&Value) -> bool); 6] = [
        ("id", |v| PriceListId::deserialize(v).is_ok()),
        ("title", |v| v.is_string()),
        ("status", |v| PriceListStatus::deserialize(v).is_ok()),
        ("updated_at", |v| iso8601::deserialize(v).is_ok()),
        ("starts_at", |v| iso8601::option::deserialize(v).is_ok()),
        ("ends_at", |v| iso8601::option::deserialize(v).is_ok()),
    ];
    checks
        .into_iter()
        .find(|(field, ok)| item.get(*field).is_some_and(|v| !ok(v)))
        .map(|(field, _)| field)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
