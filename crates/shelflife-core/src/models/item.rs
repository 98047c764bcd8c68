//! Grocery item models and the intermediate candidates of the label pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A validated grocery item, the only record that leaves the interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    /// Opaque unique token.
    pub id: String,

    /// Item name, non-empty and at most 50 characters.
    pub name: String,

    /// Expiry date, serialized as `YYYY-MM-DD`.
    pub expiry_date: NaiveDate,

    /// Processing date, serialized as `YYYY-MM-DD`.
    pub added_date: NaiveDate,

    /// Heuristic extraction confidence (0.0 - 1.0).
    pub confidence: f32,
}

/// Expiry state of an item relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// The expiry date is in the past.
    Expired,
    /// The item expires within the configured window.
    ExpiringSoon,
    /// Anything later.
    Fresh,
}

impl ExpiryStatus {
    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::ExpiringSoon => "expiring soon",
            Self::Fresh => "fresh",
        }
    }
}

impl GroceryItem {
    /// Days from `today` until the item expires (negative once expired).
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    /// Compute the expiry status at read time.
    pub fn status(&self, today: NaiveDate, soon_days: i64) -> ExpiryStatus {
        let days = self.days_until_expiry(today);
        if days < 0 {
            ExpiryStatus::Expired
        } else if days <= soon_days {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Fresh
        }
    }
}

/// An unvalidated item record, as produced by manual edits or imported files.
///
/// Every field is optional; `confidence` keeps whatever JSON value was supplied
/// so that non-numeric imports can be repaired instead of rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<serde_json::Value>,
}

impl RawItem {
    /// Create a raw item with a name and expiry text.
    pub fn new(name: impl Into<String>, expiry_date: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            expiry_date: Some(expiry_date.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(serde_json::Value::from(confidence as f64));
        self
    }
}

impl From<&GroceryItem> for RawItem {
    fn from(item: &GroceryItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: Some(item.name.clone()),
            expiry_date: Some(item.expiry_date.format("%Y-%m-%d").to_string()),
            added_date: Some(item.added_date.format("%Y-%m-%d").to_string()),
            confidence: Some(serde_json::Value::from(item.confidence as f64)),
        }
    }
}

/// The textual shape a date candidate was recognized under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateShape {
    /// `MM/DD/YYYY`, `MM-DD-YY` and friends.
    NumericMonthFirst,
    /// `YYYY-MM-DD`.
    IsoYearFirst,
    /// `December 25, 2024`.
    MonthNameFirst,
    /// `25 December 2024`.
    DayFirstMonthName,
}

/// A date-shaped substring found in label text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateCandidate {
    /// Matched text.
    pub raw_text: String,
    /// Trimmed text surrounding (and including) the match.
    pub context_window: String,
    /// Byte offset of the match in the source text.
    pub position: usize,
    /// Shape the candidate was scanned under.
    pub shape: DateShape,
    /// Resolved calendar date, if any format matched.
    pub parsed_date: Option<NaiveDate>,
    /// Whether the context window carries expiry vocabulary.
    pub is_expiry_likely: bool,
}

/// Where an item name candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    /// Vocabulary term found anywhere in the text.
    WholeText,
    /// Vocabulary term found next to a date.
    DateContext,
    /// First token of a line.
    LineLead,
}

/// A proposed item name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameCandidate {
    /// Capitalized name.
    pub name: String,
    /// Base confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Extraction tier.
    pub source: NameSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(expiry: NaiveDate) -> GroceryItem {
        GroceryItem {
            id: "a".to_string(),
            name: "Milk".to_string(),
            expiry_date: expiry,
            added_date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            confidence: 0.8,
        }
    }

    #[test]
    fn test_status() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();

        let expired = item(NaiveDate::from_ymd_opt(2024, 12, 9).unwrap());
        assert_eq!(expired.status(today, 3), ExpiryStatus::Expired);

        let today_item = item(today);
        assert_eq!(today_item.status(today, 3), ExpiryStatus::ExpiringSoon);

        let soon = item(NaiveDate::from_ymd_opt(2024, 12, 13).unwrap());
        assert_eq!(soon.status(today, 3), ExpiryStatus::ExpiringSoon);

        let fresh = item(NaiveDate::from_ymd_opt(2024, 12, 14).unwrap());
        assert_eq!(fresh.status(today, 3), ExpiryStatus::Fresh);
        assert_eq!(fresh.days_until_expiry(today), 4);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(item(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap())).unwrap();

        assert_eq!(json["expiryDate"], "2024-12-25");
        assert_eq!(json["addedDate"], "2024-12-01");
        assert_eq!(json["name"], "Milk");
    }

    #[test]
    fn test_raw_item_accepts_loose_fields() {
        let raw: RawItem =
            serde_json::from_str(r#"{"name": "Eggs", "confidence": "high"}"#).unwrap();

        assert_eq!(raw.name.as_deref(), Some("Eggs"));
        assert_eq!(raw.expiry_date, None);
        assert_eq!(raw.confidence, Some(serde_json::Value::from("high")));
    }
}
