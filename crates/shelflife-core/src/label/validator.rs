//! Canonicalization of item records.
//!
//! Interpreter output, manual edits and imported backups all pass through
//! [`ItemValidator`], so storage only ever sees canonical [`GroceryItem`]s.
//! An empty name is the only hard rejection; every other defect is repaired.

use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::models::item::{GroceryItem, RawItem};

use super::rules::{parse_date, shelf_life_expiry};

/// Maximum item name length, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Validates and canonicalizes raw item records.
pub struct ItemValidator {
    today: NaiveDate,
    default_shelf_days: i64,
}

impl ItemValidator {
    /// Create a validator stamping items with `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            default_shelf_days: 7,
        }
    }

    /// Set the shelf life substituted for missing or invalid expiry dates.
    pub fn with_default_shelf_days(mut self, days: i64) -> Self {
        self.default_shelf_days = days;
        self
    }

    /// Validate a record, returning `None` if it is rejected.
    pub fn validate(&self, raw: &RawItem) -> Option<GroceryItem> {
        self.try_validate(raw).ok()
    }

    /// Validate a record, reporting why it was rejected.
    pub fn try_validate(&self, raw: &RawItem) -> Result<GroceryItem, ValidationError> {
        let name = raw
            .name
            .as_deref()
            .map(normalize_name)
            .filter(|name| !name.is_empty())
            .ok_or(ValidationError::EmptyName)?;

        let id = raw
            .id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let expiry_date = match raw.expiry_date.as_deref().and_then(parse_date) {
            Some(date) => date,
            None => {
                debug!(
                    "Substituting default expiry for {:?} (was {:?})",
                    name, raw.expiry_date
                );
                shelf_life_expiry(self.today, self.default_shelf_days)
            }
        };

        Ok(GroceryItem {
            id,
            name,
            expiry_date,
            added_date: self.today,
            confidence: normalize_confidence(raw.confidence.as_ref()),
        })
    }
}

fn normalize_name(name: &str) -> String {
    let truncated: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    truncated.trim_end().to_string()
}

fn normalize_confidence(value: Option<&Value>) -> f32 {
    value
        .and_then(Value::as_f64)
        .filter(|c| (0.0..=1.0).contains(c))
        .map(|c| c as f32)
        .unwrap_or(0.0)
}

/// Validate a record against today's local date.
pub fn validate_item(raw: &RawItem) -> Option<GroceryItem> {
    validate_item_on(raw, Local::now().date_naive())
}

/// Validate a record against a fixed processing date.
pub fn validate_item_on(raw: &RawItem, today: NaiveDate) -> Option<GroceryItem> {
    ItemValidator::new(today).validate(raw)
}

/// Validate a record against a fixed processing date, keeping the reason
/// for a rejection.
pub fn try_validate_item(raw: &RawItem, today: NaiveDate) -> Result<GroceryItem, ValidationError> {
    ItemValidator::new(today).try_validate(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_record() {
        let raw = RawItem::new("  Milk ", "12/25/2024")
            .with_id("item-1")
            .with_confidence(0.9);

        let item = validate_item_on(&raw, today()).unwrap();

        assert_eq!(
            item,
            GroceryItem {
                id: "item-1".to_string(),
                name: "Milk".to_string(),
                expiry_date: date(2024, 12, 25),
                added_date: today(),
                confidence: 0.9,
            }
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            try_validate_item(&RawItem::new("   ", "2024-12-25"), today()),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(validate_item_on(&RawItem::default(), today()), None);
    }

    #[test]
    fn test_name_truncated() {
        let long = format!("{}  tail", "a".repeat(48));
        let item = validate_item_on(&RawItem::new(long, "2024-12-25"), today()).unwrap();

        assert_eq!(item.name, "a".repeat(48));
        assert_eq!(item.name.chars().count(), 48);

        let exact = "é".repeat(60);
        let item = validate_item_on(&RawItem::new(exact, "2024-12-25"), today()).unwrap();
        assert_eq!(item.name.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_invalid_expiry_repaired() {
        let item = validate_item_on(&RawItem::new("Eggs", "someday"), today()).unwrap();
        assert_eq!(item.expiry_date, date(2024, 12, 8));

        let missing = RawItem {
            name: Some("Eggs".to_string()),
            ..Default::default()
        };
        let item = validate_item_on(&missing, today()).unwrap();
        assert_eq!(item.expiry_date, date(2024, 12, 8));
    }

    #[test]
    fn test_oversized_shelf_life_is_capped() {
        use crate::models::config::MAX_SHELF_DAYS;

        let validator = ItemValidator::new(today()).with_default_shelf_days(200_000_000);
        let item = validator.validate(&RawItem::new("Eggs", "soon")).unwrap();

        assert_eq!(item.expiry_date, today() + chrono::Days::new(MAX_SHELF_DAYS as u64));

        let item = ItemValidator::new(NaiveDate::MAX)
            .validate(&RawItem::new("Eggs", "soon"))
            .unwrap();
        assert_eq!(item.expiry_date, NaiveDate::MAX);
    }

    #[test]
    fn test_added_date_overridden() {
        let mut raw = RawItem::new("Eggs", "2024-12-25");
        raw.added_date = Some("2020-01-01".to_string());

        let item = validate_item_on(&raw, today()).unwrap();
        assert_eq!(item.added_date, today());
    }

    #[test]
    fn test_confidence_defaults() {
        let mut raw = RawItem::new("Eggs", "2024-12-25");

        raw.confidence = Some(Value::from(1.5));
        assert_eq!(validate_item_on(&raw, today()).unwrap().confidence, 0.0);

        raw.confidence = Some(Value::from(-0.1));
        assert_eq!(validate_item_on(&raw, today()).unwrap().confidence, 0.0);

        raw.confidence = Some(Value::from("0.7"));
        assert_eq!(validate_item_on(&raw, today()).unwrap().confidence, 0.0);

        raw.confidence = Some(Value::from(1));
        assert_eq!(validate_item_on(&raw, today()).unwrap().confidence, 1.0);

        raw.confidence = None;
        assert_eq!(validate_item_on(&raw, today()).unwrap().confidence, 0.0);
    }

    #[test]
    fn test_blank_id_replaced() {
        let raw = RawItem::new("Eggs", "2024-12-25").with_id("  ");
        let item = validate_item_on(&raw, today()).unwrap();

        assert!(Uuid::parse_str(&item.id).is_ok());
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let raw = RawItem::new("Eggs", "2024-12-25");
        let a = validate_item_on(&raw, today()).unwrap();
        let b = validate_item_on(&raw, today()).unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_idempotent() {
        let raw = RawItem::new(format!("  {}  x", "Cheddar ".repeat(8)), "Dec 25, 2024")
            .with_confidence(0.35);
        let first = validate_item_on(&raw, today()).unwrap();
        let second = validate_item_on(&RawItem::from(&first), today()).unwrap();

        assert_eq!(second, first);
    }

    #[test]
    fn test_json_round_trip_is_fixed_point() {
        let raw = RawItem::new("Yogurt", "2024-12-25").with_confidence(0.8);
        let first = validate_item_on(&raw, today()).unwrap();

        let exported = serde_json::to_string(&first).unwrap();
        let imported: RawItem = serde_json::from_str(&exported).unwrap();
        let second = validate_item_on(&imported, today()).unwrap();

        assert_eq!(second, first);
    }
}
