//! Import and export of item backups.
//!
//! Backups are JSON arrays of item records. Imported entries go through the
//! same validator as interpreter output.

use tracing::{info, warn};

use crate::error::{Result, ValidationError};
use crate::label::ItemValidator;
use crate::models::item::{GroceryItem, RawItem};

/// Outcome of importing a backup.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Canonical items, in file order.
    pub items: Vec<GroceryItem>,
    /// Zero-based index and reason for each rejected entry.
    pub rejected: Vec<(usize, ValidationError)>,
}

/// Parse a JSON backup and validate every entry.
pub fn import_json(json: &str, validator: &ItemValidator) -> Result<ImportReport> {
    let raw_items: Vec<RawItem> = serde_json::from_str(json)?;

    let mut report = ImportReport::default();
    for (index, raw) in raw_items.iter().enumerate() {
        match validator.try_validate(raw) {
            Ok(item) => report.items.push(item),
            Err(e) => {
                warn!("Rejected backup entry {}: {}", index, e);
                report.rejected.push((index, e));
            }
        }
    }

    info!(
        "Imported {} items, rejected {}",
        report.items.len(),
        report.rejected.len()
    );

    Ok(report)
}

/// Serialize items as a pretty-printed JSON backup.
pub fn export_json(items: &[GroceryItem]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShelfError;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn validator() -> ItemValidator {
        ItemValidator::new(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap())
    }

    #[test]
    fn test_import_mixed_entries() {
        let json = r#"[
            {"id": "a", "name": "Milk", "expiryDate": "2024-12-25", "confidence": 0.9},
            {"name": "   "},
            {"name": "Eggs", "expiryDate": "soon", "confidence": "high"}
        ]"#;

        let report = import_json(json, &validator()).unwrap();

        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].id, "a");
        assert_eq!(report.items[1].name, "Eggs");
        assert_eq!(report.items[1].confidence, 0.0);
        assert_eq!(report.rejected, vec![(1, ValidationError::EmptyName)]);
    }

    #[test]
    fn test_round_trip_is_fixed_point() {
        let json = r#"[{"name": " Butter ", "expiryDate": "Jan 3, 2025", "confidence": 0.55}]"#;
        let first = import_json(json, &validator()).unwrap();

        let exported = export_json(&first.items).unwrap();
        let second = import_json(&exported, &validator()).unwrap();

        assert_eq!(second.items, first.items);
        assert_eq!(export_json(&second.items).unwrap(), exported);
    }

    #[test]
    fn test_import_with_huge_shelf_life() {
        let validator = validator().with_default_shelf_days(200_000_000);
        let report = import_json(r#"[{"name": "Eggs", "expiryDate": "soon"}]"#, &validator).unwrap();

        assert_eq!(report.items.len(), 1);
        assert!(report.items[0].expiry_date > report.items[0].added_date);
    }

    #[test]
    fn test_malformed_backup() {
        let err = import_json("{not json", &validator()).unwrap_err();

        assert!(matches!(err, ShelfError::Json(_)));
    }
}
