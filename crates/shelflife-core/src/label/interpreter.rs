//! Label interpreter running the full text-to-items pipeline.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::InterpretError;
use crate::models::config::InterpreterConfig;
use crate::models::item::{DateCandidate, GroceryItem, NameCandidate, RawItem};

use super::rules::{resolve_candidates, Associator, DateScanner, NameExtractor};
use super::validator::ItemValidator;
use super::{LabelParser, Result};

/// Result of interpreting one block of label text.
#[derive(Debug, Clone, Serialize)]
pub struct InterpretResult {
    /// Validated items, ascending by expiry date.
    pub items: Vec<GroceryItem>,
    /// Input text.
    pub raw_text: String,
    /// Parsed date candidates.
    pub date_candidates: Vec<DateCandidate>,
    /// Proposed item names.
    pub name_candidates: Vec<NameCandidate>,
    /// Processing date used for ranking and defaults.
    pub processed_on: NaiveDate,
    /// Interpretation warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Interprets recognized label text into grocery items.
///
/// Holds no per-call state; one instance can serve any number of calls,
/// including from several threads.
#[derive(Debug, Clone, Default)]
pub struct LabelInterpreter {
    config: InterpreterConfig,
    today: Option<NaiveDate>,
}

impl LabelInterpreter {
    /// Create an interpreter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given interpreter configuration.
    pub fn with_config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    /// Pin the processing date instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Processing date for the next call.
    pub fn processing_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Interpret label text into items.
    ///
    /// Never fails: any error is logged and yields an empty list, which
    /// callers should read as "nothing confidently extracted".
    pub fn interpret(&self, text: &str) -> Vec<GroceryItem> {
        match self.parse(text) {
            Ok(result) => result.items,
            Err(e) => {
                warn!("Label interpretation failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Interpret raw bytes from a recognition provider.
    pub fn interpret_bytes(&self, bytes: &[u8]) -> Vec<GroceryItem> {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.interpret(text),
            Err(e) => {
                warn!("Label interpretation failed: {}", InterpretError::InvalidEncoding(e.to_string()));
                Vec::new()
            }
        }
    }

    fn run_pipeline(&self, text: &str, today: NaiveDate) -> (Vec<DateCandidate>, Vec<NameCandidate>, Vec<GroceryItem>, Vec<String>) {
        let mut warnings = Vec::new();

        let scanned = DateScanner::new(self.config.context_radius).scan(text);
        let scanned_count = scanned.len();
        let dates = resolve_candidates(scanned);
        if dates.len() < scanned_count {
            warnings.push(format!(
                "{} date-shaped strings could not be parsed",
                scanned_count - dates.len()
            ));
        }
        debug!("{} of {} date candidates parsed", dates.len(), scanned_count);

        let names = NameExtractor::new()
            .with_min_fallback_len(self.config.min_fallback_name_len)
            .extract(text, &dates);
        debug!("{} name candidates", names.len());

        let drafts = Associator::new(today)
            .with_default_shelf_days(self.config.default_shelf_days)
            .with_max_generic_items(self.config.max_generic_items)
            .associate(&names, &dates);

        let validator = ItemValidator::new(today).with_default_shelf_days(self.config.default_shelf_days);
        let mut items = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let raw = RawItem::new(draft.name, draft.expiry_date.format("%Y-%m-%d").to_string())
                .with_confidence(draft.confidence);
            match validator.try_validate(&raw) {
                Ok(item) => items.push(item),
                Err(e) => warnings.push(format!("Dropped candidate {:?}: {}", raw.name, e)),
            }
        }

        if items.is_empty() {
            warnings.push("No items could be extracted".to_string());
        }

        (dates, names, items, warnings)
    }
}

impl LabelParser for LabelInterpreter {
    fn parse(&self, text: &str) -> Result<InterpretResult> {
        let start = Instant::now();

        if text.len() > self.config.max_input_bytes {
            return Err(InterpretError::InputTooLarge {
                len: text.len(),
                max: self.config.max_input_bytes,
            });
        }

        let today = self.processing_date();
        info!("Interpreting {} characters of label text", text.len());

        let (date_candidates, name_candidates, items, warnings) =
            panic::catch_unwind(AssertUnwindSafe(|| self.run_pipeline(text, today)))
                .map_err(|payload| InterpretError::Internal(panic_message(payload.as_ref())))?;

        info!("Extracted {} items", items.len());

        Ok(InterpretResult {
            items,
            raw_text: text.to_string(),
            date_candidates,
            name_candidates,
            processed_on: today,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
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

    fn interpreter() -> LabelInterpreter {
        LabelInterpreter::new().with_today(today())
    }

    #[test]
    fn test_single_labeled_item() {
        let items = interpreter().interpret("Milk exp 12/25/2024");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Milk");
        assert_eq!(items[0].expiry_date, date(2024, 12, 25));
        assert_eq!(items[0].added_date, today());
        assert!(items[0].confidence >= 0.8 + 0.2 - 1e-6);
        assert!(items[0].confidence <= 1.0);
    }

    #[test]
    fn test_dates_without_names_become_generic_items() {
        let items = interpreter().interpret("2024-12-20\n2024-12-22\n2024-12-25");

        let summary: Vec<(&str, NaiveDate)> =
            items.iter().map(|i| (i.name.as_str(), i.expiry_date)).collect();
        assert_eq!(
            summary,
            vec![
                ("Item 1", date(2024, 12, 20)),
                ("Item 2", date(2024, 12, 22)),
                ("Item 3", date(2024, 12, 25)),
            ]
        );
        assert!(items.iter().all(|i| (i.confidence - 0.3).abs() < 1e-6));
    }

    #[test]
    fn test_generic_item_numbering_follows_rank_not_date() {
        // Ranked by distance from the processing date: 12-25 is closest.
        let items = LabelInterpreter::new()
            .with_today(date(2025, 1, 1))
            .interpret("2024-12-20\n2024-12-22\n2024-12-25");

        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Item 3", "Item 2", "Item 1"]);
    }

    #[test]
    fn test_name_without_date_gets_default_expiry() {
        let items = interpreter().interpret("fresh spinach");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Spinach");
        assert_eq!(items[0].expiry_date, date(2024, 12, 8));
        assert!((items[0].confidence - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_line_lead_name_without_date() {
        let items = interpreter().interpret("Kombucha");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Kombucha");
        assert_eq!(items[0].confidence, 0.25);
    }

    #[test]
    fn test_nothing_to_extract() {
        assert!(interpreter().interpret("?? 42 !!\n-- 7").is_empty());
        assert!(interpreter().interpret("").is_empty());
    }

    #[test]
    fn test_receipt_with_several_items() {
        let text = "FRESH MART\nMilk 2% best by 12/10/2024\nBread use by Dec 5, 2024\nCheese 2024-12-30";
        let result = interpreter().parse(text).unwrap();

        let summary: Vec<(&str, NaiveDate)> =
            result.items.iter().map(|i| (i.name.as_str(), i.expiry_date)).collect();
        assert_eq!(
            summary,
            vec![
                ("Bread", date(2024, 12, 5)),
                ("Milk", date(2024, 12, 10)),
                ("Cheese", date(2024, 12, 30)),
            ]
        );
        assert_eq!(result.date_candidates.len(), 3);
        assert_eq!(result.processed_on, today());
    }

    #[test]
    fn test_confidence_is_bounded() {
        let text = "Milk exp 12/25/2024\nEggs 13/45/2024\nbanana\n2024-12-03";
        for item in interpreter().interpret(text) {
            assert!((0.0..=1.0).contains(&item.confidence), "{:?}", item);
        }
    }

    #[test]
    fn test_unparseable_dates_warn() {
        let result = interpreter().parse("Eggs 13/45/2024").unwrap();

        assert!(result.date_candidates.is_empty());
        assert!(result.warnings.iter().any(|w| w.contains("could not be parsed")));
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn test_input_too_large() {
        let config = InterpreterConfig {
            max_input_bytes: 8,
            ..Default::default()
        };
        let interpreter = interpreter().with_config(config);

        assert_eq!(
            interpreter.parse("Milk exp 12/25/2024").unwrap_err(),
            InterpretError::InputTooLarge { len: 19, max: 8 }
        );
        assert!(interpreter.interpret("Milk exp 12/25/2024").is_empty());
    }

    #[test]
    fn test_huge_shelf_life_still_yields_items() {
        let config = InterpreterConfig {
            default_shelf_days: 200_000_000,
            ..Default::default()
        };
        let items = interpreter().with_config(config).interpret("fresh spinach");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Spinach");
        assert!(items[0].expiry_date > today());
    }

    #[test]
    fn test_invalid_utf8_yields_nothing() {
        assert!(interpreter().interpret_bytes(&[0x4d, 0x69, 0xff, 0xfe]).is_empty());
        assert_eq!(interpreter().interpret_bytes(b"Milk exp 12/25/2024").len(), 1);
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let interpreter = interpreter();
        let first = interpreter.interpret("Milk exp 12/25/2024");
        let second = interpreter.interpret("Milk exp 12/25/2024");

        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].expiry_date, second[0].expiry_date);
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_shared_across_threads() {
        let interpreter = std::sync::Arc::new(interpreter());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let interpreter = interpreter.clone();
                std::thread::spawn(move || interpreter.interpret("Milk exp 12/25/2024").len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
    }
}
