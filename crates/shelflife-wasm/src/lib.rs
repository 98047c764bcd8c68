//! WASM bindings for grocery label interpretation.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use shelflife_core::models::config::{InterpreterConfig, ShelfConfig};
use shelflife_core::{
    validate_item as validate_raw_item, GroceryItem, LabelInterpreter, LabelParser, RawItem,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Interpret recognized label text into grocery items.
///
/// Returns an array of items sorted by expiry date. Unusable text yields an
/// empty array rather than an error.
#[wasm_bindgen]
pub fn interpret_label_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&LabelInterpreter::new().interpret(text))
}

/// Canonicalize an item record, returning `null` when it is rejected.
#[wasm_bindgen]
pub fn validate_item(raw: JsValue) -> Result<JsValue, JsValue> {
    let raw: RawItem = serde_wasm_bindgen::from_value(raw)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    match validate_raw_item(&raw) {
        Some(item) => to_js(&item),
        None => Ok(JsValue::NULL),
    }
}

/// Label interpreter class for browser use.
#[wasm_bindgen(js_name = LabelInterpreter)]
pub struct JsLabelInterpreter {
    interpreter: LabelInterpreter,
}

#[wasm_bindgen(js_class = LabelInterpreter)]
impl JsLabelInterpreter {
    /// Create an interpreter with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            interpreter: LabelInterpreter::new(),
        }
    }

    /// Set the shelf life assumed when no expiry date is found.
    #[wasm_bindgen]
    pub fn set_default_shelf_days(&mut self, days: i32) -> Result<(), JsValue> {
        let config = InterpreterConfig {
            default_shelf_days: i64::from(days),
            ..self.interpreter.config().clone()
        };
        checked_config(config.clone()).map_err(|e| JsValue::from_str(&e))?;
        self.interpreter = self.interpreter.clone().with_config(config);
        Ok(())
    }

    /// Pin the processing date (YYYY-MM-DD) instead of using the local date.
    #[wasm_bindgen]
    pub fn set_today(&mut self, date: &str) -> Result<(), JsValue> {
        let today = parse_iso_date(date).ok_or_else(|| {
            JsValue::from_str(&format!("invalid date: {}", date))
        })?;
        self.interpreter = self.interpreter.clone().with_today(today);
        Ok(())
    }

    /// Interpret label text into items.
    #[wasm_bindgen]
    pub fn interpret(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.items(text))
    }

    /// Interpret label text, including candidates, warnings and timing.
    #[wasm_bindgen]
    pub fn interpret_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self
            .interpreter
            .parse(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        to_js(&result)
    }
}

impl JsLabelInterpreter {
    fn items(&self, text: &str) -> Vec<GroceryItem> {
        self.interpreter.interpret(text)
    }
}

impl Default for JsLabelInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_config(interpreter: InterpreterConfig) -> Result<(), String> {
    ShelfConfig {
        interpreter,
        ..Default::default()
    }
    .validate()
    .map_err(|e| e.to_string())
}

fn parse_iso_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
