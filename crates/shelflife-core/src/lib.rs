//! Core library for grocery label interpretation.
//!
//! This crate provides:
//! - Date candidate scanning and parsing over recognized label text
//! - Expiry keyword classification and grocery item name extraction
//! - Item/date association with explicit scoring rules
//! - A single validation choke point for interpreted, edited, or imported items
//! - JSON backup import and export

pub mod backup;
pub mod error;
pub mod models;
pub mod label;

pub use backup::{export_json, import_json, ImportReport};
pub use error::{InterpretError, Result, ShelfError, ValidationError};
pub use models::config::{InterpreterConfig, OutputConfig, ShelfConfig};
pub use models::item::{
    DateCandidate, DateShape, ExpiryStatus, GroceryItem, NameCandidate, NameSource, RawItem,
};
pub use label::{InterpretResult, ItemValidator, LabelInterpreter, LabelParser};
pub use label::validator::{try_validate_item, validate_item, validate_item_on};
