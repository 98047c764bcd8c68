//! Configuration structures for the label interpreter.

use serde::{Deserialize, Serialize};

use crate::error::ShelfError;

/// Longest shelf life accepted for items without an expiry date.
pub const MAX_SHELF_DAYS: i64 = 36_500;

/// Main configuration for shelflife.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    /// Label interpreter configuration.
    pub interpreter: InterpreterConfig,

    /// Output and display configuration.
    pub output: OutputConfig,
}

/// Label interpreter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Characters captured on each side of a date match.
    pub context_radius: usize,

    /// Days added to the processing date when no expiry date is known.
    pub default_shelf_days: i64,

    /// Maximum number of generic items synthesized from orphan dates.
    pub max_generic_items: usize,

    /// Minimum length of a line-leading token used as a fallback name.
    pub min_fallback_name_len: usize,

    /// Largest accepted input, in bytes.
    pub max_input_bytes: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            context_radius: 20,
            default_shelf_days: 7,
            max_generic_items: 3,
            min_fallback_name_len: 3,
            max_input_bytes: 1024 * 1024,
        }
    }
}

/// Output and display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Items expiring within this many days are flagged as expiring soon.
    pub expiring_soon_days: i64,

    /// Show confidence scores in text output.
    pub show_confidence: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: 3,
            show_confidence: false,
        }
    }
}

impl ShelfConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ShelfError> {
        if self.interpreter.max_input_bytes == 0 {
            return Err(ShelfError::Config("interpreter.max_input_bytes must be positive".to_string()));
        }
        if !(0..=MAX_SHELF_DAYS).contains(&self.interpreter.default_shelf_days) {
            return Err(ShelfError::Config(format!(
                "interpreter.default_shelf_days must be between 0 and {}",
                MAX_SHELF_DAYS
            )));
        }
        if self.output.expiring_soon_days < 0 {
            return Err(ShelfError::Config(
                "output.expiring_soon_days must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
