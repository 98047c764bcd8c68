//! Compiled patterns and fixed vocabulary tables for label interpretation.

use lazy_static::lazy_static;
use regex::Regex;

/// Month names and abbreviations accepted by the month-name date shapes.
const MONTH_NAMES: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

lazy_static! {
    // MM/DD/YYYY, MM-DD-YY
    pub static ref DATE_NUMERIC_MDY: Regex = Regex::new(
        r"\b(\d{1,2})[/\-](\d{1,2})[/\-](\d{4}|\d{2})\b"
    ).expect("numeric date pattern should be valid");

    // YYYY-MM-DD or YYYY/MM/DD
    pub static ref DATE_ISO_YMD: Regex = Regex::new(
        r"\b(\d{4})[/\-](\d{1,2})[/\-](\d{1,2})\b"
    ).expect("ISO date pattern should be valid");

    // December 25, 2024 / Dec. 25th 2024
    pub static ref DATE_MONTH_NAME_FIRST: Regex = Regex::new(&format!(
        r"(?i)\b(?:{MONTH_NAMES})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}\b"
    )).expect("month-first date pattern should be valid");

    // 25 December 2024 / 25th Dec, 2024
    pub static ref DATE_DAY_FIRST: Regex = Regex::new(&format!(
        r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTH_NAMES})\.?,?\s+\d{{4}}\b"
    )).expect("day-first date pattern should be valid");

    // Normalization helpers for the generic date fallback
    pub static ref ORDINAL_SUFFIX: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b"
    ).expect("ordinal pattern should be valid");

    pub static ref SEPT_ABBREVIATION: Regex = Regex::new(
        r"(?i)\bsept\b"
    ).expect("abbreviation pattern should be valid");

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).expect("whitespace pattern should be valid");
}

/// Explicit date formats, tried in order. Two-digit-year variants precede
/// their four-digit counterparts so `%Y` never swallows a short year.
pub const EXPLICIT_DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m-%d-%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%d %B, %Y",
];

/// Day-first numeric formats only reached through the generic fallback.
pub const DAY_FIRST_DATE_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d.%m.%y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
];

/// Phrases that mark a nearby date as an expiry date.
pub const EXPIRY_KEYWORDS: &[&str] = &[
    "exp",
    "expires",
    "expiry",
    "expiration",
    "best by",
    "best before",
    "use by",
    "sell by",
    "fresh until",
    "good until",
    "bb",
];

/// Common grocery items recognized by name.
pub const GROCERY_VOCABULARY: &[&str] = &[
    "milk",
    "bread",
    "eggs",
    "cheese",
    "yogurt",
    "butter",
    "cream",
    "chicken",
    "beef",
    "pork",
    "bacon",
    "fish",
    "salmon",
    "apple",
    "banana",
    "orange",
    "lettuce",
    "spinach",
    "tomato",
    "carrot",
    "potato",
    "onion",
    "juice",
    "tofu",
    "pasta",
];

/// Capitalize the first character and lowercase the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
