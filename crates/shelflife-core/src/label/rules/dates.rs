//! Date candidate scanning and parsing for label text.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use tracing::{debug, trace};

use crate::models::config::MAX_SHELF_DAYS;
use crate::models::item::{DateCandidate, DateShape};

use super::keywords::is_expiry_context;
use super::patterns::{
    DATE_DAY_FIRST, DATE_ISO_YMD, DATE_MONTH_NAME_FIRST, DATE_NUMERIC_MDY, DAY_FIRST_DATE_FORMATS,
    EXPLICIT_DATE_FORMATS, ORDINAL_SUFFIX, SEPT_ABBREVIATION, WHITESPACE_RUN,
};

/// Scans label text for date-shaped substrings.
pub struct DateScanner {
    context_radius: usize,
}

impl DateScanner {
    pub fn new(context_radius: usize) -> Self {
        Self { context_radius }
    }

    /// Find every date-shaped substring.
    ///
    /// Each shape runs independently over the whole text and the matches are
    /// pooled, so one physical date can be reported once per shape it fits.
    pub fn scan(&self, text: &str) -> Vec<DateCandidate> {
        let shapes: [(&Regex, DateShape); 4] = [
            (&DATE_NUMERIC_MDY, DateShape::NumericMonthFirst),
            (&DATE_ISO_YMD, DateShape::IsoYearFirst),
            (&DATE_MONTH_NAME_FIRST, DateShape::MonthNameFirst),
            (&DATE_DAY_FIRST, DateShape::DayFirstMonthName),
        ];

        let mut results = Vec::new();
        for (pattern, shape) in shapes {
            for m in pattern.find_iter(text) {
                trace!("Date candidate {:?} at {} ({:?})", m.as_str(), m.start(), shape);
                results.push(DateCandidate {
                    raw_text: m.as_str().to_string(),
                    context_window: context_window(text, m.start(), m.end(), self.context_radius),
                    position: m.start(),
                    shape,
                    parsed_date: None,
                    is_expiry_likely: false,
                });
            }
        }

        results
    }
}

impl Default for DateScanner {
    fn default() -> Self {
        Self::new(20)
    }
}

/// Scan text for date candidates with the given context radius.
pub fn scan_dates(text: &str, context_radius: usize) -> Vec<DateCandidate> {
    DateScanner::new(context_radius).scan(text)
}

/// Parse and classify candidates, dropping those no format resolves.
pub fn resolve_candidates(candidates: Vec<DateCandidate>) -> Vec<DateCandidate> {
    candidates
        .into_iter()
        .filter_map(|mut candidate| match parse_date(&candidate.raw_text) {
            Some(date) => {
                candidate.parsed_date = Some(date);
                candidate.is_expiry_likely = is_expiry_context(&candidate.context_window);
                Some(candidate)
            }
            None => {
                debug!("Dropping unparseable date candidate {:?}", candidate.raw_text);
                None
            }
        })
        .collect()
}

/// Resolve date text to a calendar date.
///
/// Explicit formats are tried in order and the first valid parse wins, so an
/// ambiguous `12/05/2024` always reads month-first. Only when none match does
/// the generic fallback run.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    parse_with_formats(text, EXPLICIT_DATE_FORMATS).or_else(|| parse_generic(text))
}

/// Expiry date `days` after `today`, used when a label gives none.
///
/// `days` is held to `0..=MAX_SHELF_DAYS`; a result past chrono's last
/// representable date falls back to `today`.
pub fn shelf_life_expiry(today: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days.clamp(0, MAX_SHELF_DAYS))
        .and_then(|delta| today.checked_add_signed(delta))
        .unwrap_or(today)
}

fn parse_with_formats(text: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Lenient parse for text the explicit formats reject.
fn parse_generic(text: &str) -> Option<NaiveDate> {
    let normalized = normalize_date_text(text);

    parse_with_formats(&normalized, EXPLICIT_DATE_FORMATS)
        .or_else(|| parse_with_formats(text, DAY_FIRST_DATE_FORMATS))
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn normalize_date_text(text: &str) -> String {
    let text = ORDINAL_SUFFIX.replace_all(text, "$1");
    let text = SEPT_ABBREVIATION.replace_all(&text, "Sep");
    let text = text.replace([',', '.'], " ");
    let text = WHITESPACE_RUN.replace_all(text.trim(), " ");
    text.into_owned()
}

/// Trimmed text spanning up to `radius` characters on each side of a match.
fn context_window(text: &str, start: usize, end: usize, radius: usize) -> String {
    let begin = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);

    let finish = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    text[begin..finish].trim().to_string()
}
