//! Grocery item name extraction.

use tracing::debug;

use crate::models::item::{DateCandidate, NameCandidate, NameSource};

use super::patterns::{capitalize, GROCERY_VOCABULARY};
use super::scoring;

/// Extracts item name candidates from label text.
pub struct NameExtractor {
    min_fallback_len: usize,
}

impl NameExtractor {
    pub fn new() -> Self {
        Self { min_fallback_len: 3 }
    }

    /// Set the minimum length for line-leading fallback names.
    pub fn with_min_fallback_len(mut self, len: usize) -> Self {
        self.min_fallback_len = len;
        self
    }

    /// Propose item names, vocabulary matches first.
    ///
    /// Line-leading tokens are only used when no vocabulary term is found
    /// anywhere, so non-empty text rarely yields nothing.
    pub fn extract(&self, text: &str, dates: &[DateCandidate]) -> Vec<NameCandidate> {
        let mut results = whole_text_names(text);

        for name in context_names(dates) {
            if !results.iter().any(|r| r.name == name.name) {
                results.push(name);
            }
        }

        if results.is_empty() {
            results = self.line_lead_names(text);
            debug!("No vocabulary names, {} line-leading fallback names", results.len());
        }

        results
    }

    fn line_lead_names(&self, text: &str) -> Vec<NameCandidate> {
        text.lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(letters_only)
            .filter(|word| word.chars().count() >= self.min_fallback_len)
            .map(|word| NameCandidate {
                name: capitalize(&word),
                confidence: scoring::LINE_LEAD_NAME,
                source: NameSource::LineLead,
            })
            .collect()
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract name candidates with default settings.
pub fn extract_names(text: &str, dates: &[DateCandidate]) -> Vec<NameCandidate> {
    NameExtractor::new().extract(text, dates)
}

/// Vocabulary terms appearing inside any word of the text.
fn whole_text_names(text: &str) -> Vec<NameCandidate> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    GROCERY_VOCABULARY
        .iter()
        .filter(|term| words.iter().any(|word| word.contains(*term)))
        .map(|term| NameCandidate {
            name: capitalize(term),
            confidence: scoring::WHOLE_TEXT_NAME,
            source: NameSource::WholeText,
        })
        .collect()
}

/// Vocabulary terms appearing as a whole word next to a date.
fn context_names(dates: &[DateCandidate]) -> Vec<NameCandidate> {
    let mut results: Vec<NameCandidate> = Vec::new();

    for candidate in dates {
        for word in candidate.context_window.split_whitespace() {
            let cleaned = letters_only(word).to_lowercase();
            if !GROCERY_VOCABULARY.contains(&cleaned.as_str()) {
                continue;
            }

            let name = capitalize(&cleaned);
            if !results.iter().any(|r| r.name == name) {
                results.push(NameCandidate {
                    name,
                    confidence: scoring::CONTEXT_NAME,
                    source: NameSource::DateContext,
                });
            }
        }
    }

    results
}

fn letters_only(word: &str) -> String {
    word.chars().filter(|c| c.is_alphabetic()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::DateShape;
    use pretty_assertions::assert_eq;

    fn candidate(context: &str) -> DateCandidate {
        DateCandidate {
            raw_text: "12/25/2024".to_string(),
            context_window: context.to_string(),
            position: 0,
            shape: DateShape::NumericMonthFirst,
            parsed_date: None,
            is_expiry_likely: false,
        }
    }

    fn names(candidates: &[NameCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_whole_text_vocabulary() {
        let result = extract_names("MILK 2%\nWhole wheat bread", &[]);

        assert_eq!(names(&result), vec!["Milk", "Bread"]);
        assert!(result.iter().all(|c| c.confidence == scoring::WHOLE_TEXT_NAME));
    }

    #[test]
    fn test_whole_text_matches_inside_words() {
        let result = extract_names("Organic bananas", &[]);

        assert_eq!(names(&result), vec!["Banana"]);
    }

    #[test]
    fn test_context_names_are_added_once() {
        let dates = [candidate("cheese, 12/25/2024"), candidate("Cheese: 12/26/2024")];
        let result = extract_names("", &dates);

        assert_eq!(names(&result), vec!["Cheese"]);
        assert_eq!(result[0].confidence, scoring::CONTEXT_NAME);
        assert_eq!(result[0].source, NameSource::DateContext);
    }

    #[test]
    fn test_context_name_skipped_when_already_found() {
        let dates = [candidate("Milk exp 12/25/2024")];
        let result = extract_names("Milk exp 12/25/2024", &dates);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].source, NameSource::WholeText);
    }

    #[test]
    fn test_line_lead_fallback() {
        let result = extract_names("Kombucha 12/25/2024\n\n  Go 2024-12-20\n#Granola!", &[]);

        assert_eq!(names(&result), vec!["Kombucha", "Granola"]);
        assert!(result.iter().all(|c| c.source == NameSource::LineLead));
        assert!(result.iter().all(|c| c.confidence == scoring::LINE_LEAD_NAME));
    }

    #[test]
    fn test_no_names() {
        assert!(extract_names("2024-12-20\n2024-12-22", &[]).is_empty());
        assert!(extract_names("", &[]).is_empty());
    }

    #[test]
    fn test_min_fallback_len() {
        let extractor = NameExtractor::new().with_min_fallback_len(2);

        assert_eq!(names(&extractor.extract("Go 2024-12-20", &[])), vec!["Go"]);
    }
}
