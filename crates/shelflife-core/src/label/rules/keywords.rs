//! Expiry keyword classification.

use super::patterns::EXPIRY_KEYWORDS;

/// Whether the text around a date contains expiry vocabulary.
///
/// This is a plain substring test, so `exp` also fires inside `express` or
/// `expense`; recall is preferred over precision here.
pub fn is_expiry_context(context: &str) -> bool {
    let lowered = context.to_lowercase();
    EXPIRY_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}
