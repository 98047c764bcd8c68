//! Confidence scoring rules for interpreted items.
//!
//! Every confidence value the pipeline produces comes from one of these
//! rules. Scores are clamped to `[0, 1]` on the way out.

/// Vocabulary term found anywhere in the text.
pub const WHOLE_TEXT_NAME: f32 = 0.8;

/// Vocabulary term found as a whole word next to a date.
pub const CONTEXT_NAME: f32 = 0.9;

/// First token of a line, used when no vocabulary term matched.
pub const LINE_LEAD_NAME: f32 = 0.5;

/// Added when a name is anchored to a date flagged as an expiry date.
pub const EXPIRY_BONUS: f32 = 0.2;

/// Generic `Item N` records synthesized from orphan dates.
pub const GENERIC_ITEM: f32 = 0.3;

/// Name found in the context window of its date.
///
/// The raw sum can reach 1.1 (`CONTEXT_NAME + EXPIRY_BONUS`); it is capped
/// at 1.0.
pub fn anchored(name_confidence: f32, expiry_likely: bool) -> f32 {
    let bonus = if expiry_likely { EXPIRY_BONUS } else { 0.0 };
    clamp(name_confidence + bonus)
}

/// Name paired with a leftover date by position only.
pub fn positional(name_confidence: f32) -> f32 {
    clamp(name_confidence)
}

/// Name without any date, given the default shelf life.
pub fn undated(name_confidence: f32) -> f32 {
    clamp(name_confidence / 2.0)
}

/// Clamp a score into `[0, 1]`.
pub fn clamp(confidence: f32) -> f32 {
    confidence.clamp(0.0, 1.0)
}
