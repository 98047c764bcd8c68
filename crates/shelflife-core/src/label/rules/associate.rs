//! Pairing of item names with expiry dates.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::item::{DateCandidate, NameCandidate};

use super::dates::shelf_life_expiry;
use super::scoring;

/// An associated name/date pair, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub expiry_date: NaiveDate,
    pub confidence: f32,
}

/// Pairs name candidates with date candidates.
pub struct Associator {
    today: NaiveDate,
    default_shelf_days: i64,
    max_generic_items: usize,
}

impl Associator {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            default_shelf_days: 7,
            max_generic_items: 3,
        }
    }

    /// Set the shelf life assumed for names without a date.
    pub fn with_default_shelf_days(mut self, days: i64) -> Self {
        self.default_shelf_days = days;
        self
    }

    /// Set how many generic items orphan dates may produce.
    pub fn with_max_generic_items(mut self, count: usize) -> Self {
        self.max_generic_items = count;
        self
    }

    /// Pair names with dates, sorted by expiry date.
    ///
    /// Names are first matched to dates whose context mentions them, then
    /// leftovers are paired by position. Names left over after that get the
    /// default shelf life; dates left over only become items when no name
    /// was found at all.
    pub fn associate(&self, names: &[NameCandidate], dates: &[DateCandidate]) -> Vec<ItemDraft> {
        let ranked = self.rank_dates(dates);
        let mut used = vec![false; ranked.len()];
        let mut drafts = Vec::new();
        let mut unmatched = Vec::new();

        for name in names {
            let found = ranked
                .iter()
                .enumerate()
                .find(|(i, (_, candidate))| !used[*i] && mentions(&candidate.context_window, &name.name));

            match found {
                Some((i, (date, candidate))) => {
                    used[i] = true;
                    drafts.push(ItemDraft {
                        name: name.name.clone(),
                        expiry_date: *date,
                        confidence: scoring::anchored(name.confidence, candidate.is_expiry_likely),
                    });
                }
                None => unmatched.push(name),
            }
        }

        let anchored_count = drafts.len();

        let leftover_dates: Vec<NaiveDate> = ranked
            .iter()
            .zip(&used)
            .filter(|(_, is_used)| !**is_used)
            .map(|((date, _), _)| *date)
            .collect();
        let mut leftover_dates = leftover_dates.into_iter();

        for name in unmatched {
            match leftover_dates.next() {
                Some(date) => drafts.push(ItemDraft {
                    name: name.name.clone(),
                    expiry_date: date,
                    confidence: scoring::positional(name.confidence),
                }),
                None => drafts.push(ItemDraft {
                    name: name.name.clone(),
                    expiry_date: self.default_expiry(),
                    confidence: scoring::undated(name.confidence),
                }),
            }
        }

        if drafts.is_empty() {
            drafts = ranked
                .iter()
                .zip(&used)
                .filter(|(_, is_used)| !**is_used)
                .take(self.max_generic_items)
                .enumerate()
                .map(|(n, ((date, _), _))| ItemDraft {
                    name: format!("Item {}", n + 1),
                    expiry_date: *date,
                    confidence: scoring::GENERIC_ITEM,
                })
                .collect();
        }

        debug!(
            "Associated {} items ({} anchored) from {} names and {} dates",
            drafts.len(),
            anchored_count,
            names.len(),
            ranked.len()
        );

        drafts.sort_by_key(|d| d.expiry_date);
        drafts
    }

    /// Parsed dates, expiry-flagged first, then closest to today.
    fn rank_dates<'a>(&self, dates: &'a [DateCandidate]) -> Vec<(NaiveDate, &'a DateCandidate)> {
        let mut ranked: Vec<(NaiveDate, &DateCandidate)> = dates
            .iter()
            .filter_map(|c| c.parsed_date.map(|date| (date, c)))
            .collect();

        ranked.sort_by(|(a_date, a), (b_date, b)| {
            b.is_expiry_likely
                .cmp(&a.is_expiry_likely)
                .then_with(|| self.distance(*a_date).cmp(&self.distance(*b_date)))
        });

        ranked
    }

    fn distance(&self, date: NaiveDate) -> i64 {
        (date - self.today).num_days().abs()
    }

    fn default_expiry(&self) -> NaiveDate {
        shelf_life_expiry(self.today, self.default_shelf_days)
    }
}

/// Whether a context window mentions a name, allowing for truncation or
/// plurals by also accepting the first four characters.
fn mentions(context: &str, name: &str) -> bool {
    let context = context.to_lowercase();
    let name = name.to_lowercase();
    let prefix: String = name.chars().take(4).collect();

    context.contains(&name) || context.contains(&prefix)
}
