//! Rule-based stages of the label pipeline.

pub mod associate;
pub mod dates;
pub mod keywords;
pub mod names;
pub mod patterns;
pub mod scoring;

pub use associate::{Associator, ItemDraft};
pub use dates::{parse_date, resolve_candidates, scan_dates, shelf_life_expiry, DateScanner};
pub use keywords::is_expiry_context;
pub use names::{extract_names, NameExtractor};
