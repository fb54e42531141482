//! Type inference classifier.
//!
//! Given the sampled values of one column, infers its semantic type and
//! a confidence score. Detectors run in fixed priority order (boolean,
//! percentage, currency, date, number, text) so that the more specific
//! types win over the generic "number" when both are plausible. Each
//! detector produces a match fraction over the sample; the first whose
//! fraction clears the acceptance bar wins, and its fraction becomes
//! the confidence. An ambiguous sample falls back to text with full
//! confidence rather than failing.

pub mod classify;
pub mod parse;

pub use classify::{ACCEPT_FRACTION, classify, classify_column};
pub use parse::{DATE_PATTERNS, parse_currency, parse_date, parse_number, parse_percentage};
