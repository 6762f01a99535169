//! Fuzzy reconciliation of externally reported transactions against a
//! reference ledger.
//!
//! Each source record is scored against every ledger candidate on amount,
//! date and reference; the best candidate is kept and classified as an
//! exact, partial or missing match.

pub mod engine;
pub mod error;
pub mod evaluate;
pub mod score;
pub mod similarity;
pub mod stats;

pub use engine::{analyze_transactions, find_best_match, MatchResult};
pub use error::MatchError;
pub use evaluate::{evaluate_amount, evaluate_date, evaluate_reference, FieldScore};
pub use score::{aggregate, score_pair, MatchType, PairScore};
pub use similarity::{extract_digit_run, similarity};
pub use stats::{amount_bands, summarize, AggregateStats, AmountBand};
