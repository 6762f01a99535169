use serde::{Deserialize, Serialize};
use std::fmt;
use tally_core::{CandidateRecord, SourceRecord};

use crate::evaluate::{evaluate_amount, evaluate_date, evaluate_reference, FieldScore};

pub const AMOUNT_WEIGHT: f64 = 0.4;
pub const DATE_WEIGHT: f64 = 0.3;
pub const REFERENCE_WEIGHT: f64 = 0.3;

pub const EXACT_THRESHOLD: f64 = 0.95;
pub const PARTIAL_THRESHOLD: f64 = 0.70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Partial,
    None,
}

impl MatchType {
    /// The only place the classification boundaries live.
    pub fn classify(confidence: f64) -> Self {
        if confidence >= EXACT_THRESHOLD {
            MatchType::Exact
        } else if confidence >= PARTIAL_THRESHOLD {
            MatchType::Partial
        } else {
            MatchType::None
        }
    }

    pub fn status_label(self) -> &'static str {
        match self {
            MatchType::Exact => "Exact match",
            MatchType::Partial => "Partial match",
            MatchType::None => "No match",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Exact => write!(f, "exact"),
            MatchType::Partial => write!(f, "partial"),
            MatchType::None => write!(f, "none"),
        }
    }
}

/// Weighted confidence of three field scores and its classification.
pub fn aggregate(amount: f64, date: f64, reference: f64) -> (f64, MatchType) {
    let confidence = (AMOUNT_WEIGHT * amount + DATE_WEIGHT * date + REFERENCE_WEIGHT * reference)
        .clamp(0.0, 1.0);
    (confidence, MatchType::classify(confidence))
}

/// Every field score for one (source, candidate) pair plus the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    pub amount: FieldScore,
    pub date: FieldScore,
    pub reference: FieldScore,
    pub confidence: f64,
    pub match_type: MatchType,
}

pub fn score_pair(source: &SourceRecord, candidate: &CandidateRecord) -> PairScore {
    let amount = evaluate_amount(source, candidate);
    let date = evaluate_date(source, candidate);
    let reference = evaluate_reference(source, candidate);
    let (confidence, match_type) = aggregate(amount.score, date.score, reference.score);

    PairScore { amount, date, reference, confidence, match_type }
}
