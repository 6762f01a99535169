use serde::{Deserialize, Serialize};
use tally_core::{CandidateRecord, Money, SourceRecord};

use crate::error::MatchError;
use crate::score::{score_pair, MatchType, PairScore};

/// Outcome of reconciling one source record against the whole ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub source: SourceRecord,
    /// `None` when no candidate scored above zero.
    pub candidate: Option<CandidateRecord>,
    /// Position of `candidate` in the ledger slice.
    pub candidate_index: Option<usize>,
    pub confidence: f64,
    pub match_type: MatchType,
    pub status: String,
    pub details: String,
    /// Field-by-field scores of the selected pair.
    pub breakdown: Option<PairScore>,
}

/// Reconciles every source record against `candidates`, one result per
/// source record, in input order.
///
/// An empty ledger is a caller error; an empty source batch is not.
pub fn analyze_transactions(
    sources: &[SourceRecord],
    candidates: &[CandidateRecord],
) -> Result<Vec<MatchResult>, MatchError> {
    ensure_candidates(candidates)?;

    tracing::info!(
        sources = sources.len(),
        candidates = candidates.len(),
        "reconciling batch"
    );

    let results: Vec<MatchResult> = sources
        .iter()
        .map(|source| best_match(source, candidates))
        .collect();

    tracing::info!(results = results.len(), "batch reconciled");
    Ok(results)
}

/// Scores `source` against every candidate and keeps the best one.
///
/// Ties keep the earliest candidate: only a strictly higher confidence
/// replaces the current best.
pub fn find_best_match(
    source: &SourceRecord,
    candidates: &[CandidateRecord],
) -> Result<MatchResult, MatchError> {
    ensure_candidates(candidates)?;
    Ok(best_match(source, candidates))
}

fn ensure_candidates(candidates: &[CandidateRecord]) -> Result<(), MatchError> {
    if candidates.is_empty() {
        return Err(MatchError::InvalidInput(
            "candidate ledger must contain at least one record".to_string(),
        ));
    }
    Ok(())
}

fn best_match(source: &SourceRecord, candidates: &[CandidateRecord]) -> MatchResult {
    let mut best: Option<(usize, PairScore)> = None;
    let mut best_confidence = 0.0;

    for (idx, candidate) in candidates.iter().enumerate() {
        let pair = score_pair(source, candidate);
        if pair.confidence > best_confidence {
            best_confidence = pair.confidence;
            best = Some((idx, pair));
        }
    }

    let match_type = MatchType::classify(best_confidence);
    let candidate = best.as_ref().map(|(idx, _)| candidates[*idx].clone());
    let details = match_details(source, candidate.as_ref(), best_confidence);

    tracing::debug!(
        source = %source.id,
        candidate = ?best.as_ref().map(|(idx, _)| *idx),
        confidence = best_confidence,
        %match_type,
        "best match selected"
    );

    MatchResult {
        source: source.clone(),
        candidate,
        candidate_index: best.as_ref().map(|(idx, _)| *idx),
        confidence: best_confidence,
        match_type,
        status: match_type.status_label().to_string(),
        details,
        breakdown: best.map(|(_, pair)| pair),
    }
}

fn match_details(
    source: &SourceRecord,
    candidate: Option<&CandidateRecord>,
    confidence: f64,
) -> String {
    let Some(candidate) = candidate else {
        return "No matching ledger entry found".to_string();
    };

    let mut parts = vec![
        format!(
            "Source: {} - {} ({})",
            source.id,
            fmt_amount(source.amount),
            source.timestamp
        ),
        format!(
            "Ledger: {} - {} ({})",
            candidate.reference,
            fmt_amount(candidate.amount),
            candidate.date
        ),
        format!("Confidence: {}%", (confidence * 100.0).round()),
    ];

    if let Some(name) = &source.counterpart {
        parts.push(format!("Counterpart: {name}"));
    }

    parts.join(" | ")
}

fn fmt_amount(amount: Option<Money>) -> String {
    amount.map_or_else(|| "n/a".to_string(), |m| m.to_string())
}
