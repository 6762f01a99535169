//! Per-field scorers. Each compares one source record against one ledger
//! candidate and returns a score in `[0.0, 1.0]` with a short rationale.
//!
//! Bad data never fails here: an unparseable date, a missing amount or an
//! empty text field simply scores 0 for that field.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::{days_apart, parse_calendar_date, CandidateRecord, Money, SourceRecord};

use crate::similarity::{extract_digit_run, similarity};

/// Amount difference, as a share of the larger amount, that still counts as
/// "the same payment" (fees, rounding).
pub const AMOUNT_TIGHT_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
/// Widest amount difference that still earns a partial score.
pub const AMOUNT_LOOSE_TOLERANCE: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

pub const DATE_CLOSE_DAYS: u64 = 3;
pub const DATE_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldScore {
    pub score: f64,
    pub rationale: String,
}

impl FieldScore {
    pub fn new(score: f64, rationale: impl Into<String>) -> Self {
        Self { score: score.clamp(0.0, 1.0), rationale: rationale.into() }
    }

    pub fn zero(rationale: impl Into<String>) -> Self {
        Self::new(0.0, rationale)
    }
}

// ── Amount ────────────────────────────────────────────────────────────────────

pub fn evaluate_amount(source: &SourceRecord, candidate: &CandidateRecord) -> FieldScore {
    compare_amounts(source.amount, candidate.amount)
}

/// Compares absolute values; the two ledgers may book the same movement with
/// opposite signs.
pub fn compare_amounts(a: Option<Money>, b: Option<Money>) -> FieldScore {
    let (Some(a), Some(b)) = (a, b) else {
        return FieldScore::zero("amount not numeric");
    };

    let a = a.abs().as_decimal();
    let b = b.abs().as_decimal();

    if a == b {
        return FieldScore::new(1.0, "exact amount");
    }

    let diff = (a - b).abs();
    let larger = a.max(b);

    if diff <= larger * AMOUNT_TIGHT_TOLERANCE {
        let score = to_score(Decimal::ONE - diff / larger).max(0.8);
        return FieldScore::new(score, format!("similar amount (difference: {})", diff.normalize()));
    }

    let max_diff = larger * AMOUNT_LOOSE_TOLERANCE;
    if diff <= max_diff {
        let score = to_score((Decimal::ONE - diff / max_diff) * Decimal::new(6, 1));
        return FieldScore::new(
            score,
            format!("approximate amount (difference: {})", diff.normalize()),
        );
    }

    FieldScore::zero(format!(
        "amounts too far apart ({} vs {})",
        a.normalize(),
        b.normalize()
    ))
}

fn to_score(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

// ── Date ──────────────────────────────────────────────────────────────────────

pub fn evaluate_date(source: &SourceRecord, candidate: &CandidateRecord) -> FieldScore {
    let (Some(a), Some(b)) = (
        parse_calendar_date(&source.timestamp),
        parse_calendar_date(&candidate.date),
    ) else {
        return FieldScore::zero("unparseable date");
    };

    let days = days_apart(a, b);
    let d = days as f64;

    if days == 0 {
        FieldScore::new(1.0, "same date")
    } else if days <= DATE_CLOSE_DAYS {
        let score = (1.0 - (d / DATE_CLOSE_DAYS as f64) * 0.2).max(0.7);
        FieldScore::new(score, format!("{days} day(s) apart"))
    } else if days <= DATE_WINDOW_DAYS {
        let score = (1.0 - d / DATE_WINDOW_DAYS as f64 * 0.5) * 0.4;
        FieldScore::new(score, format!("{days} day(s) apart"))
    } else {
        FieldScore::zero(format!("dates too far apart ({days} days)"))
    }
}

// ── Reference / description ──────────────────────────────────────────────────

/// First matching rule wins:
/// digit runs equal, digit runs similar, identifier ~ reference,
/// identifier ~ description, counterpart ~ description.
pub fn evaluate_reference(source: &SourceRecord, candidate: &CandidateRecord) -> FieldScore {
    let id_digits = extract_digit_run(&source.id);
    let ref_digits = extract_digit_run(&candidate.reference);

    if !id_digits.is_empty() && !ref_digits.is_empty() {
        if id_digits == ref_digits {
            return FieldScore::new(1.0, "reference numbers match exactly");
        }
        let sim = similarity(&id_digits, &ref_digits);
        if sim > 0.8 {
            return FieldScore::new(sim * 0.9, format!("similar reference numbers ({})", pct(sim)));
        }
    }

    if let Some(sim) = text_similarity(&source.id, &candidate.reference) {
        if sim > 0.7 {
            return FieldScore::new(sim * 0.8, format!("similar references ({})", pct(sim)));
        }
    }

    if let Some(sim) = text_similarity(&source.id, &candidate.description) {
        if sim > 0.6 {
            return FieldScore::new(sim * 0.5, format!("similar to description ({})", pct(sim)));
        }
    }

    if let Some(name) = source.counterpart.as_deref() {
        if let Some(sim) = text_similarity(name, &candidate.description) {
            if sim > 0.5 {
                return FieldScore::new(
                    sim * 0.6,
                    format!("counterpart similar to description ({})", pct(sim)),
                );
            }
        }
    }

    FieldScore::zero("no reference similarity")
}

/// `None` when either side is blank: a missing field must not look like a
/// perfect match against another missing field.
fn text_similarity(a: &str, b: &str) -> Option<f64> {
    if a.trim().is_empty() || b.trim().is_empty() {
        return None;
    }
    Some(similarity(a, b))
}

fn pct(sim: f64) -> String {
    format!("{}%", (sim * 100.0).round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Option<Money> {
        Some(Money::new(Decimal::from_str(s).unwrap()))
    }

    fn src(id: &str, ts: &str) -> SourceRecord {
        SourceRecord::new(id, ts, money("100"))
    }

    fn cand(date: &str, desc: &str, reference: &str) -> CandidateRecord {
        CandidateRecord::new(date, desc, reference, money("100"))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ── amount ────────────────────────────────────────────────────────────────

    #[test]
    fn amount_exact() {
        assert_eq!(compare_amounts(money("6000"), money("6000")).score, 1.0);
    }

    #[test]
    fn amount_exact_ignores_sign_and_scale() {
        assert_eq!(compare_amounts(money("-6000"), money("6000.00")).score, 1.0);
    }

    #[test]
    fn amount_missing_scores_zero() {
        let s = compare_amounts(None, money("10"));
        assert_eq!(s.score, 0.0);
        assert_eq!(s.rationale, "amount not numeric");
        assert_eq!(compare_amounts(money("10"), None).score, 0.0);
    }

    #[test]
    fn amount_tight_tolerance_has_floor() {
        // 2% off: 1 - 0.02 = 0.98
        assert!(close(compare_amounts(money("100"), money("98")).score, 0.98));
        // exactly 5% off: 1 - 0.05 = 0.95
        assert!(close(compare_amounts(money("100"), money("95")).score, 0.95));
    }

    #[test]
    fn amount_loose_tolerance() {
        // 10% off: (1 - 10/20) * 0.6 = 0.3
        assert!(close(compare_amounts(money("100"), money("90")).score, 0.3));
        // exactly 20% off: (1 - 1) * 0.6 = 0
        assert!(close(compare_amounts(money("100"), money("80")).score, 0.0));
    }

    #[test]
    fn amount_kink_just_past_five_percent() {
        // 5% scores 0.95, 6% drops to (1 - 6/20) * 0.6 = 0.42
        assert!(close(compare_amounts(money("100"), money("94")).score, 0.42));
    }

    #[test]
    fn amount_too_far() {
        let s = compare_amounts(money("100000"), money("50000"));
        assert_eq!(s.score, 0.0);
        assert_eq!(s.rationale, "amounts too far apart (100000 vs 50000)");
    }

    #[test]
    fn amount_zero_against_nonzero() {
        assert_eq!(compare_amounts(money("0"), money("10")).score, 0.0);
        assert_eq!(compare_amounts(money("0"), money("0")).score, 1.0);
    }

    #[test]
    fn amount_is_sign_invariant() {
        let pairs = [("8500", "8000"), ("100", "97"), ("100", "50"), ("42.5", "42.5")];
        for (x, y) in pairs {
            let neg_x = format!("-{x}");
            let neg_y = format!("-{y}");
            let base = compare_amounts(money(x), money(y)).score;
            assert_eq!(base, compare_amounts(money(&neg_x), money(y)).score);
            assert_eq!(base, compare_amounts(money(x), money(&neg_y)).score);
        }
    }

    #[test]
    fn evaluate_amount_reads_both_records() {
        let s = SourceRecord::new("1", "2024-01-01", money("-250"));
        let c = CandidateRecord::new("2024-01-01", "", "", money("250"));
        assert_eq!(evaluate_amount(&s, &c).score, 1.0);
    }

    // ── date ──────────────────────────────────────────────────────────────────

    #[test]
    fn date_same_day_ignores_time() {
        let s = evaluate_date(&src("1", "2024-01-15T18:45:00"), &cand("2024-01-15", "", ""));
        assert_eq!(s.score, 1.0);
    }

    #[test]
    fn date_within_three_days() {
        let one = evaluate_date(&src("1", "2024-01-15"), &cand("2024-01-16", "", "")).score;
        let two = evaluate_date(&src("1", "2024-01-15"), &cand("2024-01-17", "", "")).score;
        let three = evaluate_date(&src("1", "2024-01-15"), &cand("2024-01-18", "", "")).score;
        assert!(close(one, 1.0 - (1.0 / 3.0) * 0.2));
        assert!(close(two, 1.0 - (2.0 / 3.0) * 0.2));
        assert!(close(three, 0.8));
    }

    #[test]
    fn date_within_week() {
        let five = evaluate_date(&src("1", "2024-01-15"), &cand("2024-01-20", "", ""));
        assert!(close(five.score, (1.0 - 5.0 / 7.0 * 0.5) * 0.4));
        assert_eq!(five.rationale, "5 day(s) apart");
        let seven = evaluate_date(&src("1", "2024-01-15"), &cand("2024-01-22", "", "")).score;
        assert!(close(seven, 0.2));
    }

    #[test]
    fn date_beyond_week() {
        let s = evaluate_date(&src("1", "2024-01-15"), &cand("2024-01-23", "", ""));
        assert_eq!(s.score, 0.0);
        assert_eq!(s.rationale, "dates too far apart (8 days)");
    }

    #[test]
    fn date_ambiguous_ledger_date_is_month_first() {
        let s = evaluate_date(&src("1", "2024-03-04"), &cand("03/04/2024", "", ""));
        assert_eq!(s.score, 1.0);
        assert_eq!(s.rationale, "same date");
    }

    #[test]
    fn date_unparseable_scores_zero() {
        let s = evaluate_date(&src("1", "yesterday"), &cand("2024-01-15", "", ""));
        assert_eq!(s.score, 0.0);
        assert_eq!(s.rationale, "unparseable date");
        assert_eq!(evaluate_date(&src("1", "2024-01-15"), &cand("", "", "")).score, 0.0);
    }

    // ── reference ─────────────────────────────────────────────────────────────

    #[test]
    fn reference_digits_exact() {
        let s = evaluate_reference(&src("VCH-000123", "x"), &cand("x", "", "REF 000123"));
        assert_eq!(s.score, 1.0);
    }

    #[test]
    fn reference_digits_similar() {
        // 1234567890 vs 1234567899: one substitution in ten -> 0.9
        let s = evaluate_reference(&src("A1234567890", "x"), &cand("x", "", "B1234567899"));
        assert!(close(s.score, 0.9 * 0.9), "score was {}", s.score);
        assert_eq!(s.rationale, "similar reference numbers (90%)");
    }

    #[test]
    fn reference_text_similar() {
        // digit runs differ too much, but the raw text is close
        let s = evaluate_reference(&src("PAYOUT-ALPHA", "x"), &cand("x", "", "payout alpha"));
        // normalize: "payoutalpha" vs "payout alpha" -> one insertion over 12
        assert!(close(s.score, (11.0 / 12.0) * 0.8), "score was {}", s.score);
    }

    #[test]
    fn reference_matches_description() {
        let s = evaluate_reference(&src("ACME", "x"), &cand("x", "ACME", "zz-zz"));
        assert!(close(s.score, 0.5));
        assert_eq!(s.rationale, "similar to description (100%)");
    }

    #[test]
    fn reference_counterpart_fallback() {
        let source = src("Q", "x").with_counterpart("Jose Perez");
        let s = evaluate_reference(&source, &cand("x", "José Pérez", "zzz"));
        assert!(close(s.score, 0.6));
    }

    #[test]
    fn reference_without_counterpart_falls_through() {
        let s = evaluate_reference(&src("Q", "x"), &cand("x", "José Pérez", "zzz"));
        assert_eq!(s.score, 0.0);
        assert_eq!(s.rationale, "no reference similarity");
    }

    #[test]
    fn reference_empty_fields_do_not_match_each_other() {
        let s = evaluate_reference(&src("", "x"), &cand("x", "", ""));
        assert_eq!(s.score, 0.0);
    }

    #[test]
    fn reference_punctuation_only_fields_still_compare() {
        // Present but blank after normalization: rule 3 at full similarity.
        let s = evaluate_reference(&src("---", "x"), &cand("x", "", "***"));
        assert!(close(s.score, 0.8), "score was {}", s.score);
        assert_eq!(s.rationale, "similar references (100%)");
    }

    #[test]
    fn field_score_is_clamped() {
        assert_eq!(FieldScore::new(1.2, "").score, 1.0);
        assert_eq!(FieldScore::new(-0.1, "").score, 0.0);
    }
}
