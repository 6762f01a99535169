use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::MatchResult;
use crate::score::MatchType;

/// Batch summary, always recomputable from the results alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total: usize,
    pub exact: usize,
    pub partial: usize,
    pub none: usize,
    pub total_confidence: f64,
    pub average_confidence: f64,
    /// Share of results classified exact or partial, 0–100.
    pub match_percentage: f64,
}

impl AggregateStats {
    pub fn count(&self, match_type: MatchType) -> usize {
        match match_type {
            MatchType::Exact => self.exact,
            MatchType::Partial => self.partial,
            MatchType::None => self.none,
        }
    }

    /// Classification counts in display order, for charting.
    pub fn distribution(&self) -> [(MatchType, usize); 3] {
        [
            (MatchType::Exact, self.exact),
            (MatchType::Partial, self.partial),
            (MatchType::None, self.none),
        ]
    }
}

pub fn summarize(results: &[MatchResult]) -> AggregateStats {
    let mut stats = results.iter().fold(AggregateStats::default(), |mut acc, r| {
        acc.total += 1;
        acc.total_confidence += r.confidence;
        match r.match_type {
            MatchType::Exact => acc.exact += 1,
            MatchType::Partial => acc.partial += 1,
            MatchType::None => acc.none += 1,
        }
        acc
    });

    if stats.total > 0 {
        stats.average_confidence = stats.total_confidence / stats.total as f64;
        stats.match_percentage = (stats.exact + stats.partial) as f64 / stats.total as f64 * 100.0;
    }

    stats
}

/// Absolute source amount bands used by the value breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountBand {
    Under10k,
    From10kTo50k,
    From50kTo100k,
    Over100k,
}

impl AmountBand {
    pub const ALL: [AmountBand; 4] = [
        AmountBand::Under10k,
        AmountBand::From10kTo50k,
        AmountBand::From50kTo100k,
        AmountBand::Over100k,
    ];

    pub fn for_amount(abs_amount: Decimal) -> Self {
        if abs_amount < Decimal::from(10_000) {
            AmountBand::Under10k
        } else if abs_amount < Decimal::from(50_000) {
            AmountBand::From10kTo50k
        } else if abs_amount < Decimal::from(100_000) {
            AmountBand::From50kTo100k
        } else {
            AmountBand::Over100k
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AmountBand::Under10k => "under 10K",
            AmountBand::From10kTo50k => "10K - 50K",
            AmountBand::From50kTo100k => "50K - 100K",
            AmountBand::Over100k => "100K and over",
        }
    }
}

/// Counts source records per [`AmountBand`]. A missing amount counts as zero.
pub fn amount_bands(results: &[MatchResult]) -> [(AmountBand, usize); 4] {
    let mut counts = AmountBand::ALL.map(|band| (band, 0usize));
    for r in results {
        let abs = r.source.amount.map(|m| m.abs().as_decimal()).unwrap_or(Decimal::ZERO);
        let band = AmountBand::for_amount(abs);
        if let Some(slot) = counts.iter_mut().find(|(b, _)| *b == band) {
            slot.1 += 1;
        }
    }
    counts
}
