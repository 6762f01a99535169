use serde::Serialize;
use std::fmt::Write;
use tally_match::{amount_bands, summarize, AggregateStats, AmountBand, MatchResult, MatchType};

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub results: &'a [MatchResult],
    pub stats: AggregateStats,
    pub amount_bands: Vec<BandCount>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BandCount {
    pub band: AmountBand,
    pub label: &'static str,
    pub count: usize,
}

impl<'a> Report<'a> {
    pub fn new(results: &'a [MatchResult]) -> Self {
        let amount_bands = amount_bands(results)
            .into_iter()
            .map(|(band, count)| BandCount { band, label: band.label(), count })
            .collect();
        Self { results, stats: summarize(results), amount_bands }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for r in self.results {
            let marker = match r.match_type {
                MatchType::Exact => "=",
                MatchType::Partial => "~",
                MatchType::None => "x",
            };
            let _ = writeln!(
                out,
                "{marker} {:<14} {:>4}%  {}",
                r.status,
                (r.confidence * 100.0).round(),
                r.details
            );
        }

        let s = &self.stats;
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} transactions: {} exact, {} partial, {} unmatched",
            s.total, s.exact, s.partial, s.none
        );
        let _ = writeln!(
            out,
            "average confidence {:.1}%, matched {:.1}%",
            s.average_confidence * 100.0,
            s.match_percentage
        );
        for b in &self.amount_bands {
            let _ = writeln!(out, "  {:<14} {}", b.label, b.count);
        }

        out
    }
}
