use std::io::Write;
use tally_core::Money;
use tally_match::MatchResult;
use thiserror::Error;

pub const EXPORT_HEADERS: [&str; 8] = [
    "status",
    "source_id",
    "source_timestamp",
    "source_amount",
    "ledger_date",
    "ledger_amount",
    "ledger_reference",
    "confidence",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Writes one fully quoted CSV row per result. Ledger columns stay empty
/// for unmatched records.
pub fn export_results<W: Write>(writer: W, results: &[MatchResult]) -> Result<(), ExportError> {
    let mut out = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    out.write_record(EXPORT_HEADERS)?;

    for r in results {
        let (ledger_date, ledger_amount, ledger_reference) = match &r.candidate {
            Some(c) => (c.date.clone(), amount_cell(c.amount), c.reference.clone()),
            None => (String::new(), String::new(), String::new()),
        };
        out.write_record([
            r.status.clone(),
            r.source.id.clone(),
            r.source.timestamp.clone(),
            amount_cell(r.source.amount),
            ledger_date,
            ledger_amount,
            ledger_reference,
            format!("{}%", (r.confidence * 100.0).round()),
        ])?;
    }

    out.flush()?;
    Ok(())
}

pub fn export_results_to_string(results: &[MatchResult]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    export_results(&mut buf, results)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn amount_cell(amount: Option<Money>) -> String {
    amount.map(|m| m.to_string()).unwrap_or_default()
}
