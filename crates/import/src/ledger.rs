use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tally_core::{CandidateRecord, Money};
use thiserror::Error;

/// Number of columns in a ledger export: date, description, reference, amount.
pub const LEDGER_COLUMNS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerCsvProfile {
    pub has_header: bool,
    pub delimiter: String,
}

impl Default for LedgerCsvProfile {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: ",".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Line {line}: expected 4 columns, found {found}")]
    ColumnCount { line: u64, found: usize },
    #[error("No data rows")]
    NoDataRows,
    #[error("Delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),
}

/// Parses a ledger export into candidate records.
///
/// The file is rejected as a whole if any row has the wrong number of
/// columns. An unparseable amount is kept as `None` so the row still takes
/// part in matching on date and reference.
pub fn import_ledger<R: Read>(
    data: R,
    profile: &LedgerCsvProfile,
) -> Result<Vec<CandidateRecord>, LedgerError> {
    let delimiter = match profile.delimiter.as_bytes() {
        [byte] if byte.is_ascii() => *byte,
        _ => return Err(LedgerError::InvalidDelimiter(profile.delimiter.clone())),
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(profile.has_header)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    if profile.has_header {
        let found = reader.headers()?.len();
        if found != LEDGER_COLUMNS {
            return Err(LedgerError::ColumnCount { line: 1, found });
        }
    }

    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;

        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if row.len() != LEDGER_COLUMNS {
            return Err(LedgerError::ColumnCount { line, found: row.len() });
        }

        let amount_text = &row[3];
        let amount = Money::parse(amount_text);
        if amount.is_none() {
            tracing::warn!(line, value = amount_text, "ledger amount is not numeric");
        }

        records.push(CandidateRecord::new(&row[0], &row[1], &row[2], amount));
    }

    if records.is_empty() {
        return Err(LedgerError::NoDataRows);
    }

    tracing::debug!(rows = records.len(), "ledger imported");
    Ok(records)
}

pub fn load_ledger(
    path: &Path,
    profile: &LedgerCsvProfile,
) -> Result<Vec<CandidateRecord>, LedgerError> {
    let file = File::open(path)?;
    import_ledger(file, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn money(s: &str) -> Option<Money> {
        Some(Money::new(Decimal::from_str(s).unwrap()))
    }

    #[test]
    fn import_basic() {
        let data = b"Date,Description,Reference,Amount\n\
                     2024-01-15,INCOMING TRANSFER,TRF-0042,6000\n\
                     2024-01-16, ATM , ATM-77 ,-200.50\n";
        let rows = import_ledger(data.as_ref(), &LedgerCsvProfile::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2024-01-15");
        assert_eq!(rows[0].reference, "TRF-0042");
        assert_eq!(rows[0].amount, money("6000"));
        assert_eq!(rows[1].description, "ATM");
        assert_eq!(rows[1].reference, "ATM-77");
        assert_eq!(rows[1].amount, money("-200.50"));
    }

    #[test]
    fn quoted_fields_may_contain_delimiter() {
        let data = b"Date,Description,Reference,Amount\n\
                     2024-01-15,\"ACME, INC\",R1,\"1,250.00\"\n";
        let rows = import_ledger(data.as_ref(), &LedgerCsvProfile::default()).unwrap();
        assert_eq!(rows[0].description, "ACME, INC");
        assert_eq!(rows[0].amount, money("1250.00"));
    }

    #[test]
    fn wrong_column_count_rejects_file() {
        let data = b"Date,Description,Reference,Amount\n\
                     2024-01-15,A,R1,10\n\
                     2024-01-16,B,10\n";
        let err = import_ledger(data.as_ref(), &LedgerCsvProfile::default()).unwrap_err();
        assert!(matches!(err, LedgerError::ColumnCount { line: 3, found: 3 }), "{err}");
    }

    #[test]
    fn wrong_header_rejects_file() {
        let data = b"Date,Description,Amount\n2024-01-15,A,10\n";
        let err = import_ledger(data.as_ref(), &LedgerCsvProfile::default()).unwrap_err();
        assert!(matches!(err, LedgerError::ColumnCount { line: 1, found: 3 }));
    }

    #[test]
    fn non_numeric_amount_is_kept_as_none() {
        let data = b"Date,Description,Reference,Amount\n2024-01-15,A,R1,pending\n";
        let rows = import_ledger(data.as_ref(), &LedgerCsvProfile::default()).unwrap();
        assert_eq!(rows[0].amount, None);
    }

    #[test]
    fn headerless_semicolon_file() {
        let profile = LedgerCsvProfile {
            has_header: false,
            delimiter: ";".to_string(),
        };
        let data = b"2024-01-15;A;R1;10\n\n2024-01-16;B;R2;(20)\n";
        let rows = import_ledger(data.as_ref(), &profile).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].amount, money("-20"));
    }

    #[test]
    fn delimiter_must_be_one_ascii_byte() {
        let data = b"2024-01-15;A;R1;10\n";
        for delimiter in ["", ";;", "\u{00a6}", "\u{2016}"] {
            let profile = LedgerCsvProfile {
                has_header: false,
                delimiter: delimiter.to_string(),
            };
            let err = import_ledger(data.as_ref(), &profile).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidDelimiter(ref d) if d == delimiter), "{err}");
        }
    }

    #[test]
    fn header_only_is_an_error() {
        let data = b"Date,Description,Reference,Amount\n";
        let result = import_ledger(data.as_ref(), &LedgerCsvProfile::default());
        assert!(matches!(result, Err(LedgerError::NoDataRows)));
    }
}
