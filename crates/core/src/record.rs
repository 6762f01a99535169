use serde::{Deserialize, Deserializer, Serialize};

use super::money::{deserialize_lenient, Money};

/// A transaction reported by the external system being reconciled
/// (a processor receipt, a payout, a transfer voucher).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: String,
    /// Date-time text as delivered upstream; parsed lazily so a bad value
    /// only costs the date score.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub timestamp: String,
    /// `None` when the upstream value was not numeric.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub amount: Option<Money>,
    #[serde(default)]
    pub counterpart: Option<String>,
    /// Opaque pointer to an attached image or document.
    #[serde(default)]
    pub media: Option<String>,
}

impl SourceRecord {
    pub fn new(id: &str, timestamp: &str, amount: Option<Money>) -> Self {
        SourceRecord {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            amount,
            counterpart: None,
            media: None,
        }
    }

    pub fn with_counterpart(mut self, name: &str) -> Self {
        self.counterpart = Some(name.to_string());
        self
    }

    pub fn with_media(mut self, media: &str) -> Self {
        self.media = Some(media.to_string());
        self
    }
}

/// Reads a text field that upstream may send as a number, `null` or
/// something stranger. Numbers keep their text; everything else is `""`.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// One line of the reference ledger, e.g. a bank statement row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub date: String,
    pub description: String,
    pub reference: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub amount: Option<Money>,
}

impl CandidateRecord {
    pub fn new(date: &str, description: &str, reference: &str, amount: Option<Money>) -> Self {
        CandidateRecord {
            date: date.to_string(),
            description: description.to_string(),
            reference: reference.to_string(),
            amount,
        }
    }
}
