use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A signed, currency-agnostic monetary amount.
///
/// Unlike a bookkeeping amount this is never rounded: ledgers and upstream
/// services report amounts at whatever precision they like and the matcher
/// compares them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn new(decimal: Decimal) -> Self {
        Money(decimal)
    }

    pub fn from_i64(value: i64) -> Self {
        Money(Decimal::from(value))
    }

    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Parses the loose amount notation found in exported statements:
    /// `1,234.56`, `$99.99`, `-50`, `(75.25)`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (negative, s) = if s.starts_with('(') && s.ends_with(')') && s.len() >= 2 {
            (true, &s[1..s.len() - 1])
        } else {
            (false, s)
        };
        let cleaned = s.replace([',', '$', ' '], "");
        if cleaned.is_empty() {
            return None;
        }
        let dec = Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .ok()?;
        Some(Money(if negative { -dec } else { dec }))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<Decimal> for Money {
    fn from(decimal: Decimal) -> Self {
        Money(decimal)
    }
}

/// Deserializes an optional amount without failing the surrounding record.
///
/// JSON numbers and numeric strings become `Some`; anything else (`null`,
/// booleans, objects, unparseable strings) becomes `None`.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => Money::parse(&n.to_string()),
        serde_json::Value::String(s) => Money::parse(&s),
        _ => None,
    }))
}
