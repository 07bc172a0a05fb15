//! Rupiah amounts: lenient decoding and display formatting.
//!
//! The backend stores amounts as SQL decimals, which reach the client either
//! as JSON numbers or as numeric strings (`"5000000.00"`).

use serde::{Deserialize, Deserializer};

const NBSP: char = '\u{a0}';

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Deserialize an amount sent either as a number or as a numeric string.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => Ok(value),
        RawAmount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {text:?}"))),
    }
}

/// Same as [`deserialize_amount`] for nullable fields.
pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawAmount::Number(value)) => Ok(Some(value)),
        Some(RawAmount::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {text:?}"))),
    }
}

/// Format an amount as Indonesian Rupiah without fraction digits,
/// e.g. `Rp 1.500.000` (the separator after `Rp` is a no-break space).
///
/// Non-finite input formats as zero.
pub fn format_idr(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-Rp{NBSP}{grouped}")
    } else {
        format!("Rp{NBSP}{grouped}")
    }
}

/// Format a textual amount; anything that does not parse as a number is zero.
pub fn format_idr_str(amount: &str) -> String {
    format_idr(amount.trim().parse::<f64>().unwrap_or(0.0))
}
