//! Lenient field parsing shared by form and JSON inputs.
//!
//! HTML forms deliver every value as a string while the admin scripts send
//! JSON numbers and booleans. The helpers here accept both shapes and treat a
//! blank string as an absent value.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

fn blank_to_none(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Deserialize an optional float from a number or a numeric string.
///
/// # Errors
///
/// Fails when a non-blank string is not a number.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        #[allow(clippy::cast_precision_loss)]
        Some(Scalar::Int(n)) => Ok(Some(n as f64)),
        Some(Scalar::Float(n)) => Ok(Some(n)),
        Some(Scalar::Bool(_)) => Err(serde::de::Error::custom("expected a number")),
        Some(Scalar::Text(text)) => blank_to_none(&text)
            .map(|t| {
                t.parse::<f64>()
                    .map_err(|_| serde::de::Error::custom(format!("invalid number: {t}")))
            })
            .transpose(),
    }
}

/// Deserialize an optional integer from a number or a numeric string.
///
/// # Errors
///
/// Fails when a non-blank string is not an integer.
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(n)) => Ok(Some(n)),
        #[allow(clippy::cast_possible_truncation)]
        Some(Scalar::Float(n)) if n.fract().abs() < f64::EPSILON => Ok(Some(n as i64)),
        Some(Scalar::Float(_) | Scalar::Bool(_)) => {
            Err(serde::de::Error::custom("expected a whole number"))
        }
        Some(Scalar::Text(text)) => blank_to_none(&text)
            .map(|t| {
                t.parse::<i64>()
                    .map_err(|_| serde::de::Error::custom(format!("invalid whole number: {t}")))
            })
            .transpose(),
    }
}

/// Deserialize an optional flag from a boolean, a number or a checkbox value.
///
/// `true`, `on`, `yes` and `1` are true; `false`, `off`, `no` and `0` are false.
///
/// # Errors
///
/// Fails on any other string.
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Bool(b)) => Ok(Some(b)),
        Some(Scalar::Int(n)) => Ok(Some(n != 0)),
        Some(Scalar::Float(n)) => Ok(Some(n.abs() > f64::EPSILON)),
        Some(Scalar::Text(text)) => match blank_to_none(&text).map(str::to_ascii_lowercase) {
            None => Ok(None),
            Some(t) => match t.as_str() {
                "true" | "on" | "yes" | "1" => Ok(Some(true)),
                "false" | "off" | "no" | "0" => Ok(Some(false)),
                _ => Err(serde::de::Error::custom(format!("invalid flag: {t}"))),
            },
        },
    }
}

/// Deserialize an optional string, mapping blank input to `None`.
///
/// Numbers are accepted and kept in their textual form so a stat value such
/// as `4.9` survives a JSON round trip.
///
/// # Errors
///
/// Fails only if the input is not a scalar.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => None,
        Some(Scalar::Text(text)) => blank_to_none(&text).map(str::to_string),
        Some(Scalar::Int(n)) => Some(n.to_string()),
        Some(Scalar::Float(n)) => Some(n.to_string()),
        Some(Scalar::Bool(b)) => Some(b.to_string()),
    })
}

/// Return the trimmed value when it is present and not blank.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.and_then(blank_to_none)
}
