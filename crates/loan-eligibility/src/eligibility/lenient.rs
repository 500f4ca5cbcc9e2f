//! Field deserializers that absorb blank, missing, or mistyped form values.
//!
//! Every helper maps unusable input to a value the scoring rules place in the floor
//! bucket: NaN for amounts, 0 for age, and an empty label for the enums.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use super::domain::{CreditRating, ResidencyStatus};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<RawValue>, D::Error> {
    Option::<RawValue>::deserialize(deserializer)
}

pub(crate) fn unknown_amount() -> f64 {
    f64::NAN
}

/// Numbers as-is, numeric strings parsed (thousands separators allowed), anything else NaN.
pub(crate) fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match raw(deserializer)? {
        Some(RawValue::Number(value)) => value,
        Some(RawValue::Text(text)) => text.trim().replace(',', "").parse().unwrap_or(f64::NAN),
        Some(RawValue::Other(_)) | None => f64::NAN,
    })
}

/// Whole years; fractional ages are floored and unusable values become 0.
pub(crate) fn age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = amount(deserializer)?;
    if value.is_finite() {
        Ok(value.floor().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
    } else {
        Ok(0)
    }
}

fn label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match raw(deserializer)? {
        Some(RawValue::Text(text)) => text,
        Some(RawValue::Number(value)) => value.to_string(),
        Some(RawValue::Other(_)) | None => String::new(),
    })
}

pub(crate) fn credit<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<CreditRating, D::Error> {
    label(deserializer).map(|raw| CreditRating::parse(&raw))
}

pub(crate) fn residency<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ResidencyStatus, D::Error> {
    label(deserializer).map(|raw| ResidencyStatus::parse(&raw))
}
