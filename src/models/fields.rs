//! Lenient field decoding for persisted records
//!
//! Stored collections were written by several generations of the tracker, so a
//! numeric field may arrive as a number, a numeric string, an empty string or
//! null, and text fields may arrive as numbers. None of these shapes may fail a
//! whole collection load.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Decode any scalar as text (`null` becomes empty)
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;
  Ok(match value {
    None | Some(Value::Null) => String::new(),
    Some(Value::String(s)) => s,
    Some(Value::Number(n)) => n.to_string(),
    Some(other) => other.to_string(),
  })
}

/// Decode a number that may have been stored as text or left blank
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;
  Ok(value.as_ref().and_then(value_as_f64))
}

/// RPE-style small integers (`""` and out-of-range values become `None`)
pub fn opt_u8<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = opt_f64(deserializer)?;
  Ok(value.and_then(|v| {
    let rounded = v.round();
    if (0.0..=255.0).contains(&rounded) {
      Some(rounded as u8)
    } else {
      None
    }
  }))
}

/// Counts such as `numSets` or `intervalRounds` (blank means zero)
pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
  D: Deserializer<'de>,
{
  let value = opt_f64(deserializer)?;
  Ok(value.filter(|v| *v >= 0.0).map(|v| v as u32).unwrap_or(0))
}

/// Enum stored as text; unknown or blank values fall back to the default
pub fn lenient_enum<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: FromStr + Default,
{
  let text = string(deserializer)?;
  Ok(text.parse().unwrap_or_default())
}

/// Optional enum stored as text; unknown or blank values become `None`
pub fn lenient_opt_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: FromStr,
{
  let text = string(deserializer)?;
  Ok(text.parse().ok())
}

/// Calendar date stored as `YYYY-MM-DD` or as a full timestamp
pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
  D: Deserializer<'de>,
{
  let text = String::deserialize(deserializer)?;
  parse_date(&text).ok_or_else(|| D::Error::custom(format!("invalid date: {}", text)))
}

/// Accepts `YYYY-MM-DD` and anything starting with it (ISO timestamps)
pub fn parse_date(text: &str) -> Option<NaiveDate> {
  let trimmed = text.trim();
  let head = trimmed.get(..10).unwrap_or(trimmed);
  NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn value_as_f64(value: &Value) -> Option<f64> {
  match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => {
      let trimmed = s.trim();
      if trimmed.is_empty() {
        None
      } else {
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
      }
    }
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;

  #[derive(Debug, Deserialize)]
  struct Probe {
    #[serde(default, deserialize_with = "string")]
    text: String,
    #[serde(default, deserialize_with = "opt_f64")]
    number: Option<f64>,
    #[serde(default, deserialize_with = "opt_u8")]
    rpe: Option<u8>,
    #[serde(default, deserialize_with = "u32_or_zero")]
    count: u32,
  }

  #[test]
  fn test_numbers_stored_as_text_are_accepted() {
    let probe: Probe =
      serde_json::from_str(r#"{"text": 42, "number": "3.5", "rpe": "4", "count": "3"}"#).unwrap();
    assert_eq!(probe.text, "42");
    assert_eq!(probe.number, Some(3.5));
    assert_eq!(probe.rpe, Some(4));
    assert_eq!(probe.count, 3);
  }

  #[test]
  fn test_blank_and_missing_fields_use_defaults() {
    let probe: Probe =
      serde_json::from_str(r#"{"text": null, "number": "", "rpe": ""}"#).unwrap();
    assert_eq!(probe.text, "");
    assert_eq!(probe.number, None);
    assert_eq!(probe.rpe, None);
    assert_eq!(probe.count, 0);
  }

  #[test]
  fn test_parse_date_accepts_timestamps() {
    let expected = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
    assert_eq!(parse_date("2025-03-02"), Some(expected));
    assert_eq!(parse_date("2025-03-02T08:15:00.000Z"), Some(expected));
    assert_eq!(parse_date("yesterday"), None);
  }

  #[test]
  fn test_garbage_numbers_become_none() {
    let probe: Probe = serde_json::from_str(r#"{"number": "abc", "rpe": 900}"#).unwrap();
    assert_eq!(probe.number, None);
    assert_eq!(probe.rpe, None);
  }
}
