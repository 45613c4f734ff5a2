//! Heart-rate zone annotation: "65-75% HR" becomes "65-75% HR (124-143 bpm)"

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::state::settings::is_valid_max_heart_rate;

// Compile-once regex pattern via OnceLock.
fn re_hr_percent() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"(?i)(\d+)(?:-(\d+))?\s*%\s*HR").unwrap())
}

fn bpm(percent: &str, max_hr: u16) -> Option<u32> {
  let percent: f64 = percent.parse().ok()?;
  Some((percent * f64::from(max_hr) / 100.0).round() as u32)
}

/// Append the bpm equivalent after every heart-rate percentage. Text is left
/// alone when no valid max heart rate is configured.
pub fn annotate_heart_rate(text: &str, max_hr: Option<u16>) -> String {
  let Some(max_hr) = max_hr.filter(|hr| is_valid_max_heart_rate(*hr)) else {
    return text.to_string();
  };

  re_hr_percent()
    .replace_all(text, |caps: &Captures| {
      let matched = &caps[0];
      let low = bpm(&caps[1], max_hr);
      let high = caps.get(2).map(|m| bpm(m.as_str(), max_hr));
      match (low, high) {
        (Some(low), None) => format!("{} ({} bpm)", matched, low),
        (Some(low), Some(Some(high))) => format!("{} ({}-{} bpm)", matched, low, high),
        _ => matched.to_string(),
      }
    })
    .into_owned()
}
