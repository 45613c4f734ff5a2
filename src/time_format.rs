//! MM:SS duration handling
//!
//! Durations and paces are stored as `M:SS` text. Older data stored decimal
//! minutes, so every reader here still accepts a bare decimal.

use tracing::warn;

/// Decimal minutes to `M:SS` (`21.5` -> `"21:30"`)
pub fn decimal_to_mmss(minutes: f64) -> String {
  if !minutes.is_finite() || minutes < 0.0 {
    return String::new();
  }
  let mut whole = minutes.floor();
  let mut seconds = ((minutes - whole) * 60.0).round();
  if seconds >= 60.0 {
    whole += 1.0;
    seconds = 0.0;
  }
  format!("{}:{:02}", whole as u64, seconds as u64)
}

/// `M:SS` (or a legacy decimal) to decimal minutes
pub fn mmss_to_decimal(text: &str) -> Option<f64> {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return None;
  }
  match trimmed.split_once(':') {
    None => trimmed.parse::<f64>().ok().filter(|v| v.is_finite()),
    Some((minutes, rest)) => {
      let seconds = rest.split(':').next().unwrap_or("");
      Some(leading_int(minutes) + leading_int(seconds) / 60.0)
    }
  }
}

/// Empty, a non-negative decimal, or `M:SS` with up to three minute digits
pub fn validate_mmss(text: &str) -> bool {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return true;
  }
  let Some((minutes, seconds)) = trimmed.split_once(':') else {
    return is_decimal_minutes(trimmed);
  };
  let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
  if !all_digits(minutes) || minutes.len() > 3 || !all_digits(seconds) || seconds.len() > 2 {
    return false;
  }
  seconds.parse::<u32>().map(|s| s < 60).unwrap_or(false)
}

/// Live-typing formatter: keeps digits and colons, clamps seconds to 00..59,
/// and splits four or more bare digits into minutes and seconds.
pub fn format_mmss(raw: &str) -> String {
  let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == ':').collect();
  if cleaned.is_empty() {
    return cleaned;
  }

  if cleaned.contains(':') {
    let parts: Vec<&str> = cleaned.split(':').collect();
    if parts.len() != 2 {
      return cleaned;
    }
    let minutes: String = parts[0].chars().take(3).collect();
    let seconds: String = parts[1].chars().take(2).collect();
    let seconds = match seconds.parse::<u32>() {
      Ok(s) => format!("{:02}", s.min(59)),
      Err(_) => String::new(),
    };
    return format!("{}:{}", minutes, seconds);
  }

  if cleaned.len() >= 4 {
    let (minutes, seconds) = cleaned.split_at(cleaned.len() - 2);
    let seconds = seconds.parse::<u32>().map(|s| s.min(59)).unwrap_or(0);
    return format!("{}:{:02}", minutes, seconds);
  }

  cleaned
}

/// Pace in min/km as `M:SS`; empty when either input is missing or zero
pub fn calculate_pace_min_per_km(duration: &str, distance_km: Option<f64>) -> String {
  let Some(minutes) = mmss_to_decimal(duration).filter(|m| *m > 0.0) else {
    return String::new();
  };
  let Some(distance) = distance_km.filter(|d| d.is_finite() && *d > 0.0) else {
    return String::new();
  };
  decimal_to_mmss(minutes / distance)
}

/// Legacy decimal-minute values such as `21.5`
pub fn is_decimal_format(text: &str) -> bool {
  let Some((whole, fraction)) = text.split_once('.') else {
    return false;
  };
  let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
  digits(whole) && digits(fraction)
}

/// Colon-less minutes as older data stored them: `21` or `21.5`
pub fn is_decimal_minutes(text: &str) -> bool {
  let all_digits = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
  all_digits || is_decimal_format(text)
}

/// Canonical stored form of a user-entered duration
pub fn normalize_duration_input(text: &str) -> String {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return String::new();
  }
  if !validate_mmss(trimmed) {
    warn!("Ignoring invalid duration input: {:?}", trimmed);
    return String::new();
  }
  match trimmed.split_once(':') {
    Some((minutes, seconds)) => {
      format!("{}:{:02}", leading_int(minutes) as u64, leading_int(seconds) as u64)
    }
    None => mmss_to_decimal(trimmed).map(decimal_to_mmss).unwrap_or_default(),
  }
}

/// Integer value of the leading digits, 0 when there are none
fn leading_int(text: &str) -> f64 {
  let digits: String = text.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
  digits.parse::<f64>().unwrap_or(0.0)
}
