use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields;

// ---------------------------------------------------------------------------
/// Cold exposure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColdMethod {
  #[default]
  Shower,
  IceBath,
  SeaRiverSwim,
}

impl ColdMethod {
  pub const ALL: [ColdMethod; 3] = [ColdMethod::Shower, ColdMethod::IceBath, ColdMethod::SeaRiverSwim];

  pub fn as_str(self) -> &'static str {
    match self {
      ColdMethod::Shower => "shower",
      ColdMethod::IceBath => "ice_bath",
      ColdMethod::SeaRiverSwim => "sea_river_swim",
    }
  }

  /// Human label used in exports and charts
  pub fn label(self) -> &'static str {
    match self {
      ColdMethod::Shower => "Cold Shower",
      ColdMethod::IceBath => "Ice Bath",
      ColdMethod::SeaRiverSwim => "Sea/River Swim",
    }
  }
}

impl std::fmt::Display for ColdMethod {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for ColdMethod {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "shower" => Ok(ColdMethod::Shower),
      "ice_bath" => Ok(ColdMethod::IceBath),
      "sea_river_swim" => Ok(ColdMethod::SeaRiverSwim),
      _ => Err(format!("Unknown cold exposure method: {}", s)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColdExposureEntry {
  /// Millisecond timestamp of creation, unique within the collection
  pub id: i64,
  #[serde(deserialize_with = "fields::date")]
  pub date: NaiveDate,
  #[serde(default, deserialize_with = "fields::string")]
  pub duration: String,
  #[serde(default, deserialize_with = "fields::lenient_enum")]
  pub method: ColdMethod,
  /// Water temperature in °C
  #[serde(default, deserialize_with = "fields::opt_f64")]
  pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColdField {
  Date(NaiveDate),
  Duration(String),
  Method(ColdMethod),
  Temperature(Option<f64>),
}

/// Newest first
pub fn sort_cold_exposure(entries: &mut [ColdExposureEntry]) {
  entries.sort_by(|a, b| b.date.cmp(&a.date));
}

// ---------------------------------------------------------------------------
/// Body weight log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLogEntry {
  pub id: i64,
  #[serde(default, deserialize_with = "fields::u32_or_zero")]
  pub week: u32,
  /// Kilograms
  #[serde(default, deserialize_with = "fields::opt_f64")]
  pub weight: Option<f64>,
  #[serde(deserialize_with = "fields::date")]
  pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeightLogField {
  Week(u32),
  Weight(Option<f64>),
  Date(NaiveDate),
}

/// By week, then by date, both ascending
pub fn sort_weight_log(entries: &mut [WeightLogEntry]) {
  entries.sort_by(|a, b| a.week.cmp(&b.week).then(a.date.cmp(&b.date)));
}
