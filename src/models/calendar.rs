use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
/// Weekday: program days, ordered Sunday-first like the schedule grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
  Sunday,
  Monday,
  Tuesday,
  Wednesday,
  Thursday,
  Friday,
  Saturday,
}

impl Weekday {
  pub const ALL: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
  ];

  /// Days since Sunday (0..=6)
  pub fn index(self) -> usize {
    self as usize
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Weekday::Sunday => "Sunday",
      Weekday::Monday => "Monday",
      Weekday::Tuesday => "Tuesday",
      Weekday::Wednesday => "Wednesday",
      Weekday::Thursday => "Thursday",
      Weekday::Friday => "Friday",
      Weekday::Saturday => "Saturday",
    }
  }

  pub fn from_chrono(day: chrono::Weekday) -> Self {
    Self::ALL[day.num_days_from_sunday() as usize]
  }
}

impl std::fmt::Display for Weekday {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for Weekday {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_lowercase();
    Self::ALL
      .into_iter()
      .find(|d| {
        let name = d.as_str().to_lowercase();
        name == wanted || (wanted.len() >= 3 && name.starts_with(&wanted))
      })
      .ok_or_else(|| format!("Unknown weekday: {}", s))
  }
}

// ---------------------------------------------------------------------------
/// Level: which program variant is active
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
  /// 8 weeks, cycling on Friday
  #[default]
  One,
  /// 10 weeks, cycling on Thursday
  Two,
}

const LEVEL_ONE_INTERVAL_WEEKS: [u32; 4] = [2, 4, 6, 8];
const LEVEL_TWO_INTERVAL_WEEKS: [u32; 5] = [2, 4, 6, 8, 10];

impl Level {
  pub fn number(self) -> u8 {
    match self {
      Level::One => 1,
      Level::Two => 2,
    }
  }

  pub fn max_weeks(self) -> u32 {
    match self {
      Level::One => 8,
      Level::Two => 10,
    }
  }

  pub fn cycling_day(self) -> Weekday {
    match self {
      Level::One => Weekday::Friday,
      Level::Two => Weekday::Thursday,
    }
  }

  /// Weeks whose cycling session is the interval variant
  pub fn interval_weeks(self) -> &'static [u32] {
    match self {
      Level::One => &LEVEL_ONE_INTERVAL_WEEKS,
      Level::Two => &LEVEL_TWO_INTERVAL_WEEKS,
    }
  }

  pub fn is_interval_cycling_week(self, week: u32) -> bool {
    self.interval_weeks().contains(&week)
  }

  /// Clamp a requested week into this level's range
  pub fn clamp_week(self, week: u32) -> u32 {
    week.clamp(1, self.max_weeks())
  }
}

impl TryFrom<u8> for Level {
  type Error = String;
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      1 => Ok(Level::One),
      2 => Ok(Level::Two),
      other => Err(format!("Unknown level: {}", other)),
    }
  }
}

impl From<Level> for u8 {
  fn from(level: Level) -> Self {
    level.number()
  }
}

impl std::fmt::Display for Level {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.number())
  }
}

impl std::str::FromStr for Level {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let number: u8 = s
      .trim()
      .parse()
      .map_err(|_| format!("Unknown level: {}", s))?;
    Level::try_from(number)
  }
}
