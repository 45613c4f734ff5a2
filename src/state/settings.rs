use tracing::warn;

use super::StateError;
use crate::models::Level;
use crate::store::{GlobalKey, Store};

pub const MIN_HEART_RATE: u16 = 100;
pub const MAX_HEART_RATE: u16 = 250;

pub fn is_valid_max_heart_rate(bpm: u16) -> bool {
  (MIN_HEART_RATE..=MAX_HEART_RATE).contains(&bpm)
}

/// Settings shared by both levels
pub struct Settings {
  store: Store,
  active_level: Level,
  max_heart_rate: Option<u16>,
}

impl Settings {
  pub async fn load(store: Store) -> Self {
    let active_level = match store.read_or_log(&store.global_key(GlobalKey::ActiveLevel)).await {
      Some(text) => text.trim().parse::<Level>().unwrap_or_else(|e| {
        warn!("Ignoring stored active level: {}", e);
        Level::default()
      }),
      None => Level::default(),
    };

    let max_heart_rate = store
      .read_or_log(&store.global_key(GlobalKey::MaxHeartRate))
      .await
      .and_then(|text| text.trim().parse::<u16>().ok())
      .filter(|bpm| is_valid_max_heart_rate(*bpm));

    Self {
      store,
      active_level,
      max_heart_rate,
    }
  }

  pub fn active_level(&self) -> Level {
    self.active_level
  }

  pub fn max_heart_rate(&self) -> Option<u16> {
    self.max_heart_rate
  }

  pub async fn set_active_level(&mut self, level: Level) {
    self.active_level = level;
    let key = self.store.global_key(GlobalKey::ActiveLevel);
    self.store.write_or_log(&key, &level.to_string()).await;
  }

  /// `None` clears the setting; values outside 100..=250 are rejected
  pub async fn set_max_heart_rate(&mut self, bpm: Option<u16>) -> Result<(), StateError> {
    let key = self.store.global_key(GlobalKey::MaxHeartRate);
    match bpm {
      Some(bpm) if !is_valid_max_heart_rate(bpm) => Err(StateError::Invalid(format!(
        "max heart rate must be between {} and {} bpm",
        MIN_HEART_RATE, MAX_HEART_RATE
      ))),
      Some(bpm) => {
        self.max_heart_rate = Some(bpm);
        self.store.write_or_log(&key, &bpm.to_string()).await;
        Ok(())
      }
      None => {
        self.max_heart_rate = None;
        self.store.remove_or_log(&key).await;
        Ok(())
      }
    }
  }
}
