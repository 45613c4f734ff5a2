use chrono::NaiveDate;
use tracing::warn;

use crate::migration::migrate_legacy_start_date;
use crate::models::fields::parse_date;
use crate::models::Level;
use crate::store::{Entity, Store};

/// When the active level's program began, if the user has set it
pub struct ProgramStartState {
  store: Store,
  level: Level,
  date: Option<NaiveDate>,
}

impl ProgramStartState {
  /// Runs the one-time legacy key migration before reading
  pub async fn load(store: Store, level: Level) -> Self {
    if let Err(e) = migrate_legacy_start_date(&store).await {
      warn!("Start date migration failed: {}", e);
    }

    let key = store.level_key(Entity::ProgramStartDate, level);
    let date = store.read_or_log(&key).await.and_then(|text| {
      let parsed = parse_date(&text);
      if parsed.is_none() {
        warn!("Ignoring unreadable start date {:?}", text);
      }
      parsed
    });

    Self { store, level, date }
  }

  pub fn date(&self) -> Option<NaiveDate> {
    self.date
  }

  /// `None` clears the date
  pub async fn set(&mut self, date: Option<NaiveDate>) {
    let key = self.store.level_key(Entity::ProgramStartDate, self.level);
    self.date = date;
    match date {
      Some(date) => {
        self.store.write_or_log(&key, &date.format("%Y-%m-%d").to_string()).await;
      }
      None => {
        self.store.remove_or_log(&key).await;
      }
    }
  }
}
