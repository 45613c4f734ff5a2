use super::{checked_duration, ColdCommand, WeightLogCommand};
use crate::models::{ColdField, WeightLogField};
use crate::tracker::Tracker;

pub async fn cold(tracker: &mut Tracker, action: ColdCommand) -> Result<String, String> {
  match action {
    ColdCommand::List => {
      let lines: Vec<String> = tracker
        .cold_exposure
        .entries()
        .iter()
        .map(|e| {
          let temperature = e
            .temperature
            .map(|t| format!("{}°C", t))
            .unwrap_or_else(|| "-".into());
          format!(
            "{}  {}  {:<14} {:>6}  {}",
            e.id,
            e.date,
            e.method.label(),
            e.duration,
            temperature
          )
        })
        .collect();
      if lines.is_empty() {
        return Ok("No cold exposure sessions logged".into());
      }
      Ok(lines.join("\n"))
    }
    ColdCommand::Add {
      duration,
      method,
      date,
      temperature,
    } => {
      let id = tracker
        .cold_exposure
        .add(date, &checked_duration(&duration)?, method, temperature)
        .await
        .map_err(|e| format!("Failed to add cold exposure: {}", e))?;
      Ok(format!("Added cold exposure {}", id))
    }
    ColdCommand::Update {
      id,
      date,
      duration,
      method,
      temperature,
    } => {
      let mut fields = Vec::new();
      if let Some(date) = date {
        fields.push(ColdField::Date(date));
      }
      if let Some(text) = duration {
        fields.push(ColdField::Duration(checked_duration(&text)?));
      }
      if let Some(method) = method {
        fields.push(ColdField::Method(method));
      }
      if let Some(text) = temperature {
        // Cold water can be below zero, so no sign check here
        let trimmed = text.trim();
        let value = if trimmed.is_empty() {
          None
        } else {
          Some(
            trimmed
              .parse::<f64>()
              .map_err(|_| format!("Invalid temperature: {}", trimmed))?,
          )
        };
        fields.push(ColdField::Temperature(value));
      }
      if fields.is_empty() {
        return Err("Nothing to update".into());
      }
      for field in fields {
        tracker
          .cold_exposure
          .update(id, field)
          .await
          .map_err(|e| format!("Failed to update cold exposure: {}", e))?;
      }
      Ok(format!("Updated cold exposure {}", id))
    }
    ColdCommand::Delete { id } => {
      tracker
        .cold_exposure
        .delete(id)
        .await
        .map_err(|e| format!("Failed to delete cold exposure: {}", e))?;
      Ok(format!("Deleted cold exposure {}", id))
    }
  }
}

pub async fn weight_log(tracker: &mut Tracker, action: WeightLogCommand) -> Result<String, String> {
  match action {
    WeightLogCommand::List => {
      let log = &tracker.weight_log;
      let mut lines: Vec<String> = log
        .entries()
        .iter()
        .map(|e| {
          let weight = e.weight.map(|w| format!("{} kg", w)).unwrap_or_else(|| "-".into());
          format!("{}  week {:>2}  {}  {}", e.id, e.week, e.date, weight)
        })
        .collect();
      if let Some(target) = log.target_weight() {
        lines.push(format!("target {} kg", target));
      }
      if lines.is_empty() {
        return Ok("No body weight logged".into());
      }
      Ok(lines.join("\n"))
    }
    WeightLogCommand::Add { week, weight, date } => {
      let id = tracker
        .weight_log
        .add(week, weight, date)
        .await
        .map_err(|e| format!("Failed to add weight: {}", e))?;
      Ok(format!("Added weight entry {}", id))
    }
    WeightLogCommand::Update {
      id,
      week,
      weight,
      date,
    } => {
      let fields: Vec<WeightLogField> = [
        week.map(WeightLogField::Week),
        weight.map(|w| WeightLogField::Weight(Some(w))),
        date.map(WeightLogField::Date),
      ]
      .into_iter()
      .flatten()
      .collect();
      if fields.is_empty() {
        return Err("Nothing to update".into());
      }
      for field in fields {
        tracker
          .weight_log
          .update(id, field)
          .await
          .map_err(|e| format!("Failed to update weight: {}", e))?;
      }
      Ok(format!("Updated weight entry {}", id))
    }
    WeightLogCommand::Delete { id } => {
      tracker
        .weight_log
        .delete(id)
        .await
        .map_err(|e| format!("Failed to delete weight: {}", e))?;
      Ok(format!("Deleted weight entry {}", id))
    }
    WeightLogCommand::Target { weight, clear } => {
      if clear {
        tracker
          .weight_log
          .set_target_weight(None)
          .await
          .map_err(|e| format!("Failed to clear target weight: {}", e))?;
        return Ok("Target weight cleared".into());
      }
      match weight {
        Some(weight) => {
          tracker
            .weight_log
            .set_target_weight(Some(weight))
            .await
            .map_err(|e| format!("Failed to set target weight: {}", e))?;
          Ok(format!("Target weight {} kg", tracker.weight_log.target_weight().unwrap_or_default()))
        }
        None => Ok(match tracker.weight_log.target_weight() {
          Some(target) => format!("Target weight {} kg", target),
          None => "No target weight set".into(),
        }),
      }
    }
  }
}
