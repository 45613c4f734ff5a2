use super::{
  check_week, checked_duration, parse_opt_f64, parse_opt_u8, status_mark, CollapseCommand, CycleCommand, RunCommand,
  WeightsCommand, YogaCommand,
};
use crate::heart_rate::annotate_heart_rate;
use crate::models::{ActivityRef, CycleField, RunField, SetField};
use crate::tracker::Tracker;

async fn toggle(tracker: &mut Tracker, activity: ActivityRef) -> Result<String, String> {
  let status = tracker
    .toggle_status(&activity)
    .await
    .map_err(|e| format!("Failed to update status: {}", e))?;
  Ok(format!("{} {}", status_mark(status), activity.collapse_key()))
}

/// ---------------------------------------------------------------------------
/// Running
/// ---------------------------------------------------------------------------

pub async fn run(tracker: &mut Tracker, action: RunCommand) -> Result<String, String> {
  let level = tracker.level();
  match action {
    RunCommand::List { week } => {
      let week = check_week(level, week)?;
      let max_hr = tracker.settings.max_heart_rate();
      let lines: Vec<String> = tracker
        .running
        .runs()
        .iter()
        .filter(|r| r.week == week)
        .map(|r| {
          let mut line = format!(
            "{} {} {}  duration {}  pace {}  rpe {}",
            status_mark(r.status),
            r.day,
            annotate_heart_rate(&r.summary(), max_hr),
            or_dash(&r.duration),
            or_dash(&r.pace),
            r.rpe.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
          );
          if r.is_interval() {
            line.push_str(&format!(
              "\n      {} x{}, rest: {}",
              annotate_heart_rate(&r.interval_structure, max_hr),
              r.interval_rounds,
              r.rest_time
            ));
          }
          line
        })
        .collect();
      Ok(lines.join("\n"))
    }
    RunCommand::Set {
      week,
      day,
      run,
      distance,
      duration,
      rpe,
      intensity,
      structure,
      rounds,
      rest,
    } => {
      let mut fields = Vec::new();
      if let Some(text) = distance {
        fields.push(RunField::Distance(parse_opt_f64(&text, "distance")?));
      }
      if let Some(text) = duration {
        fields.push(RunField::Duration(checked_duration(&text)?));
      }
      if let Some(text) = rpe {
        let rpe = parse_opt_u8(&text, "RPE")?;
        if rpe.is_some_and(|v| !(1..=5).contains(&v)) {
          return Err("RPE must be between 1 and 5".into());
        }
        fields.push(RunField::Rpe(rpe));
      }
      if let Some(text) = intensity {
        fields.push(RunField::Intensity(text));
      }
      if let Some(text) = structure {
        fields.push(RunField::IntervalStructure(text));
      }
      if let Some(n) = rounds {
        fields.push(RunField::IntervalRounds(n));
      }
      if let Some(text) = rest {
        fields.push(RunField::RestTime(text));
      }
      if fields.is_empty() {
        return Err("Nothing to update".into());
      }

      for field in fields {
        tracker
          .running
          .update(week, day, run, field)
          .await
          .map_err(|e| format!("Failed to update run: {}", e))?;
      }
      let session = tracker
        .running
        .find(week, day, run)
        .ok_or_else(|| format!("Run {} not found", run))?;
      Ok(format!(
        "{}  duration {}  pace {}",
        session.summary(),
        or_dash(&session.duration),
        or_dash(&session.pace)
      ))
    }
    RunCommand::Toggle { week, day, run } => toggle(tracker, ActivityRef::Running { week, day, run }).await,
  }
}

fn or_dash(text: &str) -> &str {
  if text.is_empty() {
    "-"
  } else {
    text
  }
}

/// ---------------------------------------------------------------------------
/// Cycling
/// ---------------------------------------------------------------------------

pub async fn cycle(tracker: &mut Tracker, action: CycleCommand) -> Result<String, String> {
  let level = tracker.level();
  match action {
    CycleCommand::List { week } => {
      let week = check_week(level, week)?;
      let lines: Vec<String> = tracker
        .cycling
        .segments_for_week(week)
        .map(|s| {
          format!(
            "{} {:<12} {:>6}  {} km  pace {}  rpe {}",
            status_mark(s.status),
            s.segment,
            s.duration,
            s.distance.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            or_dash(&s.pace),
            s.rpe.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
          )
        })
        .collect();
      Ok(lines.join("\n"))
    }
    CycleCommand::Set {
      week,
      segment,
      duration,
      distance,
      rpe,
    } => {
      let mut fields = Vec::new();
      if let Some(text) = duration {
        fields.push(CycleField::Duration(checked_duration(&text)?));
      }
      if let Some(text) = distance {
        fields.push(CycleField::Distance(parse_opt_f64(&text, "distance")?));
      }
      if let Some(text) = rpe {
        let rpe = parse_opt_u8(&text, "RPE")?;
        if rpe.is_some_and(|v| !(1..=5).contains(&v)) {
          return Err("RPE must be between 1 and 5".into());
        }
        fields.push(CycleField::Rpe(rpe));
      }
      if fields.is_empty() {
        return Err("Nothing to update".into());
      }
      for field in fields {
        tracker
          .cycling
          .update(week, &segment, field)
          .await
          .map_err(|e| format!("Failed to update segment: {}", e))?;
      }
      Ok(format!("Updated week {} {}", week, segment))
    }
    CycleCommand::Toggle { week } => {
      let day = level.cycling_day();
      toggle(tracker, ActivityRef::Cycling { week, day }).await
    }
  }
}

/// ---------------------------------------------------------------------------
/// Weights
/// ---------------------------------------------------------------------------

pub async fn weights(tracker: &mut Tracker, action: WeightsCommand) -> Result<String, String> {
  let level = tracker.level();
  match action {
    WeightsCommand::List { week } => {
      let week = check_week(level, week)?;
      let exercises = tracker.weights.exercises();
      let mut out = Vec::new();
      for exercise in exercises.iter().filter(|e| e.week == week) {
        let recommendation = exercise
          .weight_recommendation
          .map(|r| format!("  -> {}", r.as_str()))
          .unwrap_or_default();
        out.push(format!(
          "{} {} {}: {} ({} x {}){}",
          status_mark(exercise.status),
          exercise.day,
          exercise.workout_name,
          exercise.exercise,
          exercise.recommended_sets,
          exercise.rep_range,
          recommendation
        ));
        for set in &exercise.sets {
          let last_week =
            crate::progress::last_week_weight(week, exercise.day, &exercise.exercise, set.set, exercises);
          out.push(format!(
            "    set {}: {} kg x {} @ rpe {} (last week {}) {}",
            set.set,
            or_dash(&set.weight),
            or_dash(&set.reps),
            or_dash(&set.rpe),
            last_week,
            set.notes
          ));
        }
      }
      Ok(out.join("\n"))
    }
    WeightsCommand::Sets {
      week,
      day,
      exercise,
      count,
    } => {
      tracker
        .weights
        .set_num_sets(week, day, &exercise, count)
        .await
        .map_err(|e| format!("Failed to set sets: {}", e))?;
      Ok(format!("{}: {} sets", exercise, count))
    }
    WeightsCommand::Set {
      week,
      day,
      exercise,
      set,
      weight,
      reps,
      rpe,
      notes,
    } => {
      let fields: Vec<SetField> = [
        weight.map(SetField::Weight),
        reps.map(SetField::Reps),
        rpe.map(SetField::Rpe),
        notes.map(SetField::Notes),
      ]
      .into_iter()
      .flatten()
      .collect();
      if fields.is_empty() {
        return Err("Nothing to update".into());
      }
      for field in fields {
        tracker
          .weights
          .update_set(week, day, &exercise, set, field)
          .await
          .map_err(|e| format!("Failed to update set: {}", e))?;
      }
      Ok(format!("Updated {} set {}", exercise, set))
    }
    WeightsCommand::Recommend { week, day, exercise } => {
      let recommendation = tracker
        .weights
        .cycle_recommendation(week, day, &exercise)
        .await
        .map_err(|e| format!("Failed to update recommendation: {}", e))?;
      Ok(format!(
        "{}: {}",
        exercise,
        recommendation.map(|r| r.as_str()).unwrap_or("none")
      ))
    }
    WeightsCommand::Toggle { week, day, workout } => {
      toggle(
        tracker,
        ActivityRef::Weights {
          week,
          day,
          workout_name: workout,
        },
      )
      .await
    }
  }
}

/// ---------------------------------------------------------------------------
/// Yoga and collapse state
/// ---------------------------------------------------------------------------

pub async fn yoga(tracker: &mut Tracker, action: YogaCommand) -> Result<String, String> {
  let level = tracker.level();
  match action {
    YogaCommand::List { week } => {
      let week = check_week(level, week)?;
      let lines: Vec<String> = tracker
        .yoga
        .entries()
        .iter()
        .filter(|y| y.week == week)
        .map(|y| format!("{} {} {}", status_mark(y.status), y.day, or_dash(&y.duration)))
        .collect();
      Ok(lines.join("\n"))
    }
    YogaCommand::Set { week, day, duration } => {
      let duration = checked_duration(&duration)?;
      tracker.yoga.set_duration(week, day, &duration).await;
      Ok(format!("Yoga week {} {}: {}", week, day, duration))
    }
    YogaCommand::Toggle { week, day } => toggle(tracker, ActivityRef::Yoga { week, day }).await,
  }
}

pub async fn collapse(tracker: &mut Tracker, action: CollapseCommand) -> Result<String, String> {
  let (activity, collapsed) = match action {
    CollapseCommand::Toggle(args) => {
      let activity = args.to_ref()?;
      let collapsed = tracker.collapsed.toggle(&activity).await;
      (activity, collapsed)
    }
    CollapseCommand::Set { activity, collapsed } => {
      let activity = activity.to_ref()?;
      tracker.collapsed.set(&activity, collapsed).await;
      (activity, collapsed)
    }
  };
  let state = if collapsed { "collapsed" } else { "expanded" };
  Ok(format!("{} {}", activity.collapse_key(), state))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::commands::{ActivityArgs, KindArg};
  use crate::models::{Weekday, WorkoutStatus};
  use crate::store::Store;
  use crate::test_utils::{setup_test_db, teardown_test_db};

  async fn tracker(pool: &sqlx::SqlitePool) -> Tracker {
    Tracker::load(Store::new(pool.clone(), "t")).await
  }

  #[tokio::test]
  async fn test_run_set_recomputes_pace() {
    let pool = setup_test_db().await;
    let mut tracker = tracker(&pool).await;

    let out = run(
      &mut tracker,
      RunCommand::Set {
        week: 1,
        day: Weekday::Monday,
        run: 1,
        distance: Some("4".into()),
        duration: Some("24:00".into()),
        rpe: Some("3".into()),
        intensity: None,
        structure: None,
        rounds: None,
        rest: None,
      },
    )
    .await
    .unwrap();
    assert!(out.contains("pace 6:00"), "{}", out);

    let bad = run(
      &mut tracker,
      RunCommand::Set {
        week: 1,
        day: Weekday::Monday,
        run: 1,
        distance: None,
        duration: Some("24:99".into()),
        rpe: None,
        intensity: None,
        structure: None,
        rounds: None,
        rest: None,
      },
    )
    .await;
    assert!(bad.is_err());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_yoga_duration_typed_as_digits() {
    let pool = setup_test_db().await;
    let mut tracker = tracker(&pool).await;

    let set = |duration: &str| YogaCommand::Set {
      week: 1,
      day: Weekday::Sunday,
      duration: duration.to_string(),
    };
    let out = yoga(&mut tracker, set("4500")).await.unwrap();
    assert_eq!(out, "Yoga week 1 Sunday: 45:00");
    let entry = tracker.yoga.entries().iter().find(|y| y.week == 1 && y.day == Weekday::Sunday).cloned();
    assert_eq!(entry.map(|y| y.duration).as_deref(), Some("45:00"));

    assert!(yoga(&mut tracker, set("inf")).await.is_err());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_toggle_reports_new_status() {
    let pool = setup_test_db().await;
    let mut tracker = tracker(&pool).await;

    let out = cycle(&mut tracker, CycleCommand::Toggle { week: 2 }).await.unwrap();
    assert_eq!(out, "[x] cycling-2-Friday");
    let out = yoga(
      &mut tracker,
      YogaCommand::Toggle {
        week: 1,
        day: Weekday::Sunday,
      },
    )
    .await
    .unwrap();
    assert_eq!(out, "[x] yoga-1-Sunday");

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_weights_flow() {
    let pool = setup_test_db().await;
    let mut tracker = tracker(&pool).await;
    let press = "Incline Dumbbell Press".to_string();

    weights(
      &mut tracker,
      WeightsCommand::Sets {
        week: 1,
        day: Weekday::Monday,
        exercise: press.clone(),
        count: 2,
      },
    )
    .await
    .unwrap();
    weights(
      &mut tracker,
      WeightsCommand::Set {
        week: 1,
        day: Weekday::Monday,
        exercise: press.clone(),
        set: 1,
        weight: Some("22.5".into()),
        reps: Some("10".into()),
        rpe: None,
        notes: None,
      },
    )
    .await
    .unwrap();
    let out = weights(
      &mut tracker,
      WeightsCommand::Recommend {
        week: 1,
        day: Weekday::Monday,
        exercise: press.clone(),
      },
    )
    .await
    .unwrap();
    assert_eq!(out, "Incline Dumbbell Press: drop");

    let listing = weights(&mut tracker, WeightsCommand::List { week: 1 }).await.unwrap();
    assert!(listing.contains("set 1: 22.5 kg x 10"));
    assert!(listing.contains("-> drop"));

    let too_many = weights(
      &mut tracker,
      WeightsCommand::Sets {
        week: 1,
        day: Weekday::Monday,
        exercise: press,
        count: 11,
      },
    )
    .await;
    assert!(too_many.is_err());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_collapse_set_and_toggle() {
    let pool = setup_test_db().await;
    let mut tracker = tracker(&pool).await;
    let args = || ActivityArgs {
      kind: KindArg::Yoga,
      week: 1,
      day: Weekday::Sunday,
      run: None,
      workout: None,
    };

    let out = collapse(&mut tracker, CollapseCommand::Toggle(args())).await.unwrap();
    assert_eq!(out, "yoga-1-Sunday collapsed");
    let out = collapse(
      &mut tracker,
      CollapseCommand::Set {
        activity: args(),
        collapsed: false,
      },
    )
    .await
    .unwrap();
    assert_eq!(out, "yoga-1-Sunday expanded");
    let yoga = ActivityRef::Yoga {
      week: 1,
      day: Weekday::Sunday,
    };
    assert_eq!(tracker.status_of(&yoga), WorkoutStatus::NotDone);

    teardown_test_db(pool).await;
  }
}
