pub mod calendar;
pub mod cycling;
pub mod fields;
pub mod journal;
pub mod running;
pub mod status;
pub mod weights;
pub mod yoga;

pub use calendar::{Level, Weekday};
pub use cycling::{CycleField, CycleSegment};
pub use journal::{ColdExposureEntry, ColdField, ColdMethod, WeightLogEntry, WeightLogField};
pub use running::{RunField, RunSession, RunType};
pub use status::{ActivityKind, ActivityRef, WorkoutStatus};
pub use weights::{SetEntry, SetField, WeightExercise, WeightRecommendation};
pub use yoga::YogaEntry;

/// Records carrying a stored MM:SS duration (and, for distance sports, a pace)
pub trait TimedRecord {
  fn duration_mut(&mut self) -> &mut String;
  fn pace_mut(&mut self) -> Option<&mut String>;
}
