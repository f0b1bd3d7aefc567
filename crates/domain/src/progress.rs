use chrono::{DateTime, Duration, NaiveDate, Utc};
use derive_more::Deref;

use crate::{Weekday, WorkoutRecord};

/// All completed workouts. Records are only ever appended.
#[derive(Deref, Debug, Default, Clone, PartialEq)]
pub struct ProgressLog(Vec<WorkoutRecord>);

impl ProgressLog {
    #[must_use]
    pub fn new(records: Vec<WorkoutRecord>) -> Self {
        Self(records)
    }

    pub fn append(&mut self, record: WorkoutRecord) -> &WorkoutRecord {
        self.0.push(record);
        &self.0[self.0.len() - 1]
    }

    /// Records for display, most recent first. The log itself keeps its order.
    #[must_use]
    pub fn sorted_recent_first(&self) -> Vec<&WorkoutRecord> {
        let mut records = self.0.iter().collect::<Vec<_>>();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// Records of the last `days` days before `now`, most recent first.
    ///
    /// A window reaching past the earliest representable date covers all records.
    #[must_use]
    pub fn within_days(&self, now: DateTime<Utc>, days: u32) -> Vec<&WorkoutRecord> {
        let cutoff = now
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.sorted_recent_first()
            .into_iter()
            .filter(|r| r.timestamp >= cutoff)
            .collect()
    }

    #[must_use]
    pub fn contains_workout_on(&self, day: Weekday, date: NaiveDate) -> bool {
        self.0
            .iter()
            .any(|r| r.day == day && r.timestamp.date_naive() == date)
    }
}
