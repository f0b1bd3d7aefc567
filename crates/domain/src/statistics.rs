use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use derive_more::Display;

use crate::{Name, Reps, Weight, WorkoutRecord};

/// One logged set together with the time of its workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedSet {
    pub timestamp: DateTime<Utc>,
    pub weight: Weight,
    pub reps: Reps,
}

impl DatedSet {
    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let reps = u32::from(self.reps) as f32;
        f32::from(self.weight) * reps
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    pub exercise: Name,
    pub first: DatedSet,
    pub latest: DatedSet,
}

impl Progression {
    #[must_use]
    pub fn weight_change(&self) -> f32 {
        f32::from(self.latest.weight) - f32::from(self.first.weight)
    }

    #[must_use]
    pub fn volume_change(&self) -> f32 {
        self.latest.volume() - self.first.volume()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub workouts: usize,
    /// Ordered by exercise name.
    pub progressions: Vec<Progression>,
}

/// Compare the first and the latest set of every exercise with at least two sets.
pub fn analyze<'a>(records: impl IntoIterator<Item = &'a WorkoutRecord>) -> Analysis {
    let mut workouts = 0;
    let mut sets: BTreeMap<&Name, Vec<DatedSet>> = BTreeMap::new();

    for record in records {
        workouts += 1;
        for exercise in &record.exercises {
            sets.entry(&exercise.name)
                .or_default()
                .extend(exercise.sets.iter().map(|s| DatedSet {
                    timestamp: record.timestamp,
                    weight: s.weight,
                    reps: s.reps,
                }));
        }
    }

    let progressions = sets
        .into_iter()
        .filter(|(_, sets)| sets.len() >= 2)
        .filter_map(|(name, mut sets)| {
            sets.sort_by_key(|s| s.timestamp);
            Some(Progression {
                exercise: name.clone(),
                first: *sets.first()?,
                latest: *sets.last()?,
            })
        })
        .collect();

    Analysis {
        workouts,
        progressions,
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    #[display("High reps achieved, increase weight")]
    IncreaseWeight,
    #[display("Progressive overload - add one rep")]
    AddRep,
    #[display("Build up reps before increasing weight")]
    BuildUpReps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub exercise: Name,
    pub current: DatedSet,
    pub weight: Weight,
    pub reps: Reps,
    pub reason: Reason,
}

const WEIGHT_INCREMENT: f32 = 5.0;

/// Suggest the next target for an exercise based on its most recent set.
///
/// Exercise names are matched case-insensitively.
pub fn suggest<'a>(
    records: impl IntoIterator<Item = &'a WorkoutRecord>,
    exercise: &str,
) -> Option<Suggestion> {
    let wanted = exercise.trim().to_lowercase();
    let wanted = wanted.as_str();
    let (name, current) = records
        .into_iter()
        .flat_map(move |r| {
            r.exercises
                .iter()
                .filter(move |e| e.name.as_str().to_lowercase() == wanted)
                .flat_map(move |e| {
                    e.sets.iter().map(move |s| {
                        (
                            &e.name,
                            DatedSet {
                                timestamp: r.timestamp,
                                weight: s.weight,
                                reps: s.reps,
                            },
                        )
                    })
                })
        })
        .max_by_key(|(_, s)| s.timestamp)?;

    let reps = u32::from(current.reps);
    let (weight, reps, reason) = if reps >= 12 {
        (
            Weight::new(f32::from(current.weight) + WEIGHT_INCREMENT).unwrap_or(current.weight),
            8,
            Reason::IncreaseWeight,
        )
    } else if reps >= 8 {
        (current.weight, reps + 1, Reason::AddRep)
    } else {
        (current.weight, reps + 1, Reason::BuildUpReps)
    };

    Some(Suggestion {
        exercise: name.clone(),
        current,
        weight,
        reps: Reps::new(reps).unwrap_or(current.reps),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{ExerciseLog, LoggedSet, Weekday};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 8, 0, 0).unwrap()
    }

    fn logged(weight: f32, reps: u32) -> LoggedSet {
        LoggedSet {
            weight: Weight::new(weight).unwrap(),
            reps: Reps::new(reps).unwrap(),
        }
    }

    fn record(day: u32, exercises: &[(&str, &[LoggedSet])]) -> WorkoutRecord {
        WorkoutRecord {
            day: Weekday::Monday,
            timestamp: at(day),
            exercises: exercises
                .iter()
                .map(|(name, sets)| ExerciseLog {
                    name: Name::new(name).unwrap(),
                    sets: sets.to_vec(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_analyze() {
        let records = [
            record(8, &[("Squats", &[logged(100.0, 5)]), ("Lunges", &[logged(20.0, 10)])]),
            record(1, &[("Squats", &[logged(90.0, 5), logged(95.0, 5)])]),
        ];

        let analysis = analyze(&records);

        assert_eq!(analysis.workouts, 2);
        assert_eq!(analysis.progressions.len(), 1);
        let progression = &analysis.progressions[0];
        assert_eq!(progression.exercise, Name::new("Squats").unwrap());
        assert_eq!(f32::from(progression.first.weight), 90.0);
        assert_eq!(f32::from(progression.latest.weight), 100.0);
        assert_approx_eq!(progression.weight_change(), 10.0);
        assert_approx_eq!(progression.volume_change(), 50.0);
    }

    #[test]
    fn test_analyze_orders_by_name() {
        let records = [record(
            1,
            &[
                ("Squats", &[logged(100.0, 5), logged(100.0, 5)]),
                ("Calf Raises", &[logged(40.0, 15), logged(40.0, 12)]),
            ],
        )];

        let analysis = analyze(&records);

        assert_eq!(
            analysis
                .progressions
                .iter()
                .map(|p| p.exercise.to_string())
                .collect::<Vec<_>>(),
            vec!["Calf Raises", "Squats"]
        );
        assert_approx_eq!(analysis.progressions[0].volume_change(), -120.0);
    }

    #[test]
    fn test_analyze_empty() {
        assert_eq!(
            analyze(&[] as &[WorkoutRecord]),
            Analysis {
                workouts: 0,
                progressions: vec![]
            }
        );
    }

    #[rstest]
    #[case(12, 105.0, 8, Reason::IncreaseWeight)]
    #[case(15, 105.0, 8, Reason::IncreaseWeight)]
    #[case(8, 100.0, 9, Reason::AddRep)]
    #[case(11, 100.0, 12, Reason::AddRep)]
    #[case(5, 100.0, 6, Reason::BuildUpReps)]
    fn test_suggest(
        #[case] reps: u32,
        #[case] expected_weight: f32,
        #[case] expected_reps: u32,
        #[case] expected_reason: Reason,
    ) {
        let records = [
            record(1, &[("Bench Press", &[logged(80.0, 3)])]),
            record(5, &[("Bench Press", &[logged(100.0, reps)])]),
        ];

        let suggestion = suggest(&records, "bench press").unwrap();

        assert_eq!(suggestion.exercise, Name::new("Bench Press").unwrap());
        assert_eq!(suggestion.current.timestamp, at(5));
        assert_eq!(f32::from(suggestion.weight), expected_weight);
        assert_eq!(u32::from(suggestion.reps), expected_reps);
        assert_eq!(suggestion.reason, expected_reason);
    }

    #[test]
    fn test_suggest_uses_last_set_of_latest_workout() {
        let records = [record(
            2,
            &[("Rows", &[logged(60.0, 12), logged(60.0, 7)])],
        )];

        let suggestion = suggest(&records, "Rows").unwrap();

        assert_eq!(u32::from(suggestion.current.reps), 7);
        assert_eq!(suggestion.reason, Reason::BuildUpReps);
    }

    #[test]
    fn test_suggest_without_data() {
        let records = [record(1, &[("Rows", &[logged(60.0, 12)])])];
        assert_eq!(suggest(&records, "Curls"), None);
        assert_eq!(suggest(&[] as &[WorkoutRecord], "Rows"), None);
    }
}
