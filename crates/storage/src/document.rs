//! The persisted form of the planner state.
//!
//! ```json
//! {
//!   "workouts": {"push": [...], "pull": [...], "legs": [...]},
//!   "schedule": {"monday": [...], ..., "saturday": [...]},
//!   "progress": [{"day": "monday", "timestamp": "...", "exercises": [...]}]
//! }
//! ```
//!
//! Missing lists are read as empty lists.

use chrono::{DateTime, Utc};
use ppling_domain as domain;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Document {
    pub workouts: Workouts,
    pub schedule: Schedule,
    pub progress: Vec<Record>,
}

impl From<&domain::State> for Document {
    fn from(value: &domain::State) -> Self {
        Self {
            workouts: Workouts::from(&value.catalog),
            schedule: Schedule::from(&value.schedule),
            progress: value.progress.iter().map(Record::from).collect(),
        }
    }
}

impl TryFrom<Document> for domain::State {
    type Error = DocumentError;

    fn try_from(value: Document) -> Result<Self, Self::Error> {
        Ok(Self {
            catalog: value.workouts.try_into()?,
            schedule: value.schedule.try_into()?,
            progress: domain::ProgressLog::new(
                value
                    .progress
                    .into_iter()
                    .map(domain::WorkoutRecord::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error("invalid day: {0}")]
    InvalidDay(String),
    #[error(transparent)]
    InvalidWeight(#[from] domain::WeightError),
    #[error(transparent)]
    InvalidReps(#[from] domain::RepsError),
    #[error("workout record without exercises")]
    NoExercises,
    #[error("exercise without sets: {0}")]
    NoSets(String),
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Workouts {
    pub push: Vec<String>,
    pub pull: Vec<String>,
    pub legs: Vec<String>,
}

impl From<&domain::Catalog> for Workouts {
    fn from(value: &domain::Catalog) -> Self {
        let names = |category| -> Vec<String> {
            value
                .exercises(category)
                .iter()
                .map(ToString::to_string)
                .collect()
        };
        Self {
            push: names(domain::Category::Push),
            pull: names(domain::Category::Pull),
            legs: names(domain::Category::Legs),
        }
    }
}

impl TryFrom<Workouts> for domain::Catalog {
    type Error = DocumentError;

    fn try_from(value: Workouts) -> Result<Self, Self::Error> {
        Ok(Self::new(
            names(&value.push)?,
            names(&value.pull)?,
            names(&value.legs)?,
        ))
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Schedule {
    pub monday: Vec<String>,
    pub tuesday: Vec<String>,
    pub wednesday: Vec<String>,
    pub thursday: Vec<String>,
    pub friday: Vec<String>,
    pub saturday: Vec<String>,
}

impl Schedule {
    fn day(&self, day: domain::Weekday) -> &Vec<String> {
        match day {
            domain::Weekday::Monday => &self.monday,
            domain::Weekday::Tuesday => &self.tuesday,
            domain::Weekday::Wednesday => &self.wednesday,
            domain::Weekday::Thursday => &self.thursday,
            domain::Weekday::Friday => &self.friday,
            domain::Weekday::Saturday => &self.saturday,
        }
    }

    fn day_mut(&mut self, day: domain::Weekday) -> &mut Vec<String> {
        match day {
            domain::Weekday::Monday => &mut self.monday,
            domain::Weekday::Tuesday => &mut self.tuesday,
            domain::Weekday::Wednesday => &mut self.wednesday,
            domain::Weekday::Thursday => &mut self.thursday,
            domain::Weekday::Friday => &mut self.friday,
            domain::Weekday::Saturday => &mut self.saturday,
        }
    }
}

impl From<&domain::Schedule> for Schedule {
    fn from(value: &domain::Schedule) -> Self {
        let mut schedule = Self::default();
        for day in domain::Weekday::iter() {
            *schedule.day_mut(day) = value
                .exercises(day)
                .iter()
                .map(ToString::to_string)
                .collect();
        }
        schedule
    }
}

impl TryFrom<Schedule> for domain::Schedule {
    type Error = DocumentError;

    fn try_from(value: Schedule) -> Result<Self, Self::Error> {
        let mut schedule = Self::default();
        for day in domain::Weekday::iter() {
            schedule.set(day, names(value.day(day))?);
        }
        Ok(schedule)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Record {
    pub day: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl From<&domain::WorkoutRecord> for Record {
    fn from(value: &domain::WorkoutRecord) -> Self {
        Self {
            day: value.day.to_string(),
            timestamp: value.timestamp,
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<Record> for domain::WorkoutRecord {
    type Error = DocumentError;

    fn try_from(value: Record) -> Result<Self, Self::Error> {
        if value.exercises.is_empty() {
            return Err(DocumentError::NoExercises);
        }
        Ok(Self {
            day: value
                .day
                .parse()
                .map_err(|_| DocumentError::InvalidDay(value.day.clone()))?,
            timestamp: value.timestamp,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseLog::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<Set>,
}

impl From<&domain::ExerciseLog> for Exercise {
    fn from(value: &domain::ExerciseLog) -> Self {
        Self {
            name: value.name.to_string(),
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

impl TryFrom<Exercise> for domain::ExerciseLog {
    type Error = DocumentError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        if value.sets.is_empty() {
            return Err(DocumentError::NoSets(value.name));
        }
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            sets: value
                .sets
                .into_iter()
                .map(domain::LoggedSet::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Set {
    pub weight: f32,
    pub reps: u32,
}

impl From<&domain::LoggedSet> for Set {
    fn from(value: &domain::LoggedSet) -> Self {
        Self {
            weight: value.weight.into(),
            reps: value.reps.into(),
        }
    }
}

impl TryFrom<Set> for domain::LoggedSet {
    type Error = DocumentError;

    fn try_from(value: Set) -> Result<Self, Self::Error> {
        Ok(Self {
            weight: domain::Weight::new(value.weight)?,
            reps: domain::Reps::new(value.reps)?,
        })
    }
}

fn names(values: &[String]) -> Result<Vec<domain::Name>, DocumentError> {
    values
        .iter()
        .map(|name| domain::Name::new(name).map_err(DocumentError::from))
        .collect()
}
