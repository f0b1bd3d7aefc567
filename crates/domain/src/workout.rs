use std::{str::FromStr, sync::LazyLock};

use chrono::{DateTime, Utc};
use derive_more::{Display, Into};
use regex::Regex;
use thiserror::Error;

use crate::{Name, Weekday};

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    #[error("Weight must not be negative")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// A positive number of repetitions.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if value == 0 {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepsError {
    #[error("Reps must be greater than 0")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoggedSet {
    pub weight: Weight,
    pub reps: Reps,
}

impl LoggedSet {
    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let reps = u32::from(self.reps) as f32;
        f32::from(self.weight) * reps
    }
}

impl TryFrom<CandidateSet> for LoggedSet {
    type Error = RepsError;

    fn try_from(value: CandidateSet) -> Result<Self, Self::Error> {
        Ok(Self {
            weight: value.weight,
            reps: Reps::new(value.reps)?,
        })
    }
}

/// A set as entered during a workout, before empty sets are filtered out.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CandidateSet {
    pub weight: Weight,
    pub reps: u32,
}

impl CandidateSet {
    /// Interpret form input, falling back to zero for missing or malformed values.
    #[must_use]
    pub fn lenient(weight: &str, reps: &str) -> Self {
        Self {
            weight: Weight::try_from(weight).unwrap_or_default(),
            reps: reps.trim().parse().unwrap_or_default(),
        }
    }
}

static SET_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)(?:\s*[xX]\s*|\s+)(\d+)\s*$").expect("valid regex")
});

/// Parses entries like `135 x 10` or `135 10`.
impl FromStr for CandidateSet {
    type Err = SetEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = SET_ENTRY.captures(s).ok_or(SetEntryError::InvalidFormat)?;
        Ok(Self {
            weight: Weight::try_from(&captures[1]).map_err(|_| SetEntryError::InvalidFormat)?,
            reps: captures[2]
                .parse()
                .map_err(|_| SetEntryError::InvalidFormat)?,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetEntryError {
    #[error("Invalid format. Use: weight x reps (e.g., 135 x 10)")]
    InvalidFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseLog {
    pub name: Name,
    pub sets: Vec<LoggedSet>,
}

impl ExerciseLog {
    /// Returns `None` if no set has any reps.
    #[must_use]
    pub fn from_candidates(name: Name, candidates: &[CandidateSet]) -> Option<Self> {
        let sets = candidates
            .iter()
            .filter_map(|c| LoggedSet::try_from(*c).ok())
            .collect::<Vec<_>>();
        if sets.is_empty() {
            None
        } else {
            Some(Self { name, sets })
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub day: Weekday,
    pub timestamp: DateTime<Utc>,
    pub exercises: Vec<ExerciseLog>,
}

impl WorkoutRecord {
    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.exercises
            .iter()
            .flat_map(|e| &e.sets)
            .map(LoggedSet::volume)
            .sum()
    }
}
