use chrono::{DateTime, Utc};

use crate::{CandidateSet, ExerciseLog, Name, ValidationError, Weekday, WorkoutRecord};

/// A workout in progress whose sets have not been committed to the progress log yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    day: Weekday,
    exercises: Vec<SessionExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionExercise {
    pub name: Name,
    pub sets: Vec<CandidateSet>,
}

impl Session {
    pub fn start(day: Weekday, exercises: &[Name]) -> Result<Self, ValidationError> {
        if exercises.is_empty() {
            return Err(ValidationError::NoExercises(day));
        }

        Ok(Self {
            day,
            exercises: exercises
                .iter()
                .map(|name| SessionExercise {
                    name: name.clone(),
                    sets: vec![],
                })
                .collect(),
        })
    }

    #[must_use]
    pub fn day(&self) -> Weekday {
        self.day
    }

    #[must_use]
    pub fn exercises(&self) -> &[SessionExercise] {
        &self.exercises
    }

    pub fn record_set(
        &mut self,
        exercise_index: usize,
        set: CandidateSet,
    ) -> Result<&SessionExercise, ValidationError> {
        let exercise = self
            .exercises
            .get_mut(exercise_index)
            .ok_or(ValidationError::NoSuchExercise(exercise_index))?;
        exercise.sets.push(set);
        Ok(exercise)
    }

    /// Build the record to commit, dropping sets without reps and exercises without sets.
    pub fn to_record(&self, timestamp: DateTime<Utc>) -> Result<WorkoutRecord, ValidationError> {
        let exercises = self
            .exercises
            .iter()
            .filter_map(|e| ExerciseLog::from_candidates(e.name.clone(), &e.sets))
            .collect::<Vec<_>>();

        if exercises.is_empty() {
            return Err(ValidationError::NothingLogged);
        }

        Ok(WorkoutRecord {
            day: self.day,
            timestamp,
            exercises,
        })
    }
}
