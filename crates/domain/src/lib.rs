#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod category;
mod error;
mod name;
pub mod note;
mod progress;
mod schedule;
mod service;
mod session;
mod statistics;
mod workout;

pub use catalog::Catalog;
pub use category::{Category, RestDay, Weekday};
pub use error::{CreateError, ReadError, ServiceError, StorageError, ValidationError};
pub use name::{Name, NameError};
pub use note::NoteError;
pub use progress::ProgressLog;
pub use schedule::{PlannedDay, Schedule, Workout, next_monday};
pub use service::{Clock, Service, State, StateRepository, SystemClock};
pub use session::{Session, SessionExercise};
pub use statistics::{
    Analysis, DatedSet, Progression, Reason, Suggestion, analyze, suggest,
};
pub use workout::{
    CandidateSet, ExerciseLog, LoggedSet, Reps, RepsError, SetEntryError, Weight, WeightError,
    WorkoutRecord,
};
