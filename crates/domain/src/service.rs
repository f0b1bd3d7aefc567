use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use rand::Rng;
use strum::IntoEnumIterator;

use crate::{
    Analysis, CandidateSet, Catalog, Category, CreateError, Name, ProgressLog, ReadError,
    Schedule, ServiceError, Session, SessionExercise, StorageError, Suggestion, ValidationError,
    Weekday, WorkoutRecord, analyze, suggest,
};

/// Everything that is persisted between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub catalog: Catalog,
    pub schedule: Schedule,
    pub progress: ProgressLog,
}

impl Default for State {
    fn default() -> Self {
        Self {
            catalog: Catalog::seeded(),
            schedule: Schedule::default(),
            progress: ProgressLog::default(),
        }
    }
}

pub trait StateRepository {
    /// Returns `None` if nothing has been stored yet.
    fn read_state(&self) -> Result<Option<State>, ReadError>;
    fn write_state(&self, state: &State) -> Result<(), StorageError>;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

macro_rules! log_on_error {
    ($result: expr, $action: literal, $entity: literal) => {{
        let result = $result;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

/// The planner state and the operations on it.
///
/// Every mutation is written through to the repository. If writing fails, the
/// mutation is kept in memory and the storage error is returned.
pub struct Service<R, C, G> {
    repository: R,
    clock: C,
    rng: G,
    state: State,
    session: Option<Session>,
}

impl<R, C, G> Service<R, C, G>
where
    R: StateRepository,
    C: Clock,
    G: Rng,
{
    /// Load the stored state, falling back to the defaults if it is missing or unreadable.
    ///
    /// Failing to write the defaults is logged only. The next successful change persists them.
    pub fn load(repository: R, clock: C, rng: G) -> Self {
        let (mut state, persist) = match repository.read_state() {
            Ok(Some(state)) => (state, false),
            Ok(None) => {
                info!("no stored state, starting with default exercises");
                (State::default(), true)
            }
            Err(ReadError::Decode(err)) => {
                warn!("discarding stored state: {err}");
                (State::default(), true)
            }
            Err(ReadError::Storage(err)) => {
                error!("failed to read state: {err}");
                (State::default(), false)
            }
        };

        state.schedule.sync_all(&state.catalog);

        let service = Self {
            repository,
            clock,
            rng,
            state,
            session: None,
        };

        if persist {
            let _ = service.persist();
        }

        service
    }

    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.state.catalog
    }

    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.state.schedule
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressLog {
        &self.state.progress
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn persist(&self) -> Result<(), StorageError> {
        log_on_error!(
            self.repository.write_state(&self.state),
            "write",
            "state"
        )
    }

    fn catalog_changed(&mut self) -> Result<(), StorageError> {
        self.state.schedule.sync_all(&self.state.catalog);
        self.persist()
    }

    pub fn add_exercise(
        &mut self,
        category: Category,
        name: &str,
    ) -> Result<&[Name], ServiceError> {
        if let Err(err) = self.state.catalog.add(category, name) {
            debug!("rejected exercise '{name}': {err}");
            return Err(err.into());
        }
        self.catalog_changed()?;
        Ok(self.state.catalog.exercises(category))
    }

    /// Returns `None` without touching storage if there is no exercise at `index`.
    pub fn remove_exercise(
        &mut self,
        category: Category,
        index: usize,
    ) -> Result<Option<Name>, StorageError> {
        let Some(removed) = self.state.catalog.remove(category, index) else {
            debug!("no {category} exercise at index {index}");
            return Ok(None);
        };
        self.catalog_changed()?;
        Ok(Some(removed))
    }

    pub fn remove_exercise_by_name(
        &mut self,
        category: Category,
        name: &str,
    ) -> Result<Option<Name>, StorageError> {
        let Some(removed) = self.state.catalog.remove_by_name(category, name) else {
            debug!("no {category} exercise named '{name}'");
            return Ok(None);
        };
        self.catalog_changed()?;
        Ok(Some(removed))
    }

    pub fn randomize(&mut self, day: Weekday) -> Result<&[Name], StorageError> {
        self.state
            .schedule
            .randomize(day, &self.state.catalog, &mut self.rng);
        self.persist()?;
        Ok(self.state.schedule.exercises(day))
    }

    pub fn randomize_all(&mut self) -> Result<&Schedule, StorageError> {
        for day in Weekday::iter() {
            self.state
                .schedule
                .randomize(day, &self.state.catalog, &mut self.rng);
        }
        self.persist()?;
        Ok(&self.state.schedule)
    }

    pub fn start_session(&mut self, day: Weekday) -> Result<&Session, ValidationError> {
        if let Some(session) = &self.session {
            return Err(ValidationError::SessionActive(session.day()));
        }
        let session = Session::start(day, self.state.schedule.exercises(day))?;
        Ok(&*self.session.insert(session))
    }

    pub fn record_set(
        &mut self,
        exercise_index: usize,
        set: CandidateSet,
    ) -> Result<&SessionExercise, ValidationError> {
        self.session
            .as_mut()
            .ok_or(ValidationError::NoSession)?
            .record_set(exercise_index, set)
    }

    /// Commit the session to the progress log.
    ///
    /// If nothing was logged the session stays active and nothing is written.
    pub fn complete_session(&mut self) -> Result<&WorkoutRecord, ServiceError> {
        let session = self.session.as_ref().ok_or(ValidationError::NoSession)?;
        let record = session.to_record(self.clock.now())?;
        self.session = None;
        info!(
            "logged {} workout with {} sets",
            record.day,
            record.num_sets()
        );
        self.state.progress.append(record);
        self.persist()?;
        Ok(&self.state.progress[self.state.progress.len() - 1])
    }

    pub fn cancel_session(&mut self) -> Option<Session> {
        self.session.take()
    }

    /// Append a record logged outside of a session, e.g. from a filled-in note.
    pub fn import_record(&mut self, record: WorkoutRecord) -> Result<&WorkoutRecord, CreateError> {
        if self
            .state
            .progress
            .contains_workout_on(record.day, record.timestamp.date_naive())
        {
            debug!(
                "workout for {} on {} already logged",
                record.day,
                record.timestamp.date_naive()
            );
            return Err(CreateError::Conflict);
        }
        self.state.progress.append(record);
        self.persist()?;
        Ok(&self.state.progress[self.state.progress.len() - 1])
    }

    #[must_use]
    pub fn recent_progress(&self, days: u32) -> Vec<&WorkoutRecord> {
        self.state.progress.within_days(self.clock.now(), days)
    }

    #[must_use]
    pub fn analyze(&self, days: u32) -> Analysis {
        analyze(self.recent_progress(days))
    }

    #[must_use]
    pub fn suggest(&self, exercise: &str) -> Option<Suggestion> {
        suggest(self.state.progress.iter(), exercise)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{ExerciseLog, LoggedSet, Reps, Weight};

    #[derive(Default, Clone)]
    struct MockRepository {
        stored: Rc<RefCell<Option<State>>>,
        writes: Rc<RefCell<u32>>,
        corrupt: bool,
        fail_writes: bool,
    }

    impl StateRepository for MockRepository {
        fn read_state(&self) -> Result<Option<State>, ReadError> {
            if self.corrupt {
                return Err(ReadError::Decode("expected value at line 1".into()));
            }
            Ok(self.stored.borrow().clone())
        }

        fn write_state(&self, state: &State) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::Other("disk full".into()));
            }
            *self.writes.borrow_mut() += 1;
            *self.stored.borrow_mut() = Some(state.clone());
            Ok(())
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap()
    }

    fn names(list: &[&str]) -> Vec<Name> {
        list.iter().map(|n| Name::new(n).unwrap()).collect()
    }

    fn set(weight: f32, reps: u32) -> CandidateSet {
        CandidateSet {
            weight: Weight::new(weight).unwrap(),
            reps,
        }
    }

    fn service(
        repository: MockRepository,
    ) -> Service<MockRepository, FixedClock, StdRng> {
        Service::load(repository, FixedClock(now()), StdRng::seed_from_u64(1))
    }

    fn stored(catalog: Catalog, schedule: Schedule) -> MockRepository {
        let repository = MockRepository::default();
        *repository.stored.borrow_mut() = Some(State {
            catalog,
            schedule,
            progress: ProgressLog::default(),
        });
        repository
    }

    #[test]
    fn test_load_empty_storage() {
        let repository = MockRepository::default();
        let service = service(repository.clone());

        assert_eq!(
            service.catalog().exercises(Category::Push),
            names(&[
                "Bench Press",
                "Overhead Press",
                "Incline Dumbbell Press",
                "Lateral Raises",
                "Tricep Dips"
            ])
        );
        assert!(service.progress().is_empty());
        assert_eq!(*repository.writes.borrow(), 1);
        assert_eq!(repository.stored.borrow().as_ref(), Some(service.state()));
    }

    #[test]
    fn test_load_corrupt_storage() {
        let repository = MockRepository {
            corrupt: true,
            ..MockRepository::default()
        };
        let service = service(repository.clone());

        assert_eq!(service.catalog(), &Catalog::seeded());
        assert_eq!(*repository.writes.borrow(), 1);
    }

    #[test]
    fn test_load_empty_storage_when_write_fails() {
        let repository = MockRepository {
            fail_writes: true,
            ..MockRepository::default()
        };
        let service = service(repository.clone());

        assert_eq!(service.catalog(), &Catalog::seeded());
        assert!(service.progress().is_empty());
        assert_eq!(*repository.writes.borrow(), 0);
        assert_eq!(*repository.stored.borrow(), None);
    }

    #[test]
    fn test_load_syncs_stale_schedule() {
        let mut schedule = Schedule::default();
        schedule.set(Weekday::Monday, names(&["A", "B"]));
        let service = service(stored(
            Catalog::new(names(&["A", "B", "C"]), vec![], vec![]),
            schedule,
        ));

        assert_eq!(
            service.schedule().exercises(Weekday::Monday),
            names(&["A", "B", "C"])
        );
    }

    #[test]
    fn test_add_exercise_resyncs_schedule() {
        let repository = stored(
            Catalog::new(names(&["A", "B"]), vec![], vec![]),
            Schedule::default(),
        );
        let mut service = service(repository.clone());

        assert_eq!(
            service.add_exercise(Category::Push, "C").unwrap(),
            names(&["A", "B", "C"])
        );
        assert_eq!(
            service.schedule().exercises(Weekday::Thursday),
            names(&["A", "B", "C"])
        );
        assert_eq!(*repository.writes.borrow(), 1);
    }

    #[test]
    fn test_add_duplicate_exercise() {
        let repository = stored(
            Catalog::new(names(&["A"]), vec![], vec![]),
            Schedule::default(),
        );
        let mut service = service(repository.clone());

        assert!(matches!(
            service.add_exercise(Category::Push, "A"),
            Err(ServiceError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert_eq!(service.catalog().exercises(Category::Push), names(&["A"]));
        assert_eq!(*repository.writes.borrow(), 0);
    }

    #[test]
    fn test_remove_exercise_out_of_range() {
        let repository = stored(
            Catalog::new(names(&["A", "B", "C"]), vec![], vec![]),
            Schedule::default(),
        );
        let mut service = service(repository.clone());

        assert_eq!(service.remove_exercise(Category::Push, 99).unwrap(), None);
        assert_eq!(
            service.catalog().exercises(Category::Push),
            names(&["A", "B", "C"])
        );
        assert_eq!(*repository.writes.borrow(), 0);
    }

    #[test]
    fn test_remove_exercise_resyncs_schedule() {
        let mut schedule = Schedule::default();
        schedule.set(Weekday::Monday, names(&["C", "B", "A"]));
        let repository = stored(
            Catalog::new(names(&["A", "B", "C"]), vec![], vec![]),
            schedule,
        );
        let mut service = service(repository.clone());

        assert_eq!(
            service.remove_exercise(Category::Push, 1).unwrap(),
            Some(Name::new("B").unwrap())
        );
        assert_eq!(
            service.schedule().exercises(Weekday::Monday),
            names(&["A", "C"])
        );
        assert_eq!(*repository.writes.borrow(), 1);
    }

    #[test]
    fn test_randomize() {
        let repository = stored(
            Catalog::new(vec![], vec![], names(&["A", "B", "C", "D"])),
            Schedule::default(),
        );
        let mut service = service(repository.clone());

        let mut exercises = service.randomize(Weekday::Wednesday).unwrap().to_vec();
        exercises.sort();

        assert_eq!(exercises, names(&["A", "B", "C", "D"]));
        assert_eq!(*repository.writes.borrow(), 1);
        assert!(
            service
                .schedule()
                .is_valid(Weekday::Wednesday, service.catalog())
        );
    }

    #[test]
    fn test_complete_session() {
        let repository = stored(
            Catalog::new(names(&["A", "B"]), vec![], vec![]),
            Schedule::default(),
        );
        let mut service = service(repository.clone());

        service.start_session(Weekday::Monday).unwrap();
        service.record_set(0, set(100.0, 10)).unwrap();
        service.record_set(1, set(0.0, 0)).unwrap();
        let record = service.complete_session().unwrap().clone();

        assert_eq!(
            record,
            WorkoutRecord {
                day: Weekday::Monday,
                timestamp: now(),
                exercises: vec![ExerciseLog {
                    name: Name::new("A").unwrap(),
                    sets: vec![LoggedSet {
                        weight: Weight::new(100.0).unwrap(),
                        reps: Reps::new(10).unwrap(),
                    }],
                }],
            }
        );
        assert_eq!(service.progress().len(), 1);
        assert!(service.session().is_none());
        assert_eq!(
            repository.stored.borrow().as_ref().map(|s| s.progress.len()),
            Some(1)
        );
    }

    #[test]
    fn test_complete_session_without_sets() {
        let repository = stored(
            Catalog::new(names(&["A", "B"]), vec![], vec![]),
            Schedule::default(),
        );
        let mut service = service(repository.clone());

        service.start_session(Weekday::Monday).unwrap();
        service.record_set(0, set(50.0, 0)).unwrap();

        assert!(matches!(
            service.complete_session(),
            Err(ServiceError::Validation(ValidationError::NothingLogged))
        ));
        assert!(service.progress().is_empty());
        assert!(service.session().is_some());
        assert_eq!(*repository.writes.borrow(), 0);
    }

    #[test]
    fn test_start_session_without_exercises() {
        let repository = stored(
            Catalog::new(names(&["A"]), vec![], vec![]),
            Schedule::default(),
        );
        let mut service = service(repository);

        assert_eq!(
            service.start_session(Weekday::Tuesday),
            Err(ValidationError::NoExercises(Weekday::Tuesday))
        );
        assert!(service.session().is_none());
    }

    #[test]
    fn test_start_session_twice() {
        let repository = stored(
            Catalog::new(names(&["A"]), names(&["B"]), vec![]),
            Schedule::default(),
        );
        let mut service = service(repository);

        service.start_session(Weekday::Monday).unwrap();

        assert_eq!(
            service.start_session(Weekday::Tuesday),
            Err(ValidationError::SessionActive(Weekday::Monday))
        );
        assert_eq!(service.session().map(Session::day), Some(Weekday::Monday));
    }

    #[test]
    fn test_cancel_session() {
        let repository = stored(
            Catalog::new(names(&["A"]), vec![], vec![]),
            Schedule::default(),
        );
        let mut service = service(repository.clone());

        service.start_session(Weekday::Monday).unwrap();
        service.record_set(0, set(100.0, 5)).unwrap();

        assert!(service.cancel_session().is_some());
        assert!(service.session().is_none());
        assert!(service.progress().is_empty());
        assert_eq!(*repository.writes.borrow(), 0);
        assert_eq!(
            service.record_set(0, set(100.0, 5)),
            Err(ValidationError::NoSession)
        );
    }

    #[test]
    fn test_mutation_kept_when_write_fails() {
        let repository = MockRepository {
            fail_writes: true,
            ..stored(Catalog::default(), Schedule::default())
        };
        let mut service = service(repository);

        assert!(matches!(
            service.add_exercise(Category::Legs, "Squats"),
            Err(ServiceError::Storage(_))
        ));
        assert_eq!(
            service.catalog().exercises(Category::Legs),
            names(&["Squats"])
        );
    }

    #[test]
    fn test_import_record_conflict() {
        let repository = stored(Catalog::default(), Schedule::default());
        let mut service = service(repository.clone());
        let record = WorkoutRecord {
            day: Weekday::Monday,
            timestamp: now(),
            exercises: vec![
                ExerciseLog::from_candidates(Name::new("A").unwrap(), &[set(20.0, 8)]).unwrap(),
            ],
        };

        assert!(service.import_record(record.clone()).is_ok());
        assert!(matches!(
            service.import_record(record),
            Err(CreateError::Conflict)
        ));
        assert_eq!(service.progress().len(), 1);
        assert_eq!(*repository.writes.borrow(), 1);
    }
}
