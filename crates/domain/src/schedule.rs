use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use rand::{Rng, seq::SliceRandom};
use strum::IntoEnumIterator;

use crate::{Catalog, Category, Name, Weekday};

/// The exercises planned for each training day.
///
/// A day's list is derived from the catalog but may be reordered independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule(BTreeMap<Weekday, Vec<Name>>);

impl Default for Schedule {
    fn default() -> Self {
        Self(Weekday::iter().map(|d| (d, vec![])).collect())
    }
}

impl Schedule {
    #[must_use]
    pub fn exercises(&self, day: Weekday) -> &[Name] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn set(&mut self, day: Weekday, exercises: Vec<Name>) {
        self.0.insert(day, exercises);
    }

    /// Whether the day's list is an ordering of the catalog's list for the day's category.
    #[must_use]
    pub fn is_valid(&self, day: Weekday, catalog: &Catalog) -> bool {
        let planned = self.exercises(day);
        let current = catalog.exercises(day.category());
        planned.len() == current.len() && current.iter().all(|e| planned.contains(e))
    }

    /// Replace a stale day with the catalog order. Returns whether the day changed.
    pub fn sync(&mut self, day: Weekday, catalog: &Catalog) -> bool {
        if !self.exercises(day).is_empty() && self.is_valid(day, catalog) {
            return false;
        }
        let current = catalog.exercises(day.category()).to_vec();
        let changed = self.exercises(day) != current.as_slice();
        self.set(day, current);
        changed
    }

    pub fn sync_all(&mut self, catalog: &Catalog) {
        for day in Weekday::iter() {
            self.sync(day, catalog);
        }
    }

    /// Assign a uniformly random ordering of the catalog's exercises to a day.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        day: Weekday,
        catalog: &Catalog,
        rng: &mut R,
    ) -> &[Name] {
        let mut exercises = catalog.exercises(day.category()).to_vec();
        exercises.shuffle(rng);
        self.set(day, exercises);
        self.exercises(day)
    }

    /// Lay out the seven days starting at `start`, using the weekday of each date.
    #[must_use]
    pub fn week(&self, start: NaiveDate) -> Vec<PlannedDay> {
        (0..7)
            .filter_map(|offset| start.checked_add_days(Days::new(offset)))
            .map(|date| PlannedDay {
                date,
                workout: Weekday::try_from(date.weekday()).ok().map(|day| Workout {
                    day,
                    category: day.category(),
                    exercises: self.exercises(day).to_vec(),
                }),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDay {
    pub date: NaiveDate,
    /// `None` on the rest day.
    pub workout: Option<Workout>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub day: Weekday,
    pub category: Category,
    pub exercises: Vec<Name>,
}

/// The first Monday strictly after `today`.
#[must_use]
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = match (7 - today.weekday().num_days_from_monday()) % 7 {
        0 => 7,
        n => n,
    };
    today
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .unwrap_or(today)
}
