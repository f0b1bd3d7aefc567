use log::warn;

use crate::{Category, Name, NameError, ValidationError};

const DEFAULT_PUSH: [&str; 5] = [
    "Bench Press",
    "Overhead Press",
    "Incline Dumbbell Press",
    "Lateral Raises",
    "Tricep Dips",
];

const DEFAULT_PULL: [&str; 5] = [
    "Pull-ups",
    "Barbell Rows",
    "Cable Rows",
    "Face Pulls",
    "Barbell Curls",
];

const DEFAULT_LEGS: [&str; 5] = [
    "Squats",
    "Romanian Deadlifts",
    "Leg Press",
    "Leg Curls",
    "Calf Raises",
];

/// The exercises of each category in workout order.
///
/// No list contains the same name twice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    push: Vec<Name>,
    pull: Vec<Name>,
    legs: Vec<Name>,
}

impl Catalog {
    /// Build a catalog from stored lists, keeping the first occurrence of a repeated name.
    #[must_use]
    pub fn new(push: Vec<Name>, pull: Vec<Name>, legs: Vec<Name>) -> Self {
        let mut catalog = Catalog::default();
        for (category, names) in [
            (Category::Push, push),
            (Category::Pull, pull),
            (Category::Legs, legs),
        ] {
            for name in names {
                if catalog.contains(category, &name) {
                    warn!("ignoring duplicate exercise '{name}' in {category} workouts");
                    continue;
                }
                catalog.exercises_mut(category).push(name);
            }
        }
        catalog
    }

    /// The catalog a new user starts with.
    #[must_use]
    pub fn seeded() -> Self {
        let names = |list: &[&str]| {
            list.iter()
                .map(|n| Name::new(n))
                .collect::<Result<Vec<_>, NameError>>()
                .unwrap_or_default()
        };
        Catalog {
            push: names(&DEFAULT_PUSH),
            pull: names(&DEFAULT_PULL),
            legs: names(&DEFAULT_LEGS),
        }
    }

    #[must_use]
    pub fn exercises(&self, category: Category) -> &[Name] {
        match category {
            Category::Push => &self.push,
            Category::Pull => &self.pull,
            Category::Legs => &self.legs,
        }
    }

    fn exercises_mut(&mut self, category: Category) -> &mut Vec<Name> {
        match category {
            Category::Push => &mut self.push,
            Category::Pull => &mut self.pull,
            Category::Legs => &mut self.legs,
        }
    }

    #[must_use]
    pub fn contains(&self, category: Category, name: &Name) -> bool {
        self.exercises(category).contains(name)
    }

    /// Append an exercise to the end of a category.
    pub fn add(&mut self, category: Category, name: &str) -> Result<&[Name], ValidationError> {
        let name = Name::new(name).map_err(|_| ValidationError::EmptyName)?;

        if self.contains(category, &name) {
            return Err(ValidationError::Duplicate {
                category,
                name: name.to_string(),
            });
        }

        self.exercises_mut(category).push(name);

        Ok(self.exercises(category))
    }

    /// Remove the exercise at `index`. Returns `None` if there is no such position.
    pub fn remove(&mut self, category: Category, index: usize) -> Option<Name> {
        let exercises = self.exercises_mut(category);
        if index < exercises.len() {
            Some(exercises.remove(index))
        } else {
            None
        }
    }

    pub fn remove_by_name(&mut self, category: Category, name: &str) -> Option<Name> {
        let index = self
            .exercises(category)
            .iter()
            .position(|n| n == name.trim())?;
        self.remove(category, index)
    }
}
