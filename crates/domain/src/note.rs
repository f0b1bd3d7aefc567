//! Markdown notes for planning and logging workouts in a notes app.
//!
//! A weekly schedule can be exported as one document, or as one note per day.
//! Daily notes contain a set table per exercise which, once filled in, can be
//! parsed back into a workout record.

use std::{fmt::Write, str::FromStr, sync::LazyLock};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use thiserror::Error;

use crate::{
    CandidateSet, Category, ExerciseLog, Name, PlannedDay, Weekday, Weight, WorkoutRecord,
};

const ROWS_PER_TABLE: u32 = 4;

fn day_type(day: &PlannedDay) -> &'static str {
    day.workout.as_ref().map_or("Rest", |w| w.category.title())
}

/// Render a week as an overview table followed by the exercises of each day.
#[must_use]
pub fn week_markdown(week: &[PlannedDay], generated_at: NaiveDateTime) -> String {
    let (Some(first), Some(last)) = (week.first(), week.last()) else {
        return String::new();
    };

    let mut md = String::new();
    let _ = writeln!(
        md,
        "# Workout Schedule: {} - {}\n",
        first.date.format("%B %d"),
        last.date.format("%B %d, %Y")
    );
    let _ = writeln!(md, "*Generated: {}*\n", generated_at.format("%Y-%m-%d %H:%M"));
    md.push_str("## Weekly Overview\n\n");
    md.push_str("| Day | Type | Exercises |\n");
    md.push_str("|-----|------|-----------|\n");
    for day in week {
        let _ = writeln!(
            md,
            "| {} | {} | {} exercises |",
            day.date.format("%A"),
            day_type(day),
            day.workout.as_ref().map_or(0, |w| w.exercises.len())
        );
    }
    md.push_str("\n## Daily Workouts\n\n");

    for day in week {
        let _ = writeln!(
            md,
            "### {} - {}\n",
            day.date.format("%A, %B %d, %Y"),
            day_type(day)
        );
        match &day.workout {
            None => md.push_str("- **Rest Day** - Recovery and rest\n"),
            Some(workout) => {
                md.push_str("#### Exercises:\n\n");
                for (i, exercise) in workout.exercises.iter().enumerate() {
                    let _ = writeln!(md, "{}. **{exercise}**", i + 1);
                    md.push_str("   - Sets: \n   - Reps: \n   - Weight: \n\n");
                }
            }
        }
        md.push_str("---\n\n");
    }

    md
}

/// Render a single day with an empty set table per exercise.
#[must_use]
pub fn daily_note(day: &PlannedDay) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {}\n", day.date.format("%A, %B %d, %Y"));
    let _ = writeln!(md, "## Workout: {}\n", day_type(day));

    match &day.workout {
        None => md.push_str("- **Rest Day** - Recovery and rest\n"),
        Some(workout) => {
            md.push_str("### Exercises\n\n");
            for (i, exercise) in workout.exercises.iter().enumerate() {
                let _ = writeln!(md, "#### {}. {exercise}\n", i + 1);
                md.push_str("| Set | Weight | Reps | Notes |\n");
                md.push_str("|-----|--------|------|-------|\n");
                for set in 1..=ROWS_PER_TABLE {
                    let _ = writeln!(md, "| {set}   |        |      |       |");
                }
                md.push('\n');
            }
        }
    }

    md.push_str("---\n\n## Notes\n");
    md
}

#[must_use]
pub fn daily_note_file_name(day: &PlannedDay) -> String {
    format!("{} - {}.md", day.date.format("%Y-%m-%d"), day_type(day))
}

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("valid regex"));
static LONG_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]+day,\s+([A-Za-z]+)\s+(\d{1,2}),\s+(\d{4})").expect("valid regex")
});
static WORKOUT_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"## Workout:\s*(\w+)").expect("valid regex"));
static EXERCISE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^####\s*\d+\.\s*(.+?)\s*$").expect("valid regex"));
static SET_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\|\s*\d+\s*\|\s*(\d+(?:\.\d+)?)\s*\|\s*(\d+)\s*\|").expect("valid regex")
});

fn find_iso_date(text: &str) -> Option<NaiveDate> {
    ISO_DATE
        .captures_iter(text)
        .find_map(|c| NaiveDate::parse_from_str(&c[1], "%Y-%m-%d").ok())
}

fn find_long_date(text: &str) -> Option<NaiveDate> {
    let captures = LONG_DATE.captures(text)?;
    NaiveDate::parse_from_str(
        &format!("{} {} {}", &captures[1], &captures[2], &captures[3]),
        "%B %d %Y",
    )
    .ok()
}

/// Parse a filled-in daily note.
///
/// The date is taken from the file name if it contains one, otherwise from the
/// content. Only table rows with a weight and a positive number of reps count
/// as sets.
pub fn parse_daily_note(file_name: &str, content: &str) -> Result<WorkoutRecord, NoteError> {
    let date = find_iso_date(file_name)
        .or_else(|| find_iso_date(content))
        .or_else(|| find_long_date(content))
        .ok_or(NoteError::MissingDate)?;

    let workout_type = WORKOUT_TYPE
        .captures(content)
        .ok_or(NoteError::MissingWorkoutType)?[1]
        .to_string();
    let category = Category::from_str(&workout_type)
        .map_err(|_| NoteError::UnknownWorkoutType(workout_type.clone()))?;
    let day = Weekday::try_from(date.weekday()).map_err(|_| NoteError::RestDay(date))?;
    if day.category() != category {
        return Err(NoteError::WrongWorkoutType {
            date,
            expected: day.category(),
            found: category,
        });
    }

    let mut exercises: Vec<(Name, Vec<CandidateSet>)> = vec![];
    let mut in_exercise = false;

    for line in content.lines() {
        let line = line.trim();
        if let Some(captures) = EXERCISE_HEADER.captures(line) {
            in_exercise = match Name::new(&captures[1]) {
                Ok(name) => {
                    exercises.push((name, vec![]));
                    true
                }
                Err(_) => false,
            };
        } else if line.starts_with('#') || line.starts_with("---") {
            in_exercise = false;
        } else if in_exercise {
            if let (Some(captures), Some((_, sets))) = (SET_ROW.captures(line), exercises.last_mut())
            {
                sets.push(CandidateSet {
                    weight: Weight::try_from(&captures[1]).unwrap_or_default(),
                    reps: captures[2].parse().unwrap_or_default(),
                });
            }
        }
    }

    let exercises = exercises
        .into_iter()
        .filter_map(|(name, sets)| ExerciseLog::from_candidates(name, &sets))
        .collect::<Vec<_>>();

    if exercises.is_empty() {
        return Err(NoteError::NoSets);
    }

    Ok(WorkoutRecord {
        day,
        timestamp: date.and_time(NaiveTime::MIN).and_utc(),
        exercises,
    })
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    #[error("no date found (expected YYYY-MM-DD in the file name or content)")]
    MissingDate,
    #[error("no '## Workout: Type' header found")]
    MissingWorkoutType,
    #[error("unknown workout type '{0}'")]
    UnknownWorkoutType(String),
    #[error("{0} is a rest day")]
    RestDay(NaiveDate),
    #[error("{date} is a {expected} day, but the note describes a {found} workout")]
    WrongWorkoutType {
        date: NaiveDate,
        expected: Category,
        found: Category,
    },
    #[error("no exercise tables with weight and reps filled in")]
    NoSets,
}
