use std::fmt::{Display, Write};

use chrono::TimeZone;
use ppling_app::Settings;
use ppling_domain::{Analysis, Category, Name, Suggestion, Weekday, Weight, WorkoutRecord};

pub fn exercise_list(category: Category, exercises: &[Name]) -> String {
    let mut text = format!("{}:\n", category.title());
    if exercises.is_empty() {
        text.push_str("  (no exercises)\n");
    }
    for (i, exercise) in exercises.iter().enumerate() {
        let _ = writeln!(text, "  {}. {exercise}", i + 1);
    }
    text
}

pub fn schedule_day(day: Weekday, exercises: &[Name]) -> String {
    let mut text = format!("{} - {}\n", day.title(), day.category().title());
    if exercises.is_empty() {
        text.push_str("  (no exercises)\n");
    }
    for (i, exercise) in exercises.iter().enumerate() {
        let _ = writeln!(text, "  {}. {exercise}", i + 1);
    }
    text
}

fn set(settings: &Settings, weight: Weight, reps: impl Display) -> String {
    format!("{} x {reps}", settings.format_weight(weight))
}

pub fn record<Tz>(record: &WorkoutRecord, settings: &Settings, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut text = format!(
        "{} - {} {} ({} sets, volume {:.1})\n",
        record.timestamp.with_timezone(tz).format("%Y-%m-%d %H:%M"),
        record.day.title(),
        record.day.category().title(),
        record.num_sets(),
        record.volume()
    );
    for exercise in &record.exercises {
        let sets = exercise
            .sets
            .iter()
            .map(|s| set(settings, s.weight, s.reps))
            .collect::<Vec<_>>();
        let _ = writeln!(text, "  {}: {}", exercise.name, sets.join(", "));
    }
    text
}

pub fn analysis(analysis: &Analysis, days: u32, settings: &Settings) -> String {
    let mut text = format!(
        "Workouts in the last {days} days: {}\n",
        analysis.workouts
    );
    if analysis.progressions.is_empty() {
        text.push_str("Not enough sets logged to show progress.\n");
        return text;
    }
    text.push('\n');
    for progression in &analysis.progressions {
        let _ = writeln!(
            text,
            "{}: {} -> {} (weight {:+.1}, volume {:+.1})",
            progression.exercise,
            set(settings, progression.first.weight, progression.first.reps),
            set(settings, progression.latest.weight, progression.latest.reps),
            progression.weight_change(),
            progression.volume_change()
        );
    }
    text
}

pub fn suggestion(suggestion: &Suggestion, settings: &Settings) -> String {
    format!(
        "Exercise: {}\nCurrent: {} ({})\nSuggestion: {}\nReason: {}\n",
        suggestion.exercise,
        set(settings, suggestion.current.weight, suggestion.current.reps),
        suggestion.current.timestamp.format("%Y-%m-%d"),
        set(settings, suggestion.weight, suggestion.reps),
        suggestion.reason
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use ppling_domain::{ExerciseLog, LoggedSet, Reps, analyze, suggest};

    fn names(list: &[&str]) -> Vec<Name> {
        list.iter().map(|n| Name::new(n).unwrap()).collect()
    }

    fn record_fixture(day: u32, weight: f32, reps: u32) -> WorkoutRecord {
        WorkoutRecord {
            day: Weekday::Monday,
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 18, 30, 0).unwrap(),
            exercises: vec![ExerciseLog {
                name: Name::new("Bench Press").unwrap(),
                sets: vec![LoggedSet {
                    weight: Weight::new(weight).unwrap(),
                    reps: Reps::new(reps).unwrap(),
                }],
            }],
        }
    }

    #[test]
    fn test_exercise_list() {
        assert_eq!(
            exercise_list(Category::Pull, &names(&["Pull-ups", "Face Pulls"])),
            "Pull:\n  1. Pull-ups\n  2. Face Pulls\n"
        );
        assert_eq!(
            exercise_list(Category::Legs, &[]),
            "Legs:\n  (no exercises)\n"
        );
    }

    #[test]
    fn test_schedule_day() {
        assert_eq!(
            schedule_day(Weekday::Saturday, &names(&["Squats"])),
            "Saturday - Legs\n  1. Squats\n"
        );
    }

    #[test]
    fn test_record() {
        assert_eq!(
            record(&record_fixture(1, 102.5, 8), &Settings::default(), &Utc),
            "2024-01-01 18:30 - Monday Push (1 sets, volume 820.0)\n  Bench Press: 102.5 kg x 8\n"
        );
    }

    #[test]
    fn test_analysis() {
        let records = [record_fixture(1, 100.0, 5), record_fixture(8, 105.0, 5)];
        assert_eq!(
            analysis(&analyze(&records), 30, &Settings::default()),
            "Workouts in the last 30 days: 2\n\n\
             Bench Press: 100 kg x 5 -> 105 kg x 5 (weight +5.0, volume +25.0)\n"
        );
    }

    #[test]
    fn test_analysis_without_progressions() {
        assert_eq!(
            analysis(&analyze(&[] as &[WorkoutRecord]), 7, &Settings::default()),
            "Workouts in the last 7 days: 0\nNot enough sets logged to show progress.\n"
        );
    }

    #[test]
    fn test_suggestion() {
        let records = [record_fixture(8, 100.0, 12)];
        assert_eq!(
            suggestion(
                &suggest(&records, "bench press").unwrap(),
                &Settings::default()
            ),
            "Exercise: Bench Press\n\
             Current: 100 kg x 12 (2024-01-08)\n\
             Suggestion: 105 kg x 8\n\
             Reason: High reps achieved, increase weight\n"
        );
    }
}
