use std::io::{BufRead, Write};

use log::debug;
use ppling_app::Settings;
use ppling_domain::{
    CandidateSet, Clock, Service, ServiceError, StateRepository, ValidationError, Weekday,
};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Logged { exercises: usize, sets: usize },
    Cancelled,
    NothingLogged,
}

enum Input {
    Set(CandidateSet),
    Next,
    Quit,
}

fn read_input(input: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    set_number: usize,
) -> anyhow::Result<Input> {
    loop {
        write!(output, "    Set {set_number}: ")?;
        output.flush()?;
        let Some(line) = read_input(input)? else {
            return Ok(Input::Next);
        };
        match line.as_str() {
            "" => return Ok(Input::Next),
            "q" | "Q" => return Ok(Input::Quit),
            entry => match entry.parse::<CandidateSet>() {
                Ok(set) => return Ok(Input::Set(set)),
                Err(err) => writeln!(output, "    {err}")?,
            },
        }
    }
}

/// Log a workout for `day` by reading sets from `input`.
///
/// Each exercise of the day is prompted for in order. An empty line moves on to the next
/// exercise and `q` discards the whole workout.
pub fn log_workout<R, C, G>(
    service: &mut Service<R, C, G>,
    day: Weekday,
    settings: &Settings,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<Outcome>
where
    R: StateRepository,
    C: Clock,
    G: Rng,
{
    let exercises = service
        .start_session(day)?
        .exercises()
        .iter()
        .map(|e| e.name.clone())
        .collect::<Vec<_>>();

    writeln!(
        output,
        "Logging {} workout for {} (weight in {}).",
        day.category().title(),
        day.title(),
        settings.weight_unit
    )?;
    writeln!(
        output,
        "Enter sets as 'weight x reps', an empty line for the next exercise, 'q' to cancel."
    )?;

    for (index, name) in exercises.iter().enumerate() {
        writeln!(output, "\n{}. {name}", index + 1)?;
        let mut set_number = 1;
        loop {
            match prompt(input, output, set_number)? {
                Input::Set(set) => {
                    service.record_set(index, set)?;
                    set_number += 1;
                }
                Input::Next => break,
                Input::Quit => {
                    service.cancel_session();
                    writeln!(output, "\nWorkout discarded.")?;
                    return Ok(Outcome::Cancelled);
                }
            }
        }
    }

    match service.complete_session() {
        Ok(record) => {
            let outcome = Outcome::Logged {
                exercises: record.exercises.len(),
                sets: record.num_sets(),
            };
            writeln!(output, "\nWorkout logged successfully!")?;
            Ok(outcome)
        }
        Err(ServiceError::Validation(ValidationError::NothingLogged)) => {
            debug!("discarding {day} workout without sets");
            service.cancel_session();
            writeln!(output, "\n{}", ValidationError::NothingLogged)?;
            Ok(Outcome::NothingLogged)
        }
        Err(err) => Err(err.into()),
    }
}
