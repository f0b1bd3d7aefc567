use std::{
    fs,
    io::{BufRead, Write},
    path::Path,
};

use anyhow::{Context, bail};
use chrono::{Datelike, Local, NaiveDate};
use log::{debug, error, info};
use ppling_app::{Settings, SettingsRepository, log::Repository as LogRepository};
use ppling_domain::{
    Category, Clock, CreateError, Service, StateRepository, Weekday, next_monday, note,
};
use rand::Rng;
use strum::IntoEnumIterator;

use crate::{
    args::{Command, SettingsCommand},
    display, interactive,
};

pub struct App<R, C, G, S> {
    pub service: Service<R, C, G>,
    pub settings_repository: S,
    pub settings: Settings,
    pub log: Box<dyn LogRepository>,
}

impl<R, C, G, S> App<R, C, G, S>
where
    R: StateRepository,
    C: Clock,
    G: Rng,
    S: SettingsRepository,
{
    pub fn new(
        service: Service<R, C, G>,
        settings_repository: S,
        log: Box<dyn LogRepository>,
    ) -> Self {
        let settings = settings_repository.read_settings().unwrap_or_else(|err| {
            error!("failed to read settings: {err}");
            Settings::default()
        });
        Self {
            service,
            settings_repository,
            settings,
            log,
        }
    }

    fn today(&self) -> NaiveDate {
        self.service.now().with_timezone(&Local).date_naive()
    }

    pub fn execute(
        &mut self,
        command: Command,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        match command {
            Command::List { category } => self.list(category, output),
            Command::Add { category, name } => self.add(category, &name.join(" "), output),
            Command::Remove { category, position } => self.remove(category, position, output),
            Command::RemoveName { category, name } => {
                self.remove_by_name(category, &name.join(" "), output)
            }
            Command::Schedule { day } => self.schedule(day, output),
            Command::Randomize { day, all } => self.randomize(if all { None } else { day }, output),
            Command::Generate {
                start_date,
                no_randomize,
                output: file,
                daily_notes,
            } => self.generate(
                start_date,
                no_randomize,
                file.as_deref(),
                daily_notes.as_deref(),
                output,
            ),
            Command::Log { day } => self.log_workout(day, input, output),
            Command::Import { file } => self.import(&file, output),
            Command::Progress { days } => self.progress(days, output),
            Command::Analyze { days, output: file } => {
                self.analyze(days, file.as_deref(), output)
            }
            Command::Suggest { exercise } => self.suggest(&exercise.join(" "), output),
            Command::Settings { command } => self.settings(command, output),
            Command::LogEntries => self.log_entries(output),
        }
    }

    fn list(&self, category: Option<Category>, output: &mut impl Write) -> anyhow::Result<()> {
        let categories = category.map_or_else(|| Category::iter().collect(), |c| vec![c]);
        for (i, category) in categories.into_iter().enumerate() {
            if i > 0 {
                writeln!(output)?;
            }
            write!(
                output,
                "{}",
                display::exercise_list(category, self.service.catalog().exercises(category))
            )?;
        }
        Ok(())
    }

    fn add(
        &mut self,
        category: Category,
        name: &str,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        let exercises = self.service.add_exercise(category, name)?;
        write!(output, "Added '{}' to {category} workouts.\n\n", name.trim())?;
        write!(output, "{}", display::exercise_list(category, exercises))?;
        Ok(())
    }

    fn remove(
        &mut self,
        category: Category,
        position: usize,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        let removed = match position.checked_sub(1) {
            Some(index) => self.service.remove_exercise(category, index)?,
            None => None,
        };
        let Some(name) = removed else {
            bail!("No {category} exercise at position {position}");
        };
        writeln!(output, "Removed '{name}' from {category} workouts.")?;
        Ok(())
    }

    fn remove_by_name(
        &mut self,
        category: Category,
        name: &str,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        let Some(removed) = self.service.remove_exercise_by_name(category, name)? else {
            bail!("'{}' not found in {category} workouts", name.trim());
        };
        writeln!(output, "Removed '{removed}' from {category} workouts.")?;
        Ok(())
    }

    fn schedule(&self, day: Option<Weekday>, output: &mut impl Write) -> anyhow::Result<()> {
        let days = day.map_or_else(|| Weekday::iter().collect(), |d| vec![d]);
        for (i, day) in days.into_iter().enumerate() {
            if i > 0 {
                writeln!(output)?;
            }
            write!(
                output,
                "{}",
                display::schedule_day(day, self.service.schedule().exercises(day))
            )?;
        }
        Ok(())
    }

    fn randomize(&mut self, day: Option<Weekday>, output: &mut impl Write) -> anyhow::Result<()> {
        if let Some(day) = day {
            self.service.randomize(day)?;
        } else {
            self.service.randomize_all()?;
        }
        self.schedule(day, output)
    }

    fn generate(
        &mut self,
        start_date: Option<NaiveDate>,
        no_randomize: bool,
        file: Option<&Path>,
        daily_notes: Option<&Path>,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        let start = start_date.unwrap_or_else(|| next_monday(self.today()));
        if self.settings.randomize_on_generate && !no_randomize {
            self.service.randomize_all()?;
        }
        let week = self.service.schedule().week(start);
        debug!("generating plan for the week starting {start}");

        if let Some(dir) = daily_notes {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            for day in &week {
                let path = dir.join(note::daily_note_file_name(day));
                fs::write(&path, note::daily_note(day))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                writeln!(output, "Generated {}", path.display())?;
            }
        }

        let markdown = note::week_markdown(
            &week,
            self.service.now().with_timezone(&Local).naive_local(),
        );
        match file {
            Some(path) => {
                fs::write(path, markdown)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                writeln!(output, "Generated {}", path.display())?;
            }
            None if daily_notes.is_none() => write!(output, "{markdown}")?,
            None => {}
        }
        Ok(())
    }

    fn log_workout(
        &mut self,
        day: Option<Weekday>,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        let day = match day {
            Some(day) => day,
            None => Weekday::try_from(self.today().weekday())?,
        };
        let outcome =
            interactive::log_workout(&mut self.service, day, &self.settings, input, output)?;
        debug!("interactive {day} workout finished: {outcome:?}");
        Ok(())
    }

    fn import(&mut self, file: &Path, output: &mut impl Write) -> anyhow::Result<()> {
        let content = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let record = note::parse_daily_note(&file_name, &content)
            .with_context(|| format!("failed to parse {}", file.display()))?;
        let (day, date) = (record.day, record.timestamp.date_naive());

        match self.service.import_record(record) {
            Ok(record) => {
                info!("imported {day} workout of {date}");
                writeln!(
                    output,
                    "Logged {} workout for {date} ({} exercises, {} sets).",
                    day.category().title(),
                    record.exercises.len(),
                    record.num_sets()
                )?;
                Ok(())
            }
            Err(CreateError::Conflict) => {
                bail!("A {} workout for {date} is already logged", day.title())
            }
            Err(CreateError::Storage(err)) => Err(err.into()),
        }
    }

    fn progress(&self, days: Option<u32>, output: &mut impl Write) -> anyhow::Result<()> {
        let days = days.unwrap_or(self.settings.analysis_days);
        let records = self.service.recent_progress(days);
        if records.is_empty() {
            writeln!(output, "No workouts logged in the last {days} days.")?;
            return Ok(());
        }
        for (i, record) in records.into_iter().enumerate() {
            if i > 0 {
                writeln!(output)?;
            }
            write!(output, "{}", display::record(record, &self.settings, &Local))?;
        }
        Ok(())
    }

    fn analyze(
        &self,
        days: Option<u32>,
        file: Option<&Path>,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        let days = days.unwrap_or(self.settings.analysis_days);
        let analysis = self.service.analyze(days);
        if analysis.workouts == 0 {
            writeln!(output, "No workout data found. Log some workouts first!")?;
            return Ok(());
        }
        let text = display::analysis(&analysis, days, &self.settings);
        match file {
            Some(path) => {
                fs::write(path, text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                writeln!(output, "Analysis saved to {}", path.display())?;
            }
            None => write!(output, "{text}")?,
        }
        Ok(())
    }

    fn suggest(&self, exercise: &str, output: &mut impl Write) -> anyhow::Result<()> {
        match self.service.suggest(exercise) {
            Some(suggestion) => write!(
                output,
                "{}",
                display::suggestion(&suggestion, &self.settings)
            )?,
            None => writeln!(output, "No data found for exercise: {}", exercise.trim())?,
        }
        Ok(())
    }

    fn settings(
        &mut self,
        command: SettingsCommand,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        if let SettingsCommand::Set { key, value } = command {
            self.settings.set(&key, &value)?;
            self.settings_repository
                .write_settings(self.settings)
                .map_err(anyhow::Error::msg)
                .context("failed to write settings")?;
        }
        for (key, value) in self.settings.entries() {
            writeln!(output, "{key} = {value}")?;
        }
        Ok(())
    }

    fn log_entries(&self, output: &mut impl Write) -> anyhow::Result<()> {
        let entries = self.log.read_entries()?;
        if entries.is_empty() {
            writeln!(output, "No log entries.")?;
        }
        for entry in entries.iter().rev() {
            writeln!(output, "{} {:<5} {}", entry.time, entry.level, entry.message)?;
        }
        Ok(())
    }
}
