use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use ppling_domain::{Category, Weekday};

/// Plan and log a push/pull/legs training week
#[derive(Parser, Debug)]
#[command(name = "ppling", version, long_about = None)]
pub struct Cli {
    /// Directory holding the workout data, settings and log
    #[arg(long, env = "PPLING_DATA_DIR", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List the exercises of each workout type
    List {
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Add an exercise to a workout type
    Add {
        category: Category,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Remove an exercise by its position as shown by `list`
    Remove { category: Category, position: usize },
    /// Remove an exercise by name
    RemoveName {
        category: Category,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Show the exercise order of each training day
    Schedule {
        #[arg(short, long)]
        day: Option<Weekday>,
    },
    /// Shuffle the exercise order of a day
    Randomize {
        #[arg(required_unless_present = "all")]
        day: Option<Weekday>,
        /// Shuffle all training days
        #[arg(long, conflicts_with = "day")]
        all: bool,
    },
    /// Generate a markdown plan for a week
    Generate {
        /// First day of the week (defaults to next Monday)
        #[arg(long, value_name = "YYYY-MM-DD")]
        start_date: Option<NaiveDate>,
        /// Keep the current exercise order
        #[arg(long)]
        no_randomize: bool,
        /// Write the weekly plan to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Write one note per day into a directory
        #[arg(long, value_name = "DIR")]
        daily_notes: Option<PathBuf>,
    },
    /// Log a workout interactively
    Log {
        /// Training day (defaults to today)
        #[arg(short, long)]
        day: Option<Weekday>,
    },
    /// Log a workout from a filled-in daily note
    Import { file: PathBuf },
    /// Show logged workouts
    Progress {
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Compare first and latest sets of each exercise
    Analyze {
        #[arg(short, long)]
        days: Option<u32>,
        /// Write the analysis to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Suggest the next target for an exercise
    Suggest {
        #[arg(required = true, num_args = 1..)]
        exercise: Vec<String>,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// Show recent log messages
    LogEntries,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SettingsCommand {
    Show,
    /// Change a setting (weight-unit, analysis-days, randomize-on-generate)
    Set { key: String, value: String },
}
