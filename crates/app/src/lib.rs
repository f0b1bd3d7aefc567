#![warn(clippy::pedantic)]

pub mod log;
mod settings;

pub use settings::{Settings, SettingsError, SettingsRepository, WeightUnit};
