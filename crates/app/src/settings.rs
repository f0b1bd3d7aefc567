use ppling_domain::Weight;
use strum::{Display, EnumString};

pub trait SettingsRepository {
    fn read_settings(&self) -> Result<Settings, String>;
    fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub weight_unit: WeightUnit,
    /// Length of the window used by `progress` and `analyze` if no explicit one is given.
    pub analysis_days: u32,
    pub randomize_on_generate: bool,
}

impl Settings {
    #[must_use]
    pub fn format_weight(&self, weight: Weight) -> String {
        format!("{weight} {}", self.weight_unit)
    }

    /// Change a single setting given in the textual form used on the command line.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let invalid = || SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "weight-unit" => self.weight_unit = value.parse().map_err(|_| invalid())?,
            "analysis-days" => {
                self.analysis_days = value
                    .parse()
                    .ok()
                    .filter(|days| *days > 0)
                    .ok_or_else(invalid)?;
            }
            "randomize-on-generate" => {
                self.randomize_on_generate = value.parse().map_err(|_| invalid())?;
            }
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("weight-unit", self.weight_unit.to_string()),
            ("analysis-days", self.analysis_days.to_string()),
            (
                "randomize-on-generate",
                self.randomize_on_generate.to_string(),
            ),
        ]
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Kg,
            analysis_days: 30,
            randomize_on_generate: true,
        }
    }
}

#[derive(
    serde::Serialize,
    serde::Deserialize,
    Display,
    EnumString,
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Unknown setting '{0}'")]
    UnknownKey(String),
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}
