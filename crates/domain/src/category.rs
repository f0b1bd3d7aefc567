use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Push,
    Pull,
    Legs,
}

impl Category {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Category::Push => "Push",
            Category::Pull => "Pull",
            Category::Legs => "Legs",
        }
    }
}

/// A training day of the week.
///
/// Sunday is a rest day and has no representation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Weekday::Monday | Weekday::Thursday => Category::Push,
            Weekday::Tuesday | Weekday::Friday => Category::Pull,
            Weekday::Wednesday | Weekday::Saturday => Category::Legs,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl TryFrom<chrono::Weekday> for Weekday {
    type Error = RestDay;

    fn try_from(value: chrono::Weekday) -> Result<Self, Self::Error> {
        match value {
            chrono::Weekday::Mon => Ok(Weekday::Monday),
            chrono::Weekday::Tue => Ok(Weekday::Tuesday),
            chrono::Weekday::Wed => Ok(Weekday::Wednesday),
            chrono::Weekday::Thu => Ok(Weekday::Thursday),
            chrono::Weekday::Fri => Ok(Weekday::Friday),
            chrono::Weekday::Sat => Ok(Weekday::Saturday),
            chrono::Weekday::Sun => Err(RestDay),
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Sunday is a rest day")]
pub struct RestDay;
