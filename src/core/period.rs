use std::{
    fmt::{Debug, Display, Formatter},
    ops::RangeInclusive,
    str::FromStr,
};

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::prelude::*;

/// User-facing label of a billing month, for example `Jan/2024`.
///
/// Labels are not required to be unique nor chronological.
#[derive(Clone, Eq, PartialEq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Period(String);

impl Period {
    pub const YEARS: RangeInclusive<u16> = 2000..=2100;

    /// Compose the label from a month name and a year as `{month}/{year}`.
    pub fn try_from_month_year(month: &str, year: u16) -> Result<Self> {
        let month = month.trim();
        ensure!(!month.is_empty(), "month name must not be empty");
        ensure!(
            Self::YEARS.contains(&year),
            "year {year} is outside of {}..={}",
            Self::YEARS.start(),
            Self::YEARS.end(),
        );
        Ok(Self(format!("{month}/{year}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(label: &str) -> Result<Self> {
        let label = label.trim();
        ensure!(!label.is_empty(), "period label must not be empty");
        Ok(Self(label.to_owned()))
    }
}
