//! Calendar month names
//!
//! The ledger is keyed by the twelve Portuguese month names. They are the
//! JSON keys of persisted state and the MONTH column of the spreadsheet, so
//! the spelling here is part of the data format.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the twelve canonical months, ordered January to December
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "Janeiro")]
    January,
    #[serde(rename = "Fevereiro")]
    February,
    #[serde(rename = "Março")]
    March,
    #[serde(rename = "Abril")]
    April,
    #[serde(rename = "Maio")]
    May,
    #[serde(rename = "Junho")]
    June,
    #[serde(rename = "Julho")]
    July,
    #[serde(rename = "Agosto")]
    August,
    #[serde(rename = "Setembro")]
    September,
    #[serde(rename = "Outubro")]
    October,
    #[serde(rename = "Novembro")]
    November,
    #[serde(rename = "Dezembro")]
    December,
}

impl Month {
    /// All months in canonical order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// The canonical (persisted) name of the month
    pub const fn name(&self) -> &'static str {
        match self {
            Month::January => "Janeiro",
            Month::February => "Fevereiro",
            Month::March => "Março",
            Month::April => "Abril",
            Month::May => "Maio",
            Month::June => "Junho",
            Month::July => "Julho",
            Month::August => "Agosto",
            Month::September => "Setembro",
            Month::October => "Outubro",
            Month::November => "Novembro",
            Month::December => "Dezembro",
        }
    }

    /// Calendar number, 1 for January
    pub fn number(&self) -> u32 {
        Self::ALL
            .iter()
            .position(|m| m == self)
            .map(|i| i as u32 + 1)
            .unwrap_or(1)
    }

    /// Look a month up by its exact canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }

    /// Look a month up by calendar number (1-12)
    pub fn from_number(number: u32) -> Option<Self> {
        if (1..=12).contains(&number) {
            Some(Self::ALL[number as usize - 1])
        } else {
            None
        }
    }

    /// The month of today's local date
    pub fn current() -> Self {
        Self::from_number(Local::now().month()).unwrap_or(Month::January)
    }
}

/// The year of today's local date
pub fn current_year() -> i32 {
    Local::now().year()
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Month {
    type Err = String;

    /// Lenient parsing for user input: canonical name in any case, or 1-12
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(number) = s.parse::<u32>() {
            return Self::from_number(number).ok_or_else(|| format!("Invalid month number: {}", s));
        }

        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().to_lowercase() == lower)
            .ok_or_else(|| format!("Unknown month: {}", s))
    }
}
