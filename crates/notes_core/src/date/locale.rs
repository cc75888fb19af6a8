//! Display locales supported by the date codec.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Russian dates are written with the genitive month form ("6 мая 2025").
const RUSSIAN_MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

const RUSSIAN_MONTHS_NOMINATIVE: [&str; 12] = [
    "январь",
    "февраль",
    "март",
    "апрель",
    "май",
    "июнь",
    "июль",
    "август",
    "сентябрь",
    "октябрь",
    "ноябрь",
    "декабрь",
];

/// Locale used to render and read human-facing dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    English,
    Russian,
}

impl Locale {
    /// Every locale the codec understands.
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Russian];

    /// Returns the primary language tag (`en`, `ru`).
    pub fn tag(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Russian => "ru",
        }
    }

    /// Returns the label shown when a task has no deadline.
    pub fn no_deadline_label(self) -> &'static str {
        match self {
            Self::English => "No deadline",
            Self::Russian => "Без срока",
        }
    }

    /// Returns the month name used when formatting. `month` is 1-based.
    pub(crate) fn month_name(self, month: u32) -> &'static str {
        let index = month.clamp(1, 12) as usize - 1;
        match self {
            Self::English => ENGLISH_MONTHS[index],
            Self::Russian => RUSSIAN_MONTHS_GENITIVE[index],
        }
    }

    /// Resolves a month name (case-insensitive) to its 1-based number.
    pub(crate) fn month_number(self, name: &str) -> Option<u32> {
        let wanted = name.to_lowercase();
        let tables: &[&[&str; 12]] = match self {
            Self::English => &[&ENGLISH_MONTHS],
            Self::Russian => &[&RUSSIAN_MONTHS_GENITIVE, &RUSSIAN_MONTHS_NOMINATIVE],
        };

        tables.iter().find_map(|table| {
            table
                .iter()
                .position(|candidate| candidate.to_lowercase() == wanted)
                .map(|index| index as u32 + 1)
        })
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Unknown or unsupported locale tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleError(pub String);

impl Display for LocaleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported locale `{}`; expected en|ru", self.0)
    }
}

impl Error for LocaleError {}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Accepts a bare language tag or a region-qualified one (`ru-RU`, `en_GB`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let language = trimmed
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Ok(Self::English),
            "ru" => Ok(Self::Russian),
            _ => Err(LocaleError(trimmed.to_string())),
        }
    }
}
