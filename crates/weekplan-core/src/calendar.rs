use crate::error::{PlannerError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// ISO 8601 week arithmetic
// ---------------------------------------------------------------------------

/// The Thursday of the ISO week containing `date`. Its calendar year is the
/// ISO week-year of `date`.
fn thursday_of_week(date: NaiveDate) -> NaiveDate {
    let from_monday = i64::from(date.weekday().num_days_from_monday());
    date - Duration::days(from_monday) + Duration::days(3)
}

/// First Thursday of the calendar year that `date` falls in.
fn first_thursday_of_year(date: NaiveDate) -> NaiveDate {
    let jan1 = date - Duration::days(i64::from(date.ordinal0()));
    let ahead = (7 + 3 - i64::from(jan1.weekday().num_days_from_monday())) % 7;
    jan1 + Duration::days(ahead)
}

/// ISO week number (1..=53) of `date`: the week holding the date's Thursday,
/// counted from the week holding the first Thursday of that year.
pub fn iso_week(date: NaiveDate) -> u32 {
    let thursday = thursday_of_week(date);
    let first = first_thursday_of_year(thursday);
    1 + ((thursday - first).num_days() / 7) as u32
}

/// ISO week-year of `date`. Differs from the calendar year for a few days
/// around Dec 31 / Jan 1.
pub fn iso_week_year(date: NaiveDate) -> i32 {
    thursday_of_week(date).year()
}

/// Number of ISO weeks in `year`: 53 when Dec 31 lands in week 53, else 52.
pub fn weeks_in_year(year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, 12, 31).map_or(52, |dec31| {
        if iso_week(dec31) == 53 {
            53
        } else {
            52
        }
    })
}

/// Format a week key as `YYYY-WW`.
pub fn week_key(year: i32, week: u32) -> String {
    format!("{year:04}-{week:02}")
}

// ---------------------------------------------------------------------------
// WeekKey
// ---------------------------------------------------------------------------

/// A validated ISO (year, week) pair. Orders chronologically and serializes
/// as the `YYYY-WW` string used for document map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    pub fn new(year: i32, week: u32) -> Result<Self> {
        if !(1..=9999).contains(&year) || week < 1 || week > weeks_in_year(year) {
            return Err(PlannerError::InvalidWeek { year, week });
        }
        Ok(Self { year, week })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: iso_week_year(date),
            week: iso_week(date),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn week(self) -> u32 {
        self.week
    }

    /// The following week, rolling into week 1 after the last real week of
    /// the year (52 or 53). `None` past the last week of year 9999.
    pub fn checked_succ(self) -> Option<Self> {
        if self.week < weeks_in_year(self.year) {
            Some(Self {
                year: self.year,
                week: self.week + 1,
            })
        } else if self.year < 9999 {
            Some(Self {
                year: self.year + 1,
                week: 1,
            })
        } else {
            None
        }
    }

    /// The preceding week, rolling back into the last week of the prior year.
    /// `None` before week 1 of year 1.
    pub fn checked_pred(self) -> Option<Self> {
        if self.week > 1 {
            Some(Self {
                year: self.year,
                week: self.week - 1,
            })
        } else if self.year > 1 {
            let year = self.year - 1;
            Some(Self {
                year,
                week: weeks_in_year(year),
            })
        } else {
            None
        }
    }

    /// Like [`WeekKey::checked_succ`], saturating at the last representable week.
    pub fn succ(self) -> Self {
        self.checked_succ().unwrap_or(self)
    }

    /// Like [`WeekKey::checked_pred`], saturating at `0001-01`.
    pub fn pred(self) -> Self {
        self.checked_pred().unwrap_or(self)
    }
}

static WEEK_KEY_RE: OnceLock<Regex> = OnceLock::new();

fn week_key_re() -> &'static Regex {
    WEEK_KEY_RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap())
}

impl FromStr for WeekKey {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = week_key_re()
            .captures(s)
            .ok_or_else(|| PlannerError::InvalidWeekKey(s.to_string()))?;
        let year: i32 = caps[1]
            .parse()
            .map_err(|_| PlannerError::InvalidWeekKey(s.to_string()))?;
        let week: u32 = caps[2]
            .parse()
            .map_err(|_| PlannerError::InvalidWeekKey(s.to_string()))?;
        WeekKey::new(year, week)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&week_key(self.year, self.week))
    }
}

impl Serialize for WeekKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// `count` consecutive week keys starting at (`start_year`, `start_week`).
///
/// Rolls over using the real week count of each year, so week 53 is neither
/// skipped nor invented. Fails with `InvalidWeek` when the start is outside
/// `1..=weeks_in_year(start_year)`; callers stepping backwards should use
/// [`WeekKey::pred`] rather than passing zero or negative weeks.
pub fn generate_week_range(start_week: u32, start_year: i32, count: usize) -> Result<Vec<WeekKey>> {
    let start = WeekKey::new(start_year, start_week)?;
    Ok(std::iter::successors(Some(start), |k| k.checked_succ())
        .take(count)
        .collect())
}

/// `past` weeks before `current` (oldest first), `current`, then `future`
/// weeks after it.
pub fn week_window(current: WeekKey, past: usize, future: usize) -> Vec<WeekKey> {
    let mut before: Vec<WeekKey> = std::iter::successors(Some(current), |k| k.checked_pred())
        .skip(1)
        .take(past)
        .collect();
    before.reverse();
    before.extend(
        std::iter::successors(Some(current), |k| k.checked_succ()).take(future + 1),
    );
    before
}

/// Week key of the given local date.
pub fn current_week_key(today: NaiveDate) -> WeekKey {
    WeekKey::from_date(today)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
