use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_YEAR_MIN: i32 = 1970;
pub const DEFAULT_YEAR_MAX: i32 = 2024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YearRangeError {
    #[error("start year {start} is after end year {end}")]
    Inverted { start: i32, end: i32 },

    #[error("year {year} is outside the allowed range {min}-{max}")]
    OutOfBounds { year: i32, min: i32, max: i32 },
}

/// Inclusive release-year window. `start <= end` always holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawYearRange")]
pub struct YearRange {
    start: i32,
    end: i32,
}

/// Unchecked wire form; deserialization goes through [`YearRange::new`]
#[derive(Deserialize)]
struct RawYearRange {
    start: i32,
    end: i32,
}

impl TryFrom<RawYearRange> for YearRange {
    type Error = YearRangeError;

    fn try_from(raw: RawYearRange) -> Result<Self, Self::Error> {
        YearRange::new(raw.start, raw.end)
    }
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, YearRangeError> {
        if start > end {
            return Err(YearRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a range that must also sit inside `bounds`
    pub fn within(start: i32, end: i32, bounds: YearRange) -> Result<Self, YearRangeError> {
        for year in [start, end] {
            if !bounds.contains(year) {
                return Err(YearRangeError::OutOfBounds { year, min: bounds.start, max: bounds.end });
            }
        }
        Self::new(start, end)
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Pull both ends inside `bounds`, keeping `start <= end`
    pub fn clamp_to(&self, bounds: YearRange) -> YearRange {
        let start = self.start.clamp(bounds.start, bounds.end);
        let end = self.end.clamp(start, bounds.end);
        YearRange { start, end }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self { start: DEFAULT_YEAR_MIN, end: DEFAULT_YEAR_MAX }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
