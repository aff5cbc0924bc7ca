use std::fmt;
use std::str::FromStr;

use crate::error::DayError;

pub const FIRST_DAY: u32 = 1;
pub const LAST_DAY: u32 = 25;

/// A challenge day, always within 1..=25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Day(u8);

impl Day {
    pub fn new(n: u32) -> Result<Self, DayError> {
        if (FIRST_DAY..=LAST_DAY).contains(&n) {
            Ok(Day(n as u8))
        } else {
            Err(DayError::InvalidDay(n.to_string()))
        }
    }

    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    /// Folder and file stem: `1` → `"01"`.
    pub fn padded(self) -> String {
        format!("{:02}", self.0)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Day {
    type Err = DayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|_| DayError::InvalidDay(s.to_string()))?;
        Day::new(n)
    }
}
