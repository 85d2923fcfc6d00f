use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::StudioError;

/// Day of the week a class meets on, serialized in its short form
/// (`"Mon"` .. `"Sun"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    /// Position within the week (Mon = 0), used to order schedule listings.
    pub fn ordinal(&self) -> u8 {
        match self {
            Weekday::Mon => 0,
            Weekday::Tue => 1,
            Weekday::Wed => 2,
            Weekday::Thu => 3,
            Weekday::Fri => 4,
            Weekday::Sat => 5,
            Weekday::Sun => 6,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mon" => Ok(Weekday::Mon),
            "Tue" => Ok(Weekday::Tue),
            "Wed" => Ok(Weekday::Wed),
            "Thu" => Ok(Weekday::Thu),
            "Fri" => Ok(Weekday::Fri),
            "Sat" => Ok(Weekday::Sat),
            "Sun" => Ok(Weekday::Sun),
            other => Err(StudioError::Validation(format!(
                "Unknown weekday: {other}"
            ))),
        }
    }
}

/// One weekly occurrence of a class: day, wall-clock start time, and length
/// in minutes. Two slots collide when they share (day, time); duration is
/// not part of the collision key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSlot {
    pub day: Weekday,
    pub time: NaiveTime,
    pub duration_minutes: u16,
}

impl ClassSlot {
    pub const MIN_DURATION_MINUTES: u16 = 15;
    pub const MAX_DURATION_MINUTES: u16 = 180;

    pub fn new(day: Weekday, time: NaiveTime, duration_minutes: u16) -> Self {
        Self {
            day,
            time,
            duration_minutes,
        }
    }

    /// Collision identity is (day, time) only.
    pub fn collides_with(&self, other: &ClassSlot) -> bool {
        self.day == other.day && self.time == other.time
    }

    pub fn duration_in_range(&self) -> bool {
        (Self::MIN_DURATION_MINUTES..=Self::MAX_DURATION_MINUTES)
            .contains(&self.duration_minutes)
    }
}
