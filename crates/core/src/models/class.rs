use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::StudioError;
use crate::models::slot::{ClassSlot, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassType {
    General,
    Special,
}

impl ClassType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassType::General => "General",
            ClassType::Special => "Special",
        }
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassType {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "General" => Ok(ClassType::General),
            "Special" => Ok(ClassType::Special),
            other => Err(StudioError::Validation(format!(
                "Unknown class type: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRecord {
    pub class_id: String,
    pub class_name: String,
    pub instructor_id: String,
    pub class_type: ClassType,
    pub description: Option<String>,
    pub slots: Vec<ClassSlot>,
    pub pay_rate: f64,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassRequest {
    pub class_id: String,
    pub class_name: String,
    pub instructor_id: String,
    pub class_type: ClassType,
    pub description: Option<String>,
    #[serde(default)]
    pub slots: Vec<ClassSlot>,
    pub pay_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassResponse {
    pub message: String,
    pub class: ClassRecord,
    pub confirmation_sent: bool,
}

/// 409 payload returned when a proposed class collides with an existing
/// active class. Carries everything the caller needs to branch into the
/// override flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConflictResponse {
    pub message: String,
    pub conflicting_class: ClassRecord,
    pub conflicting_slot: ClassSlot,
    pub suggested_alternatives: Vec<ClassSlot>,
}

/// Dropdown projection of an active class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSummary {
    pub class_id: String,
    pub class_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextIdResponse {
    pub next_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteClassResponse {
    pub message: String,
    pub class_id: String,
}

/// One row of the weekly schedule listing: a single slot of an active class
/// joined with its instructor's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub class_id: String,
    pub class_name: String,
    pub class_type: ClassType,
    pub instructor_name: String,
    pub day: Weekday,
    pub time: NaiveTime,
    pub duration_minutes: u16,
}
