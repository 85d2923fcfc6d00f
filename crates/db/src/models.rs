use chrono::{DateTime, NaiveTime, Utc};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studiohub_core::models::class::{ClassRecord, ClassType, ScheduleEntry};
use studiohub_core::models::customer::CustomerRecord;
use studiohub_core::models::instructor::InstructorRecord;
use studiohub_core::models::slot::{ClassSlot, Weekday};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClass {
    pub class_id: String,
    pub class_name: String,
    pub instructor_id: String,
    pub class_type: String,
    pub description: Option<String>,
    pub pay_rate: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClassSlot {
    pub class_id: String,
    pub position: i32,
    pub day: String,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbInstructor {
    pub instructor_id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub preferred_contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCustomer {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub senior: bool,
    pub address: Option<String>,
    pub preferred_contact: Option<String>,
    pub class_balance: i32,
    pub created_at: DateTime<Utc>,
}

/// One row of the schedule listing query: a class slot joined with its
/// class and (when still present) the instructor's name.
#[derive(Debug, Clone, FromRow)]
pub struct DbScheduleRow {
    pub class_id: String,
    pub class_name: String,
    pub class_type: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub day: String,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
}

impl DbClass {
    /// Assembles the domain record from the class row and its slot rows.
    pub fn into_record(self, slots: Vec<DbClassSlot>) -> Result<ClassRecord> {
        let slots = slots
            .into_iter()
            .map(DbClassSlot::into_slot)
            .collect::<Result<Vec<_>>>()?;

        Ok(ClassRecord {
            class_id: self.class_id,
            class_name: self.class_name,
            instructor_id: self.instructor_id,
            class_type: parse_class_type(&self.class_type)?,
            description: self.description,
            slots,
            pay_rate: self.pay_rate,
            active: self.active,
        })
    }
}

impl DbClassSlot {
    pub fn into_slot(self) -> Result<ClassSlot> {
        Ok(ClassSlot {
            day: parse_weekday(&self.day)?,
            time: self.start_time,
            duration_minutes: u16::try_from(self.duration_minutes)
                .map_err(|_| eyre!("stored duration out of range: {}", self.duration_minutes))?,
        })
    }
}

impl DbInstructor {
    pub fn into_record(self) -> InstructorRecord {
        InstructorRecord {
            instructor_id: self.instructor_id,
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            phone: self.phone,
            address: self.address,
            preferred_contact: self.preferred_contact,
        }
    }
}

impl DbCustomer {
    pub fn into_record(self) -> CustomerRecord {
        CustomerRecord {
            customer_id: self.customer_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            senior: self.senior,
            address: self.address,
            preferred_contact: self.preferred_contact,
            class_balance: self.class_balance,
        }
    }
}

impl DbScheduleRow {
    pub fn into_entry(self) -> Result<ScheduleEntry> {
        let instructor_name = [self.firstname, self.lastname]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        Ok(ScheduleEntry {
            class_id: self.class_id,
            class_name: self.class_name,
            class_type: parse_class_type(&self.class_type)?,
            instructor_name,
            day: parse_weekday(&self.day)?,
            time: self.start_time,
            duration_minutes: u16::try_from(self.duration_minutes)
                .map_err(|_| eyre!("stored duration out of range: {}", self.duration_minutes))?,
        })
    }
}

fn parse_weekday(s: &str) -> Result<Weekday> {
    s.parse::<Weekday>()
        .map_err(|_| eyre!("stored weekday is malformed: {s}"))
}

fn parse_class_type(s: &str) -> Result<ClassType> {
    s.parse::<ClassType>()
        .map_err(|_| eyre!("stored class type is malformed: {s}"))
}
