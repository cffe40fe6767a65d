//! Core data types for rollbook.
//!
//! This module defines the persisted entities (students and attendance
//! records), the dataset that groups them, and the typed inputs used to
//! create and update them.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a student within the registry.
pub type StudentId = u64;

/// Identifier of an attendance record within the ledger.
pub type RecordId = u64;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// Whether a student attended on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// The student attended.
    Present,
    /// The student did not attend.
    Absent,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => f.pad("Present"),
            Self::Absent => f.pad("Absent"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            _ => Err(Error::invalid_input(format!(
                "unknown attendance status '{s}', expected Present or Absent"
            ))),
        }
    }
}

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Sequential identifier assigned at creation.
    pub id: StudentId,
    /// Display name.
    pub name: String,
    /// Institution roll number.
    pub roll_number: String,
    /// Contact email.
    pub email: String,
    /// Local time the student was registered.
    #[serde(with = "local_datetime")]
    pub created_date: NaiveDateTime,
}

/// A single attendance mark. Never modified once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Sequential identifier assigned at creation.
    pub id: RecordId,
    /// The student this mark refers to. May dangle after a student is deleted.
    pub student_id: StudentId,
    /// The day the mark applies to.
    pub date: NaiveDate,
    /// Present or absent.
    pub status: AttendanceStatus,
    /// Local time of day the mark was recorded.
    #[serde(with = "local_time")]
    pub time: NaiveTime,
}

/// The full persisted state: every student and every attendance record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Students in registration order.
    #[serde(default)]
    pub students: Vec<Student>,
    /// Attendance records in the order they were marked.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

impl Dataset {
    /// Id the next registered student receives.
    ///
    /// Ids are derived from the current count, so deleting a student and
    /// registering another can reuse an id that is still referenced by
    /// attendance records.
    #[must_use]
    pub fn next_student_id(&self) -> StudentId {
        self.students.len() as StudentId + 1
    }

    /// Id the next attendance record receives.
    #[must_use]
    pub fn next_record_id(&self) -> RecordId {
        self.attendance.len() as RecordId + 1
    }

    /// Find a student by id.
    #[must_use]
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Find a student by id for in-place modification.
    pub fn student_mut(&mut self, id: StudentId) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id == id)
    }

    /// All records belonging to one student, in storage order.
    #[must_use]
    pub fn records_for(&self, student_id: StudentId) -> Vec<AttendanceRecord> {
        self.attendance
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect()
    }
}

/// Fields required to register a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    /// Display name.
    pub name: String,
    /// Institution roll number.
    pub roll_number: String,
    /// Contact email.
    pub email: String,
}

impl NewStudent {
    /// Check that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a blank name or roll number, or a
    /// malformed email.
    pub fn validate(&self) -> Result<()> {
        require_non_blank("name", &self.name)?;
        require_non_blank("roll_number", &self.roll_number)?;
        require_email(&self.email)
    }
}

/// A partial update to a student. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New roll number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
    /// New email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl StudentUpdate {
    /// Check the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a supplied field would be rejected
    /// by [`NewStudent::validate`].
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_non_blank("name", name)?;
        }
        if let Some(roll_number) = &self.roll_number {
            require_non_blank("roll_number", roll_number)?;
        }
        if let Some(email) = &self.email {
            require_email(email)?;
        }
        Ok(())
    }

    /// Merge the supplied fields into `student`.
    pub fn apply(self, student: &mut Student) {
        if let Some(name) = self.name {
            student.name = name;
        }
        if let Some(roll_number) = self.roll_number {
            student.roll_number = roll_number;
        }
        if let Some(email) = self.email {
            student.email = email;
        }
    }

    /// True if no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.roll_number.is_none() && self.email.is_none()
    }
}

/// Fields used to mark attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttendance {
    /// The student being marked. Not checked against the registry.
    pub student_id: StudentId,
    /// Day of the mark; today when omitted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Present or absent.
    pub status: AttendanceStatus,
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_input(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_email(value: &str) -> Result<()> {
    if !EMAIL_PATTERN.is_match(value) {
        return Err(Error::invalid_input(format!(
            "email '{value}' is not a valid address"
        )));
    }
    Ok(())
}

/// `YYYY-MM-DD HH:MM:SS` timestamps.
mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// `HH:MM:SS` times of day.
mod local_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
