use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

// Persisted field names stay camelCase so stored payloads read exactly like
// the records the UI shell exchanges with us.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub first_name: String,
    pub surname: String,
    /// External unique identifier. Checked for uniqueness when the member is
    /// created and frozen afterwards.
    pub its_number: String,
    /// Free-form house tag; the demo roster uses Red/Blue/Green/Yellow.
    pub house_color: String,
    pub address: String,
    pub mobile_number: String,
    pub grade: String,
    pub class_division: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// `HH:mm`
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "PRESENT")]
    Present,
    #[serde(rename = "ABSENT")]
    Absent,
    #[serde(rename = "LATE")]
    Late,
}

impl AttendanceStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PRESENT" => Some(Self::Present),
            "ABSENT" => Some(Self::Absent),
            "LATE" => Some(Self::Late),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Record id for storage; the logical key is (sessionId, memberId).
    pub id: String,
    pub session_id: String,
    pub member_id: String,
    pub status: AttendanceStatus,
    /// Epoch millis of the last mutation.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    InvalidDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field {field} is missing"),
            Self::InvalidDate(value) => {
                write!(f, "date must be a calendar date (YYYY-MM-DD), got `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

impl Member {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::MissingField("firstName"));
        }
        if self.its_number.trim().is_empty() {
            return Err(ValidationError::MissingField("itsNumber"));
        }
        Ok(())
    }
}

impl Session {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.date.trim().is_empty() {
            return Err(ValidationError::MissingField("date"));
        }
        if NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").is_err() {
            return Err(ValidationError::InvalidDate(self.date.clone()));
        }
        Ok(())
    }
}
