//! Task and appointment types exchanged with the Taskify API
//!
//! Entities (`Task`, `Appointment`) are what the server returns. Drafts
//! (`TaskDraft`, `AppointmentDraft`) are the request bodies for create and
//! update calls and carry the client-side validation rules.

use chrono::NaiveDateTime;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TaskifyError};

/// Completion state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Not yet done
    #[default]
    Todo,
    /// Completed
    Done,
}

impl TaskStatus {
    /// Parse a status from user input
    ///
    /// Accepts the wire names (`TODO`, `DONE`) case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskify::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::parse_str("done").unwrap(), TaskStatus::Done);
    /// assert!(TaskStatus::parse_str("later").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "TODO" => Ok(Self::Todo),
            "DONE" => Ok(Self::Done),
            other => Err(TaskifyError::Validation(format!(
                "Unknown task status: {}. Must be one of: TODO, DONE",
                other
            ))
            .into()),
        }
    }

    /// The opposite status
    pub fn toggled(self) -> Self {
        match self {
            Self::Todo => Self::Done,
            Self::Done => Self::Todo,
        }
    }

    /// Status label colored for terminal output
    pub fn colored_tag(&self) -> String {
        match self {
            Self::Todo => self.to_string().yellow().to_string(),
            Self::Done => self.to_string().green().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "TODO"),
            Self::Done => write!(f, "DONE"),
        }
    }
}

/// A task as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier
    pub id: i64,
    /// Short title, never blank
    pub title: String,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Completion state
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Draft carrying this task's current fields
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
        }
    }

    /// Draft with the status flipped and every other field unchanged
    ///
    /// # Examples
    ///
    /// ```
    /// use taskify::models::{Task, TaskStatus};
    ///
    /// let task = Task {
    ///     id: 1,
    ///     title: "X".to_string(),
    ///     description: None,
    ///     status: TaskStatus::Todo,
    /// };
    /// let draft = task.toggled();
    /// assert_eq!(draft.status, TaskStatus::Done);
    /// assert_eq!(draft.title, "X");
    /// ```
    pub fn toggled(&self) -> TaskDraft {
        TaskDraft {
            status: self.status.toggled(),
            ..self.to_draft()
        }
    }
}

/// Body of task create and update requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
}

impl TaskDraft {
    /// New `TODO` draft with the given title and no description
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
        }
    }

    /// Reject drafts the server would refuse
    ///
    /// # Errors
    ///
    /// Returns [`TaskifyError::Validation`] when the title is blank.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TaskifyError::Validation("Title is required".to_string()).into());
        }
        Ok(())
    }
}

/// An appointment as stored by the server
///
/// The server keeps zone-less local date-times, so `date` is naive and is
/// compared against local wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub subject: String,
    #[serde(with = "wire_date")]
    pub date: NaiveDateTime,
}

impl Appointment {
    /// Whether the appointment starts strictly after `now`
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.date > now
    }

    /// Draft carrying this appointment's current fields
    pub fn to_draft(&self) -> AppointmentDraft {
        AppointmentDraft {
            subject: self.subject.clone(),
            date: self.date,
        }
    }
}

/// Body of appointment create and update requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub subject: String,
    #[serde(with = "wire_date")]
    pub date: NaiveDateTime,
}

impl AppointmentDraft {
    /// Reject drafts the server would refuse
    ///
    /// # Errors
    ///
    /// Returns [`TaskifyError::Validation`] when the subject is blank.
    pub fn validate(&self) -> Result<()> {
        if self.subject.trim().is_empty() {
            return Err(TaskifyError::Validation("Subject is required".to_string()).into());
        }
        Ok(())
    }
}

const DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an appointment date typed on the command line
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]` and `YYYY-MM-DD HH:MM[:SS]`.
///
/// # Examples
///
/// ```
/// use taskify::models::parse_date;
///
/// let date = parse_date("2026-10-17 09:30").unwrap();
/// assert_eq!(date.to_string(), "2026-10-17 09:30:00");
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| {
            TaskifyError::Validation(format!(
                "Invalid date: {}. Expected YYYY-MM-DD HH:MM",
                input
            ))
            .into()
        })
}

/// Serde adapter for appointment dates
///
/// The server writes ISO local date-times and drops the seconds when they
/// are zero (`2026-10-17T09:30`), which chrono's default format rejects.
mod wire_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date-time: {}", raw)))
    }
}
