//! The Signal aggregate.

use super::location::Location;
use crate::workflow::{State, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Priority of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

/// Category a signal is filed under, with the departments responsible for it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub main: String,
    pub sub: String,
    /// Department codes, e.g. `"STW"`.
    #[serde(default)]
    pub departments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Reporter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A free-text note attached to a signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A note to be created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub text: String,
    pub created_by: Option<String>,
}

impl NewNote {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_by: None,
        }
    }

    pub fn into_note(self, now: DateTime<Utc>) -> Note {
        Note {
            text: self.text,
            created_by: self.created_by,
            created_at: now,
        }
    }
}

/// An incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: i64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_extra: Option<String>,
    pub created_at: DateTime<Utc>,
    pub incident_date_start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_date_end: Option<DateTime<Utc>>,
    pub location: Location,
    #[serde(default)]
    pub priority: Priority,
    pub status: Status,
    #[serde(default)]
    pub category: CategoryAssignment,
    #[serde(default)]
    pub reporter: Reporter,
}

impl Signal {
    /// Public identifier, `SIA-<id>`.
    pub fn sia_id(&self) -> String {
        format!("SIA-{}", self.id)
    }

    pub fn state(&self) -> State {
        self.status.state
    }

    pub fn is_high_priority(&self) -> bool {
        self.priority == Priority::High
    }
}
