use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single to-do entry.
///
/// Field names match the stored JSON exactly, so lists written by earlier
/// versions load without migration. Optional fields are empty strings rather
/// than `Option`s for the same reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub label: String,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        deadline: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            deadline: deadline.into(),
            label: label.into(),
        }
    }

    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }

    pub fn has_deadline(&self) -> bool {
        !self.deadline.is_empty()
    }

    /// Parse the deadline as a calendar date. Accepts `YYYY-MM-DD` as well as
    /// a full RFC 3339 timestamp, in which case only its date part is kept.
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        let raw = self.deadline.trim();
        if raw.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    /// Short deadline for list rows, e.g. "Jun 1". Unparseable deadlines are
    /// shown as typed.
    pub fn deadline_display(&self) -> Option<String> {
        if !self.has_deadline() {
            return None;
        }
        match self.deadline_date() {
            Some(date) => Some(date.format("%b %-d").to_string()),
            None => Some(self.deadline.clone()),
        }
    }
}
