//! On-duty request entity definitions.

use serde::{Deserialize, Serialize};

use crate::Student;

/// Status of an on-duty request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OdStatus {
    /// Awaiting faculty decision.
    #[default]
    Pending,
    /// Approved by faculty.
    Approved,
    /// Rejected by faculty.
    Rejected,
}

impl OdStatus {
    /// Converts the status to its display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Parses a status from its display string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Approved" => Some(Self::Approved),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Approved and Rejected are final.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Only `Pending -> Approved` and `Pending -> Rejected` are legal.
    pub fn can_transition_to(&self, next: OdStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

impl std::fmt::Display for OdStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields a student fills in when asking for on-duty leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOdRequest {
    pub reason: String,
    pub event: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub description: String,
}

impl NewOdRequest {
    pub fn new(
        reason: impl Into<String>,
        event: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            reason: reason.into(),
            event: event.into(),
            date: date.into(),
            time: None,
            description: description.into(),
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

/// A stored on-duty request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OdRequest {
    /// Sequential display id (`OD-001`, `OD-002`, ...).
    pub id: String,
    /// Copy of the requesting student's identity.
    pub student: Student,
    pub reason: String,
    pub event: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub status: OdStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OdRequest {
    /// Formats the display id for the `position`-th request (1-based).
    pub fn sequential_id(position: usize) -> String {
        format!("OD-{position:03}")
    }

    /// Creates a pending request at the given 1-based position.
    pub fn new(position: usize, fields: NewOdRequest, student: Student) -> Self {
        Self {
            id: Self::sequential_id(position),
            student,
            reason: fields.reason,
            event: fields.event,
            date: fields.date,
            time: fields.time,
            status: OdStatus::Pending,
            description: Some(fields.description),
        }
    }
}
