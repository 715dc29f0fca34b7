use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Location, VolunteerId};

/// Unique identifier for a help request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What kind of help is being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestCategory {
    Medical,
    Daily,
    Companionship,
    Transport,
    Other,
}

/// How quickly the request needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Emergency,
}

impl Urgency {
    pub fn is_urgent(&self) -> bool {
        matches!(self, Urgency::High | Urgency::Emergency)
    }
}

/// Workflow state of a help request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Cancelled)
    }

    /// Workflow table: pending -> accepted -> in_progress -> {completed,
    /// cancelled}, with cancellation also allowed from any non-terminal
    /// state. The data layer enforces this; stores stay permissive.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        match (self, next) {
            (Pending, Accepted) => true,
            (Accepted, InProgress) => true,
            (InProgress, Completed) => true,
            (Pending | Accepted | InProgress, Cancelled) => true,
            _ => false,
        }
    }
}

/// A request for assistance raised by an elder user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelpRequest {
    pub id: RequestId,
    pub requester_id: String,
    pub title: String,
    pub description: String,
    pub category: RequestCategory,
    pub urgency: Urgency,
    pub location: Location,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub assigned_volunteer: Option<VolunteerId>,
}

/// Fields a caller supplies when creating a request; the directory fills in
/// identity, status, and timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpRequestDraft {
    pub requester_id: String,
    pub title: String,
    pub description: String,
    pub category: RequestCategory,
    pub urgency: Urgency,
    pub location: Location,
}

/// Field-level update for a help request; `None` leaves a field untouched.
/// Applying a patch restamps `updated_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelpRequestPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<RequestCategory>,
    pub urgency: Option<Urgency>,
    pub location: Option<Location>,
    pub status: Option<RequestStatus>,
    pub assigned_volunteer: Option<VolunteerId>,
}

impl HelpRequestPatch {
    pub fn apply(&self, request: &mut HelpRequest) {
        if let Some(title) = &self.title {
            request.title = title.clone();
        }
        if let Some(description) = &self.description {
            request.description = description.clone();
        }
        if let Some(category) = self.category {
            request.category = category;
        }
        if let Some(urgency) = self.urgency {
            request.urgency = urgency;
        }
        if let Some(location) = &self.location {
            request.location = location.clone();
        }
        if let Some(status) = self.status {
            request.status = status;
        }
        if let Some(volunteer) = &self.assigned_volunteer {
            request.assigned_volunteer = Some(volunteer.clone());
        }
        request.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_classification() {
        assert!(!Urgency::Low.is_urgent());
        assert!(!Urgency::Medium.is_urgent());
        assert!(Urgency::High.is_urgent());
        assert!(Urgency::Emergency.is_urgent());
    }

    #[test]
    fn test_happy_path_transitions() {
        use RequestStatus::*;
        assert!(Pending.can_transition_to(Accepted));
        assert!(Accepted.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
    }

    #[test]
    fn test_cancellation_from_non_terminal_states() {
        use RequestStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Accepted.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Cancelled));
    }

    #[test]
    fn test_illegal_transitions_rejected() {
        use RequestStatus::*;
        assert!(!Pending.can_transition_to(InProgress));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Accepted.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!InProgress.can_transition_to(Accepted));
    }

    #[test]
    fn test_terminal_states() {
        assert!(RequestStatus::Completed.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
        assert!(!RequestStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&RequestStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
