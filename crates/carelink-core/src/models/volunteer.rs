use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Location;

/// Unique identifier for a volunteer, assigned by the directory backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VolunteerId(pub String);

impl fmt::Display for VolunteerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VolunteerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// When a volunteer is available to take requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub weekdays: Vec<Weekday>,

    /// Daily window, e.g. "09:00-17:00"
    pub hours: String,
}

/// A registered helper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub name: String,
    pub phone: String,
    pub location: Location,

    /// Ordered as provided by the directory; duplicates allowed
    pub skills: Vec<String>,

    /// Average rating in [0, 5]
    pub rating: f32,

    pub online: bool,
    pub availability: Availability,
}

impl Volunteer {
    /// Exact string membership test against the skill list
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

/// Field-level update for a volunteer record; `None` leaves a field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolunteerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<Location>,
    pub skills: Option<Vec<String>>,
    pub rating: Option<f32>,
    pub online: Option<bool>,
    pub availability: Option<Availability>,
}

impl VolunteerPatch {
    pub fn apply(&self, volunteer: &mut Volunteer) {
        if let Some(name) = &self.name {
            volunteer.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            volunteer.phone = phone.clone();
        }
        if let Some(location) = &self.location {
            volunteer.location = location.clone();
        }
        if let Some(skills) = &self.skills {
            volunteer.skills = skills.clone();
        }
        if let Some(rating) = self.rating {
            volunteer.rating = rating;
        }
        if let Some(online) = self.online {
            volunteer.online = online;
        }
        if let Some(availability) = &self.availability {
            volunteer.availability = availability.clone();
        }
    }
}
