use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TeamId = u32;
pub type PlayerId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub home_day: String,
    #[serde(default)]
    pub home_time: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating or editing a team
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamDetails {
    pub name: String,
    pub home_day: String,
    pub home_time: String,
    pub address: String,
}

impl TeamDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_home_day(mut self, day: impl Into<String>) -> Self {
        self.home_day = day.into();
        self
    }

    pub fn with_home_time(mut self, time: impl Into<String>) -> Self {
        self.home_time = time.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }
}

impl Team {
    pub fn from_details(id: TeamId, details: TeamDetails) -> Self {
        Self {
            id,
            name: details.name,
            home_day: details.home_day,
            home_time: details.home_time,
            address: details.address,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, details: TeamDetails) {
        self.name = details.name;
        self.home_day = details.home_day;
        self.home_time = details.home_time;
        self.address = details.address;
    }

    /// One-line description of when and where the team plays at home
    pub fn venue(&self) -> String {
        let mut parts = Vec::new();

        if !self.home_day.is_empty() {
            parts.push(self.home_day.clone());
        }
        if !self.home_time.is_empty() {
            parts.push(self.home_time.clone());
        }
        if !self.address.is_empty() {
            parts.push(self.address.clone());
        }

        parts.join(" • ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team_id: TeamId,
    pub name: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn new(id: PlayerId, team_id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            team_id,
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}
