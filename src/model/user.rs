use super::team::TeamId;
use crate::error::LeagueError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type UserId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    LeagueManager,
    TeamManager,
    #[default]
    Observer,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::LeagueManager,
        Role::TeamManager,
        Role::Observer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::LeagueManager => "league_manager",
            Role::TeamManager => "team_manager",
            Role::Observer => "observer",
        }
    }
}

impl FromStr for Role {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "admin" => Ok(Role::Admin),
            "league_manager" => Ok(Role::LeagueManager),
            "team_manager" => Ok(Role::TeamManager),
            "observer" => Ok(Role::Observer),
            _ => Err(LeagueError::InvalidRole(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Opaque credential owned by the authentication layer
    #[serde(default)]
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub team_id: Option<TeamId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub team_id: Option<Option<TeamId>>,
}

impl User {
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(password) = update.password {
            self.password = password;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(team_id) = update.team_id {
            self.team_id = team_id;
        }
    }
}
