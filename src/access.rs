//! Role based permissions
//!
//! Authentication happens elsewhere. This module only decides whether an
//! already identified caller may perform an action.

use crate::error::{LeagueError, Result};
use crate::model::{Match, Role, TeamId, User, UserId};
use std::fmt;

/// The identity an action is performed as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Option<UserId>,
    pub role: Role,
    pub team_id: Option<TeamId>,
}

impl Caller {
    /// An administrator acting without a user record, e.g. from a local shell
    pub fn local_admin() -> Self {
        Self {
            user_id: None,
            role: Role::Admin,
            team_id: None,
        }
    }

    fn manages(&self, team_id: TeamId) -> bool {
        self.role == Role::TeamManager && self.team_id == Some(team_id)
    }
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Self {
            user_id: Some(user.id),
            role: user.role,
            team_id: user.team_id,
        }
    }
}

/// A mutation that is subject to the permission policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ManageUsers,
    CreateTeam,
    DeleteTeam,
    EditTeam { team_id: TeamId },
    /// Create, rename or delete a player of the given team
    ManagePlayer { team_id: TeamId },
    /// Create, edit, complete or delete a match
    ManageMatch,
    EditPair {
        home_team_id: TeamId,
        away_team_id: TeamId,
    },
    /// Nominate or withdraw a player of the given team
    Nominate { team_id: TeamId },
}

impl Action {
    pub fn edit_pair(fixture: &Match) -> Self {
        Action::EditPair {
            home_team_id: fixture.home_team_id,
            away_team_id: fixture.away_team_id,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ManageUsers => write!(f, "manage users"),
            Action::CreateTeam => write!(f, "create teams"),
            Action::DeleteTeam => write!(f, "delete teams"),
            Action::EditTeam { team_id } => write!(f, "edit team {}", team_id),
            Action::ManagePlayer { team_id } => write!(f, "manage players of team {}", team_id),
            Action::ManageMatch => write!(f, "manage matches"),
            Action::EditPair { home_team_id, away_team_id } => {
                write!(f, "edit pairs of {} v {}", home_team_id, away_team_id)
            }
            Action::Nominate { team_id } => write!(f, "nominate players of team {}", team_id),
        }
    }
}

/// Check `action` against the caller's role, failing with `Forbidden`
pub fn authorize(caller: &Caller, action: &Action) -> Result<()> {
    let allowed = match caller.role {
        Role::Admin => true,
        Role::Observer => false,
        Role::LeagueManager => !matches!(action, Action::ManageUsers),
        Role::TeamManager => match *action {
            Action::EditTeam { team_id }
            | Action::ManagePlayer { team_id }
            | Action::Nominate { team_id } => caller.manages(team_id),
            Action::EditPair { home_team_id, away_team_id } => {
                caller.manages(home_team_id) || caller.manages(away_team_id)
            }
            Action::ManageUsers
            | Action::CreateTeam
            | Action::DeleteTeam
            | Action::ManageMatch => false,
        },
    };

    if allowed {
        Ok(())
    } else {
        log::debug!("Denied {} to {:?}", action, caller);
        Err(LeagueError::Forbidden(format!(
            "{} may not {}",
            caller.role, action
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Role, team_id: Option<TeamId>) -> Caller {
        Caller {
            user_id: Some(1),
            role,
            team_id,
        }
    }

    const ALL_ACTIONS: [Action; 8] = [
        Action::ManageUsers,
        Action::CreateTeam,
        Action::DeleteTeam,
        Action::EditTeam { team_id: 1 },
        Action::ManagePlayer { team_id: 1 },
        Action::ManageMatch,
        Action::EditPair { home_team_id: 1, away_team_id: 2 },
        Action::Nominate { team_id: 1 },
    ];

    #[test]
    fn test_admin_may_do_everything() {
        for action in &ALL_ACTIONS {
            assert!(authorize(&Caller::local_admin(), action).is_ok());
        }
    }

    #[test]
    fn test_observer_may_do_nothing() {
        let observer = caller(Role::Observer, Some(1));
        for action in &ALL_ACTIONS {
            assert!(matches!(
                authorize(&observer, action),
                Err(LeagueError::Forbidden(_))
            ));
        }
    }

    #[test]
    fn test_league_manager_cannot_manage_users() {
        let manager = caller(Role::LeagueManager, None);
        assert!(authorize(&manager, &Action::ManageUsers).is_err());
        for action in &ALL_ACTIONS[1..] {
            assert!(authorize(&manager, action).is_ok());
        }
    }

    #[test]
    fn test_team_manager_own_team_only() {
        let captain = caller(Role::TeamManager, Some(2));

        assert!(authorize(&captain, &Action::EditTeam { team_id: 2 }).is_ok());
        assert!(authorize(&captain, &Action::EditTeam { team_id: 1 }).is_err());
        assert!(authorize(&captain, &Action::ManagePlayer { team_id: 2 }).is_ok());
        assert!(authorize(&captain, &Action::Nominate { team_id: 1 }).is_err());
        assert!(authorize(&captain, &Action::EditPair { home_team_id: 1, away_team_id: 2 }).is_ok());
        assert!(authorize(&captain, &Action::EditPair { home_team_id: 1, away_team_id: 3 }).is_err());
        assert!(authorize(&captain, &Action::ManageMatch).is_err());
        assert!(authorize(&captain, &Action::CreateTeam).is_err());
    }

    #[test]
    fn test_team_manager_without_team() {
        let captain = caller(Role::TeamManager, None);
        assert!(authorize(&captain, &Action::ManagePlayer { team_id: 1 }).is_err());
    }

    #[test]
    fn test_denial_message() {
        let err = authorize(&caller(Role::Observer, None), &Action::CreateTeam).unwrap_err();
        assert_eq!(err.to_string(), "Access denied: observer may not create teams");
    }
}
