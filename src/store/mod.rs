//! Data access for league state
//!
//! Every computation in this crate reads and writes through a [`LeagueStore`]
//! handle passed in by the caller. Two implementations are provided: an
//! in-memory store and a JSON file store that persists after every mutation.

pub mod json;
pub mod memory;
pub mod tables;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::model::{
    Match, MatchId, MatchScore, MatchUpdate, NewMatch, NewUser, Nomination, Pair, PairId,
    PairUpdate, Player, PlayerId, Team, TeamDetails, TeamId, User, UserId, UserUpdate,
};

/// Read/write access to teams, players, matches, pairs, nominations and users.
///
/// Getters return `Ok(None)` for unknown ids; updates and deletes of unknown
/// ids fail with `LeagueError::NotFound`. Serialising concurrent writers is
/// the implementation's responsibility.
pub trait LeagueStore {
    /// All teams, sorted by name
    fn teams(&self) -> Result<Vec<Team>>;
    fn team(&self, id: TeamId) -> Result<Option<Team>>;
    fn create_team(&mut self, details: TeamDetails) -> Result<Team>;
    fn update_team(&mut self, id: TeamId, details: TeamDetails) -> Result<Team>;
    /// Removes the team with its players and matches
    fn delete_team(&mut self, id: TeamId) -> Result<()>;

    /// Players sorted by name, optionally restricted to one team
    fn players(&self, team_id: Option<TeamId>) -> Result<Vec<Player>>;
    fn player(&self, id: PlayerId) -> Result<Option<Player>>;
    fn create_player(&mut self, team_id: TeamId, name: &str) -> Result<Player>;
    fn rename_player(&mut self, id: PlayerId, name: &str) -> Result<Player>;
    /// Removes the player, emptying any pair slot that referenced it
    fn delete_player(&mut self, id: PlayerId) -> Result<()>;

    /// All matches, most recent date first
    fn matches(&self) -> Result<Vec<Match>>;
    fn fixture(&self, id: MatchId) -> Result<Option<Match>>;
    /// Creates the match together with its nine empty pairs
    fn create_match(&mut self, new: NewMatch) -> Result<Match>;
    fn update_match(&mut self, id: MatchId, update: MatchUpdate) -> Result<Match>;
    fn set_match_score(&mut self, id: MatchId, score: MatchScore) -> Result<Match>;
    fn delete_match(&mut self, id: MatchId) -> Result<()>;

    /// Pairs of one match ordered by pair number
    fn pairs(&self, match_id: MatchId) -> Result<Vec<Pair>>;
    fn all_pairs(&self) -> Result<Vec<Pair>>;
    fn pair(&self, id: PairId) -> Result<Option<Pair>>;
    fn update_pair(&mut self, id: PairId, update: PairUpdate) -> Result<Pair>;

    fn nominations(&self, match_id: MatchId) -> Result<Vec<Nomination>>;
    /// Returns false if the nomination already existed
    fn add_nomination(&mut self, match_id: MatchId, player_id: PlayerId) -> Result<bool>;
    /// Returns false if there was nothing to remove
    fn remove_nomination(&mut self, match_id: MatchId, player_id: PlayerId) -> Result<bool>;

    /// All users, sorted by username
    fn users(&self) -> Result<Vec<User>>;
    fn user(&self, id: UserId) -> Result<Option<User>>;
    fn user_by_username(&self, username: &str) -> Result<Option<User>>;
    fn create_user(&mut self, new: NewUser) -> Result<User>;
    fn update_user(&mut self, id: UserId, update: UserUpdate) -> Result<User>;
    fn delete_user(&mut self, id: UserId) -> Result<()>;
}
