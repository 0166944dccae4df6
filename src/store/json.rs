use super::memory::MemoryStore;
use super::tables::DataFile;
use super::LeagueStore;
use crate::error::Result;
use crate::model::{
    Match, MatchId, MatchScore, MatchUpdate, NewMatch, NewUser, Nomination, Pair, PairId,
    PairUpdate, Player, PlayerId, Team, TeamDetails, TeamId, User, UserId, UserUpdate,
};
use std::fs;
use std::path::{Path, PathBuf};

/// A store backed by a single JSON document, rewritten after every mutation
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open a data file. A missing file yields an empty league that is
    /// written on the first mutation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let inner = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let data: DataFile = serde_json::from_str(&content)?;
            log::debug!(
                "Loaded {} teams, {} players, {} matches from {}",
                data.teams.len(),
                data.players.len(),
                data.matches.len(),
                path.display()
            );
            MemoryStore::from_tables(data)
        } else {
            log::debug!("{} does not exist, starting empty", path.display());
            MemoryStore::new()
        };

        Ok(Self { path, inner })
    }

    /// Create an empty data file, replacing anything at the path
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            inner: MemoryStore::new(),
        };
        store.save()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.inner.to_tables())?;
        fs::write(&self.path, json)?;
        log::debug!("Saved league data to {}", self.path.display());
        Ok(())
    }

    fn persist<T>(&mut self, result: Result<T>) -> Result<T> {
        let value = result?;
        self.save()?;
        Ok(value)
    }
}

impl LeagueStore for JsonFileStore {
    fn teams(&self) -> Result<Vec<Team>> {
        self.inner.teams()
    }

    fn team(&self, id: TeamId) -> Result<Option<Team>> {
        self.inner.team(id)
    }

    fn create_team(&mut self, details: TeamDetails) -> Result<Team> {
        let result = self.inner.create_team(details);
        self.persist(result)
    }

    fn update_team(&mut self, id: TeamId, details: TeamDetails) -> Result<Team> {
        let result = self.inner.update_team(id, details);
        self.persist(result)
    }

    fn delete_team(&mut self, id: TeamId) -> Result<()> {
        let result = self.inner.delete_team(id);
        self.persist(result)
    }

    fn players(&self, team_id: Option<TeamId>) -> Result<Vec<Player>> {
        self.inner.players(team_id)
    }

    fn player(&self, id: PlayerId) -> Result<Option<Player>> {
        self.inner.player(id)
    }

    fn create_player(&mut self, team_id: TeamId, name: &str) -> Result<Player> {
        let result = self.inner.create_player(team_id, name);
        self.persist(result)
    }

    fn rename_player(&mut self, id: PlayerId, name: &str) -> Result<Player> {
        let result = self.inner.rename_player(id, name);
        self.persist(result)
    }

    fn delete_player(&mut self, id: PlayerId) -> Result<()> {
        let result = self.inner.delete_player(id);
        self.persist(result)
    }

    fn matches(&self) -> Result<Vec<Match>> {
        self.inner.matches()
    }

    fn fixture(&self, id: MatchId) -> Result<Option<Match>> {
        self.inner.fixture(id)
    }

    fn create_match(&mut self, new: NewMatch) -> Result<Match> {
        let result = self.inner.create_match(new);
        self.persist(result)
    }

    fn update_match(&mut self, id: MatchId, update: MatchUpdate) -> Result<Match> {
        let result = self.inner.update_match(id, update);
        self.persist(result)
    }

    fn set_match_score(&mut self, id: MatchId, score: MatchScore) -> Result<Match> {
        let result = self.inner.set_match_score(id, score);
        self.persist(result)
    }

    fn delete_match(&mut self, id: MatchId) -> Result<()> {
        let result = self.inner.delete_match(id);
        self.persist(result)
    }

    fn pairs(&self, match_id: MatchId) -> Result<Vec<Pair>> {
        self.inner.pairs(match_id)
    }

    fn all_pairs(&self) -> Result<Vec<Pair>> {
        self.inner.all_pairs()
    }

    fn pair(&self, id: PairId) -> Result<Option<Pair>> {
        self.inner.pair(id)
    }

    fn update_pair(&mut self, id: PairId, update: PairUpdate) -> Result<Pair> {
        let result = self.inner.update_pair(id, update);
        self.persist(result)
    }

    fn nominations(&self, match_id: MatchId) -> Result<Vec<Nomination>> {
        self.inner.nominations(match_id)
    }

    fn add_nomination(&mut self, match_id: MatchId, player_id: PlayerId) -> Result<bool> {
        let result = self.inner.add_nomination(match_id, player_id);
        self.persist(result)
    }

    fn remove_nomination(&mut self, match_id: MatchId, player_id: PlayerId) -> Result<bool> {
        let result = self.inner.remove_nomination(match_id, player_id);
        self.persist(result)
    }

    fn users(&self) -> Result<Vec<User>> {
        self.inner.users()
    }

    fn user(&self, id: UserId) -> Result<Option<User>> {
        self.inner.user(id)
    }

    fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.inner.user_by_username(username)
    }

    fn create_user(&mut self, new: NewUser) -> Result<User> {
        let result = self.inner.create_user(new);
        self.persist(result)
    }

    fn update_user(&mut self, id: UserId, update: UserUpdate) -> Result<User> {
        let result = self.inner.update_user(id, update);
        self.persist(result)
    }

    fn delete_user(&mut self, id: UserId) -> Result<()> {
        let result = self.inner.delete_user(id);
        self.persist(result)
    }
}
