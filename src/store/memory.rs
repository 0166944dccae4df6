use super::tables::{DataFile, NextIds, PairRow};
use super::LeagueStore;
use crate::error::{EntityKind, LeagueError, Result};
use crate::model::{
    Match, MatchId, MatchScore, MatchUpdate, NewMatch, NewUser, Nomination, Pair, PairId,
    PairUpdate, Player, PlayerId, Team, TeamDetails, TeamId, User, UserId, UserUpdate,
    PAIRS_PER_MATCH,
};
use chrono::Utc;

/// League state held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    teams: Vec<Team>,
    players: Vec<Player>,
    matches: Vec<Match>,
    pairs: Vec<Pair>,
    users: Vec<User>,
    nominations: Vec<Nomination>,
    next_ids: NextIds,
}

fn take_id(counter: &mut u32) -> u32 {
    let id = *counter;
    *counter += 1;
    id
}

/// Raise a counter past every id already in use
fn reserve_past<I: Iterator<Item = u32>>(counter: &mut u32, ids: I) {
    if let Some(max) = ids.max() {
        if *counter <= max {
            *counter = max + 1;
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a data file snapshot
    pub fn from_tables(data: DataFile) -> Self {
        let mut next_ids = data.next_ids;
        reserve_past(&mut next_ids.teams, data.teams.iter().map(|t| t.id));
        reserve_past(&mut next_ids.players, data.players.iter().map(|p| p.id));
        reserve_past(&mut next_ids.matches, data.matches.iter().map(|m| m.id));
        reserve_past(&mut next_ids.match_pairs, data.match_pairs.iter().map(|p| p.id));
        reserve_past(&mut next_ids.users, data.users.iter().map(|u| u.id));
        reserve_past(
            &mut next_ids.match_nominations,
            data.match_nominations.iter().map(|n| n.id),
        );

        Self {
            teams: data.teams,
            players: data.players,
            matches: data.matches,
            pairs: data.match_pairs.into_iter().map(Pair::from).collect(),
            users: data.users,
            nominations: data.match_nominations,
            next_ids,
        }
    }

    /// Snapshot the store in data file layout
    pub fn to_tables(&self) -> DataFile {
        DataFile {
            teams: self.teams.clone(),
            players: self.players.clone(),
            matches: self.matches.clone(),
            match_pairs: self.pairs.iter().map(PairRow::from).collect(),
            users: self.users.clone(),
            match_nominations: self.nominations.clone(),
            next_ids: self.next_ids.clone(),
        }
    }

    fn team_mut(&mut self, id: TeamId) -> Result<&mut Team> {
        self.teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(LeagueError::not_found(EntityKind::Team, id))
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LeagueError::not_found(EntityKind::Player, id))
    }

    fn match_mut(&mut self, id: MatchId) -> Result<&mut Match> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(LeagueError::not_found(EntityKind::Match, id))
    }

    fn user_mut(&mut self, id: UserId) -> Result<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(LeagueError::not_found(EntityKind::User, id))
    }

    fn ensure_team(&self, id: TeamId) -> Result<()> {
        if self.teams.iter().any(|t| t.id == id) {
            Ok(())
        } else {
            Err(LeagueError::not_found(EntityKind::Team, id))
        }
    }

    fn remove_player_references(&mut self, id: PlayerId) {
        let mut cleared = 0;
        for pair in &mut self.pairs {
            if pair.clear_player(id) {
                cleared += 1;
            }
        }
        self.nominations.retain(|n| n.player_id != id);
        if cleared > 0 {
            log::info!("Cleared player {} from {} pairs", id, cleared);
        }
    }

    fn remove_match_children(&mut self, id: MatchId) {
        self.pairs.retain(|p| p.match_id != id);
        self.nominations.retain(|n| n.match_id != id);
    }
}

impl LeagueStore for MemoryStore {
    fn teams(&self) -> Result<Vec<Team>> {
        let mut teams = self.teams.clone();
        teams.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(teams)
    }

    fn team(&self, id: TeamId) -> Result<Option<Team>> {
        Ok(self.teams.iter().find(|t| t.id == id).cloned())
    }

    fn create_team(&mut self, details: TeamDetails) -> Result<Team> {
        let team = Team::from_details(take_id(&mut self.next_ids.teams), details);
        self.teams.push(team.clone());
        Ok(team)
    }

    fn update_team(&mut self, id: TeamId, details: TeamDetails) -> Result<Team> {
        let team = self.team_mut(id)?;
        team.apply(details);
        Ok(team.clone())
    }

    fn delete_team(&mut self, id: TeamId) -> Result<()> {
        self.ensure_team(id)?;

        let player_ids: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.team_id == id)
            .map(|p| p.id)
            .collect();
        for player_id in &player_ids {
            self.remove_player_references(*player_id);
        }
        self.players.retain(|p| p.team_id != id);

        let match_ids: Vec<MatchId> = self
            .matches
            .iter()
            .filter(|m| m.involves(id))
            .map(|m| m.id)
            .collect();
        for match_id in &match_ids {
            self.remove_match_children(*match_id);
        }
        self.matches.retain(|m| !m.involves(id));

        for user in &mut self.users {
            if user.team_id == Some(id) {
                user.team_id = None;
            }
        }

        self.teams.retain(|t| t.id != id);
        log::info!(
            "Deleted team {} with {} players and {} matches",
            id,
            player_ids.len(),
            match_ids.len()
        );
        Ok(())
    }

    fn players(&self, team_id: Option<TeamId>) -> Result<Vec<Player>> {
        let mut players: Vec<Player> = self
            .players
            .iter()
            .filter(|p| team_id.map_or(true, |t| p.team_id == t))
            .cloned()
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(players)
    }

    fn player(&self, id: PlayerId) -> Result<Option<Player>> {
        Ok(self.players.iter().find(|p| p.id == id).cloned())
    }

    fn create_player(&mut self, team_id: TeamId, name: &str) -> Result<Player> {
        self.ensure_team(team_id)?;
        let player = Player::new(take_id(&mut self.next_ids.players), team_id, name);
        self.players.push(player.clone());
        Ok(player)
    }

    fn rename_player(&mut self, id: PlayerId, name: &str) -> Result<Player> {
        let player = self.player_mut(id)?;
        player.name = name.to_string();
        Ok(player.clone())
    }

    fn delete_player(&mut self, id: PlayerId) -> Result<()> {
        self.player_mut(id)?;
        self.remove_player_references(id);
        self.players.retain(|p| p.id != id);
        Ok(())
    }

    fn matches(&self) -> Result<Vec<Match>> {
        let mut matches = self.matches.clone();
        matches.sort_by(|a, b| b.match_date.cmp(&a.match_date).then(a.id.cmp(&b.id)));
        Ok(matches)
    }

    fn fixture(&self, id: MatchId) -> Result<Option<Match>> {
        Ok(self.matches.iter().find(|m| m.id == id).cloned())
    }

    fn create_match(&mut self, new: NewMatch) -> Result<Match> {
        self.ensure_team(new.home_team_id)?;
        self.ensure_team(new.away_team_id)?;

        let fixture = Match {
            id: take_id(&mut self.next_ids.matches),
            home_team_id: new.home_team_id,
            away_team_id: new.away_team_id,
            match_date: new.match_date,
            location: new.location,
            home_score: 0,
            away_score: 0,
            completed: false,
            created_at: Utc::now(),
        };

        for pair_number in 1..=PAIRS_PER_MATCH {
            let pair_id = take_id(&mut self.next_ids.match_pairs);
            self.pairs.push(Pair::new(pair_id, fixture.id, pair_number));
        }

        self.matches.push(fixture.clone());
        Ok(fixture)
    }

    fn update_match(&mut self, id: MatchId, update: MatchUpdate) -> Result<Match> {
        let fixture = self.match_mut(id)?;
        if let Some(date) = update.match_date {
            fixture.match_date = date;
        }
        if let Some(location) = update.location {
            fixture.location = location;
        }
        if let Some(completed) = update.completed {
            fixture.completed = completed;
        }
        Ok(fixture.clone())
    }

    fn set_match_score(&mut self, id: MatchId, score: MatchScore) -> Result<Match> {
        let fixture = self.match_mut(id)?;
        fixture.home_score = score.home;
        fixture.away_score = score.away;
        Ok(fixture.clone())
    }

    fn delete_match(&mut self, id: MatchId) -> Result<()> {
        self.match_mut(id)?;
        self.remove_match_children(id);
        self.matches.retain(|m| m.id != id);
        Ok(())
    }

    fn pairs(&self, match_id: MatchId) -> Result<Vec<Pair>> {
        let mut pairs: Vec<Pair> = self
            .pairs
            .iter()
            .filter(|p| p.match_id == match_id)
            .cloned()
            .collect();
        pairs.sort_by_key(|p| p.pair_number);
        Ok(pairs)
    }

    fn all_pairs(&self) -> Result<Vec<Pair>> {
        Ok(self.pairs.clone())
    }

    fn pair(&self, id: PairId) -> Result<Option<Pair>> {
        Ok(self.pairs.iter().find(|p| p.id == id).cloned())
    }

    fn update_pair(&mut self, id: PairId, update: PairUpdate) -> Result<Pair> {
        let pair = self
            .pairs
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LeagueError::not_found(EntityKind::Pair, id))?;
        pair.apply(update);
        Ok(pair.clone())
    }

    fn nominations(&self, match_id: MatchId) -> Result<Vec<Nomination>> {
        Ok(self
            .nominations
            .iter()
            .filter(|n| n.match_id == match_id)
            .cloned()
            .collect())
    }

    fn add_nomination(&mut self, match_id: MatchId, player_id: PlayerId) -> Result<bool> {
        if self
            .nominations
            .iter()
            .any(|n| n.match_id == match_id && n.player_id == player_id)
        {
            return Ok(false);
        }

        self.nominations.push(Nomination {
            id: take_id(&mut self.next_ids.match_nominations),
            match_id,
            player_id,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    fn remove_nomination(&mut self, match_id: MatchId, player_id: PlayerId) -> Result<bool> {
        let before = self.nominations.len();
        self.nominations
            .retain(|n| !(n.match_id == match_id && n.player_id == player_id));
        Ok(self.nominations.len() != before)
    }

    fn users(&self) -> Result<Vec<User>> {
        let mut users = self.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    fn user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }

    fn create_user(&mut self, new: NewUser) -> Result<User> {
        if let Some(team_id) = new.team_id {
            self.ensure_team(team_id)?;
        }
        let user = User {
            id: take_id(&mut self.next_ids.users),
            username: new.username,
            password: new.password,
            role: new.role,
            team_id: new.team_id,
            created_at: Utc::now(),
        };
        self.users.push(user.clone());
        Ok(user)
    }

    fn update_user(&mut self, id: UserId, update: UserUpdate) -> Result<User> {
        if let Some(Some(team_id)) = update.team_id {
            self.ensure_team(team_id)?;
        }
        let user = self.user_mut(id)?;
        user.apply(update);
        Ok(user.clone())
    }

    fn delete_user(&mut self, id: UserId) -> Result<()> {
        self.user_mut(id)?;
        self.users.retain(|u| u.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Game, Role};
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn store_with_match() -> (MemoryStore, Match) {
        let mut store = MemoryStore::new();
        let home = store.create_team(TeamDetails::new("Smashers")).unwrap();
        let away = store.create_team(TeamDetails::new("Drop Shots")).unwrap();
        let fixture = store
            .create_match(NewMatch {
                home_team_id: home.id,
                away_team_id: away.id,
                match_date: date(1),
                location: "Sports Hall".to_string(),
            })
            .unwrap();
        (store, fixture)
    }

    #[test]
    fn test_create_match_creates_nine_pairs() {
        let (store, fixture) = store_with_match();
        let pairs = store.pairs(fixture.id).unwrap();
        assert_eq!(pairs.len(), 9);
        let numbers: Vec<u8> = pairs.iter().map(|p| p.pair_number).collect();
        assert_eq!(numbers, (1..=9).collect::<Vec<u8>>());
        assert!(!fixture.completed);
        assert_eq!(fixture.score(), MatchScore::default());
    }

    #[test]
    fn test_create_match_unknown_team() {
        let mut store = MemoryStore::new();
        let team = store.create_team(TeamDetails::new("Smashers")).unwrap();
        let err = store
            .create_match(NewMatch {
                home_team_id: team.id,
                away_team_id: 42,
                match_date: date(1),
                location: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, LeagueError::NotFound { kind: EntityKind::Team, id: 42 }));
        assert!(store.all_pairs().unwrap().is_empty());
    }

    #[test]
    fn test_teams_sorted_by_name() {
        let (store, _) = store_with_match();
        let names: Vec<String> = store.teams().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Drop Shots", "Smashers"]);
    }

    #[test]
    fn test_delete_player_clears_pair_slots() {
        let (mut store, fixture) = store_with_match();
        let player = store.create_player(fixture.home_team_id, "Alice").unwrap();
        let pair = store.pairs(fixture.id).unwrap()[0].clone();
        store
            .update_pair(
                pair.id,
                PairUpdate::default().with_home_players([Some(player.id), None]),
            )
            .unwrap();
        store.add_nomination(fixture.id, player.id).unwrap();

        store.delete_player(player.id).unwrap();

        let pair = store.pair(pair.id).unwrap().unwrap();
        assert_eq!(pair.home_players, [None, None]);
        assert!(store.nominations(fixture.id).unwrap().is_empty());
        assert!(store.player(player.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_team_cascades() {
        let (mut store, fixture) = store_with_match();
        let player = store.create_player(fixture.home_team_id, "Alice").unwrap();
        let manager = store
            .create_user(NewUser {
                username: "captain".to_string(),
                password: String::new(),
                role: Role::TeamManager,
                team_id: Some(fixture.home_team_id),
            })
            .unwrap();

        store.delete_team(fixture.home_team_id).unwrap();

        assert!(store.player(player.id).unwrap().is_none());
        assert!(store.fixture(fixture.id).unwrap().is_none());
        assert!(store.pairs(fixture.id).unwrap().is_empty());
        assert_eq!(store.user(manager.id).unwrap().unwrap().team_id, None);
        assert_eq!(store.teams().unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_entities() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.update_pair(5, PairUpdate::default()),
            Err(LeagueError::NotFound { kind: EntityKind::Pair, id: 5 })
        ));
        assert!(matches!(
            store.delete_match(3),
            Err(LeagueError::NotFound { kind: EntityKind::Match, id: 3 })
        ));
        assert!(store.team(1).unwrap().is_none());
    }

    #[test]
    fn test_nomination_uniqueness() {
        let (mut store, fixture) = store_with_match();
        assert!(store.add_nomination(fixture.id, 7).unwrap());
        assert!(!store.add_nomination(fixture.id, 7).unwrap());
        assert_eq!(store.nominations(fixture.id).unwrap().len(), 1);

        assert!(store.remove_nomination(fixture.id, 7).unwrap());
        assert!(!store.remove_nomination(fixture.id, 7).unwrap());
    }

    #[test]
    fn test_tables_round_trip_keeps_ids_fresh() {
        let (mut store, fixture) = store_with_match();
        let pair = store.pairs(fixture.id).unwrap()[2].clone();
        store
            .update_pair(
                pair.id,
                PairUpdate::default().with_games([Game::new(21, 11), Game::new(21, 9), Game::unplayed()]),
            )
            .unwrap();

        let mut data = store.to_tables();
        // Simulate a stale counter in an older data file
        data.next_ids.teams = 1;
        let mut restored = MemoryStore::from_tables(data);

        assert_eq!(restored.pair(pair.id).unwrap(), store.pair(pair.id).unwrap());
        let team = restored.create_team(TeamDetails::new("Net Rushers")).unwrap();
        assert_eq!(team.id, 3);
    }

    #[test]
    fn test_matches_most_recent_first() {
        let (mut store, fixture) = store_with_match();
        let later = store
            .create_match(NewMatch {
                home_team_id: fixture.away_team_id,
                away_team_id: fixture.home_team_id,
                match_date: date(15),
                location: String::new(),
            })
            .unwrap();
        let ids: Vec<MatchId> = store.matches().unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![later.id, fixture.id]);
    }
}
