use super::team::{PlayerId, TeamId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type MatchId = u32;
pub type PairId = u32;
pub type NominationId = u32;

/// Every match is played over this many pairs
pub const PAIRS_PER_MATCH: u8 = 9;

/// Games per pair (best of three)
pub const GAMES_PER_PAIR: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    pub fn opponent(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "Home"),
            Side::Away => write!(f, "Away"),
        }
    }
}

/// A single game inside a pair. Absent scores count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Game {
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl Game {
    pub fn new(home: u32, away: u32) -> Self {
        Self {
            home_score: Some(home),
            away_score: Some(away),
        }
    }

    pub fn unplayed() -> Self {
        Self::default()
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_score.unwrap_or(0),
            Side::Away => self.away_score.unwrap_or(0),
        }
    }

    /// Strictly higher score wins; equal scores (including 0-0) win nothing
    pub fn winner(&self) -> Option<Side> {
        let home = self.score(Side::Home);
        let away = self.score(Side::Away);
        if home > away {
            Some(Side::Home)
        } else if away > home {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn is_played(&self) -> bool {
        self.score(Side::Home) != 0 || self.score(Side::Away) != 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub match_date: NaiveDate,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub home_score: u32,
    #[serde(default)]
    pub away_score: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn team(&self, side: Side) -> TeamId {
        match side {
            Side::Home => self.home_team_id,
            Side::Away => self.away_team_id,
        }
    }

    /// Which side the given team plays on in this match
    pub fn side_of(&self, team_id: TeamId) -> Option<Side> {
        if self.home_team_id == team_id {
            Some(Side::Home)
        } else if self.away_team_id == team_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn score(&self) -> MatchScore {
        MatchScore {
            home: self.home_score,
            away: self.away_score,
        }
    }
}

/// Pairs won by each side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchScore {
    pub home: u32,
    pub away: u32,
}

impl MatchScore {
    pub fn for_side(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Fields supplied when scheduling a match
#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub match_date: NaiveDate,
    pub location: String,
}

/// Editable match metadata. The aggregate score is not part of it: it is
/// always written back by the aggregator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchUpdate {
    pub match_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub id: PairId,
    pub match_id: MatchId,
    pub pair_number: u8,
    pub home_players: [Option<PlayerId>; 2],
    pub away_players: [Option<PlayerId>; 2],
    pub games: [Game; GAMES_PER_PAIR],
}

impl Pair {
    pub fn new(id: PairId, match_id: MatchId, pair_number: u8) -> Self {
        Self {
            id,
            match_id,
            pair_number,
            home_players: [None; 2],
            away_players: [None; 2],
            games: [Game::unplayed(); GAMES_PER_PAIR],
        }
    }

    pub fn players(&self, side: Side) -> [Option<PlayerId>; 2] {
        match side {
            Side::Home => self.home_players,
            Side::Away => self.away_players,
        }
    }

    /// The side a player occupies in this pair. A player listed on both
    /// sides is treated as home.
    pub fn side_of(&self, player_id: PlayerId) -> Option<Side> {
        if self.home_players.contains(&Some(player_id)) {
            Some(Side::Home)
        } else if self.away_players.contains(&Some(player_id)) {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Sum of one side's game scores, saturating at `u32::MAX`
    pub fn points(&self, side: Side) -> u32 {
        self.games
            .iter()
            .fold(0u32, |total, g| total.saturating_add(g.score(side)))
    }

    /// Empty every slot holding this player. Returns true if any slot changed.
    pub fn clear_player(&mut self, player_id: PlayerId) -> bool {
        let mut changed = false;
        for slot in self.home_players.iter_mut().chain(self.away_players.iter_mut()) {
            if *slot == Some(player_id) {
                *slot = None;
                changed = true;
            }
        }
        changed
    }

    pub fn apply(&mut self, update: PairUpdate) {
        if let Some(players) = update.home_players {
            self.home_players = players;
        }
        if let Some(players) = update.away_players {
            self.away_players = players;
        }
        if let Some(games) = update.games {
            self.games = games;
        }
    }
}

/// A partial pair edit; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairUpdate {
    pub home_players: Option<[Option<PlayerId>; 2]>,
    pub away_players: Option<[Option<PlayerId>; 2]>,
    pub games: Option<[Game; GAMES_PER_PAIR]>,
}

impl PairUpdate {
    pub fn with_home_players(mut self, players: [Option<PlayerId>; 2]) -> Self {
        self.home_players = Some(players);
        self
    }

    pub fn with_away_players(mut self, players: [Option<PlayerId>; 2]) -> Self {
        self.away_players = Some(players);
        self
    }

    pub fn with_games(mut self, games: [Game; GAMES_PER_PAIR]) -> Self {
        self.games = Some(games);
        self
    }

    /// Every player id written by this update
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.home_players
            .iter()
            .chain(self.away_players.iter())
            .flatten()
            .flatten()
            .copied()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nomination {
    pub id: NominationId,
    pub match_id: MatchId,
    pub player_id: PlayerId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}
