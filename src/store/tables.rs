use crate::model::{
    Game, Match, MatchId, Nomination, Pair, PairId, Player, PlayerId, Team, User,
};
use serde::{Deserialize, Serialize};

/// On-disk layout of the league data file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub match_pairs: Vec<PairRow>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub match_nominations: Vec<Nomination>,
    #[serde(default, rename = "nextIds")]
    pub next_ids: NextIds,
}

/// Next identifier to hand out per table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NextIds {
    pub teams: u32,
    pub players: u32,
    pub matches: u32,
    pub match_pairs: u32,
    pub users: u32,
    pub match_nominations: u32,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            teams: 1,
            players: 1,
            matches: 1,
            match_pairs: 1,
            users: 1,
            match_nominations: 1,
        }
    }
}

/// A pair stored with flat slot and game columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairRow {
    pub id: PairId,
    pub match_id: MatchId,
    pub pair_number: u8,
    #[serde(default)]
    pub home_player1_id: Option<PlayerId>,
    #[serde(default)]
    pub home_player2_id: Option<PlayerId>,
    #[serde(default)]
    pub away_player1_id: Option<PlayerId>,
    #[serde(default)]
    pub away_player2_id: Option<PlayerId>,
    #[serde(default)]
    pub game1_home_score: Option<u32>,
    #[serde(default)]
    pub game1_away_score: Option<u32>,
    #[serde(default)]
    pub game2_home_score: Option<u32>,
    #[serde(default)]
    pub game2_away_score: Option<u32>,
    #[serde(default)]
    pub game3_home_score: Option<u32>,
    #[serde(default)]
    pub game3_away_score: Option<u32>,
}

impl From<PairRow> for Pair {
    fn from(row: PairRow) -> Self {
        Pair {
            id: row.id,
            match_id: row.match_id,
            pair_number: row.pair_number,
            home_players: [row.home_player1_id, row.home_player2_id],
            away_players: [row.away_player1_id, row.away_player2_id],
            games: [
                Game {
                    home_score: row.game1_home_score,
                    away_score: row.game1_away_score,
                },
                Game {
                    home_score: row.game2_home_score,
                    away_score: row.game2_away_score,
                },
                Game {
                    home_score: row.game3_home_score,
                    away_score: row.game3_away_score,
                },
            ],
        }
    }
}

impl From<&Pair> for PairRow {
    fn from(pair: &Pair) -> Self {
        let [g1, g2, g3] = pair.games;
        PairRow {
            id: pair.id,
            match_id: pair.match_id,
            pair_number: pair.pair_number,
            home_player1_id: pair.home_players[0],
            home_player2_id: pair.home_players[1],
            away_player1_id: pair.away_players[0],
            away_player2_id: pair.away_players[1],
            game1_home_score: g1.home_score,
            game1_away_score: g1.away_score,
            game2_home_score: g2.home_score,
            game2_away_score: g2.away_score,
            game3_home_score: g3.home_score,
            game3_away_score: g3.away_score,
        }
    }
}
