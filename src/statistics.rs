//! Per-player aggregates across every recorded pair

use crate::error::Result;
use crate::model::{score_pair, Pair, Player, PlayerId, Team, TeamId};
use crate::store::LeagueStore;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatistic {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_id: TeamId,
    pub team_name: String,
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub total_points: u32,
    pub avg_points: f64,
}

impl PlayerStatistic {
    /// Average points per pair rounded to one decimal, e.g. "20.0"
    pub fn avg_points_display(&self) -> String {
        format!("{:.1}", self.avg_points)
    }
}

/// Fold `pairs` into one row per player.
///
/// `games_played` counts pairs, not individual games. A player found in a
/// home slot is scored for the home side even if also listed away. Rows are
/// ordered by total points descending; ties keep the order of `players`.
pub fn compute_player_statistics(
    players: &[Player],
    teams: &[Team],
    pairs: &[Pair],
) -> Vec<PlayerStatistic> {
    let team_names: HashMap<TeamId, &str> =
        teams.iter().map(|t| (t.id, t.name.as_str())).collect();

    let mut rows: Vec<PlayerStatistic> = players
        .iter()
        .map(|player| {
            let mut row = PlayerStatistic {
                player_id: player.id,
                player_name: player.name.clone(),
                team_id: player.team_id,
                team_name: team_names
                    .get(&player.team_id)
                    .copied()
                    .unwrap_or("Unknown")
                    .to_string(),
                games_played: 0,
                games_won: 0,
                games_lost: 0,
                total_points: 0,
                avg_points: 0.0,
            };

            for pair in pairs {
                let side = match pair.side_of(player.id) {
                    Some(side) => side,
                    None => continue,
                };

                let outcome = score_pair(pair);
                let own = outcome.games(side);
                let opponent = outcome.games(side.opponent());

                row.games_played += 1;
                match own.cmp(&opponent) {
                    Ordering::Greater => row.games_won += 1,
                    Ordering::Less => row.games_lost += 1,
                    Ordering::Equal => {}
                }
                row.total_points = row.total_points.saturating_add(pair.points(side));
            }

            if row.games_played > 0 {
                row.avg_points = row.total_points as f64 / row.games_played as f64;
            }
            row
        })
        .collect();

    rows.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    rows
}

/// Statistics for every player in the store
pub fn player_statistics<S: LeagueStore + ?Sized>(store: &S) -> Result<Vec<PlayerStatistic>> {
    let players = store.players(None)?;
    let teams = store.teams()?;
    let pairs = store.all_pairs()?;
    log::debug!(
        "Computing statistics for {} players over {} pairs",
        players.len(),
        pairs.len()
    );
    Ok(compute_player_statistics(&players, &teams, &pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Game, TeamDetails};

    fn teams() -> Vec<Team> {
        vec![
            Team::from_details(1, TeamDetails::new("Smashers")),
            Team::from_details(2, TeamDetails::new("Drop Shots")),
        ]
    }

    fn pair(id: u32, home: [Option<PlayerId>; 2], away: [Option<PlayerId>; 2], games: [Game; 3]) -> Pair {
        let mut pair = Pair::new(id, 1, id as u8);
        pair.home_players = home;
        pair.away_players = away;
        pair.games = games;
        pair
    }

    #[test]
    fn test_three_game_pair_totals() {
        let players = vec![Player::new(1, 1, "Alice"), Player::new(2, 2, "Bob")];
        let pairs = vec![pair(
            1,
            [Some(1), None],
            [Some(2), None],
            [Game::new(21, 15), Game::new(18, 21), Game::new(21, 19)],
        )];

        let rows = compute_player_statistics(&players, &teams(), &pairs);
        let alice = &rows[0];
        assert_eq!(alice.player_name, "Alice");
        assert_eq!(alice.team_name, "Smashers");
        assert_eq!((alice.games_played, alice.games_won, alice.games_lost), (1, 1, 0));
        assert_eq!(alice.total_points, 60);
        assert_eq!(alice.avg_points_display(), "60.0");

        let bob = &rows[1];
        assert_eq!((bob.games_played, bob.games_won, bob.games_lost), (1, 0, 1));
        assert_eq!(bob.total_points, 55);
    }

    #[test]
    fn test_player_in_two_slots_counted_once() {
        let players = vec![Player::new(1, 1, "Alice")];
        let pairs = vec![pair(
            1,
            [Some(1), Some(1)],
            [Some(1), None],
            [Game::new(10, 21), Game::new(12, 21), Game::unplayed()],
        )];

        let rows = compute_player_statistics(&players, &teams(), &pairs);
        assert_eq!(rows[0].games_played, 1);
        assert_eq!(rows[0].games_lost, 1);
        assert_eq!(rows[0].total_points, 22);
    }

    #[test]
    fn test_drawn_pair_is_played_but_not_won_or_lost() {
        let players = vec![Player::new(1, 1, "Alice")];
        let pairs = vec![pair(
            1,
            [Some(1), None],
            [None, None],
            [Game::new(21, 15), Game::new(18, 21), Game::unplayed()],
        )];

        let rows = compute_player_statistics(&players, &teams(), &pairs);
        assert_eq!((rows[0].games_played, rows[0].games_won, rows[0].games_lost), (1, 0, 0));
        assert_eq!(rows[0].total_points, 39);
    }

    #[test]
    fn test_idle_player_and_unknown_team() {
        let players = vec![Player::new(5, 9, "Zed")];
        let rows = compute_player_statistics(&players, &teams(), &[]);

        assert_eq!(rows[0].games_played, 0);
        assert_eq!(rows[0].avg_points, 0.0);
        assert_eq!(rows[0].avg_points_display(), "0.0");
        assert_eq!(rows[0].team_name, "Unknown");
    }

    #[test]
    fn test_sorted_by_total_points() {
        let players = vec![
            Player::new(1, 1, "Alice"),
            Player::new(2, 1, "Bea"),
            Player::new(3, 2, "Cat"),
        ];
        let pairs = vec![
            pair(1, [Some(1), None], [Some(3), None], [Game::new(21, 5), Game::unplayed(), Game::unplayed()]),
            pair(2, [Some(2), None], [Some(3), None], [Game::new(11, 21), Game::new(21, 23), Game::unplayed()]),
        ];

        let rows = compute_player_statistics(&players, &teams(), &pairs);
        let names: Vec<&str> = rows.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["Cat", "Bea", "Alice"]);
        assert_eq!(rows[0].games_played, 2);
        assert_eq!(rows[0].avg_points_display(), "24.5");
    }

    #[test]
    fn test_huge_scores_saturate() {
        let games = crate::notation::parse_games("4294967295-0 4294967295-0").unwrap();
        let players = vec![Player::new(1, 1, "Alice"), Player::new(2, 2, "Bob")];
        let pairs = vec![
            pair(1, [Some(1), None], [Some(2), None], games),
            pair(2, [Some(1), None], [Some(2), None], games),
        ];

        let rows = compute_player_statistics(&players, &teams(), &pairs);
        assert_eq!(rows[0].player_name, "Alice");
        assert_eq!(rows[0].total_points, u32::MAX);
        assert_eq!(rows[0].games_won, 2);
        assert_eq!(rows[1].total_points, 0);
    }
}
