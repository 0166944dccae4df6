//! Match nominations
//!
//! A nomination declares that a player may be selected into the pairs of a
//! match. Only players of the two competing teams are eligible.

use crate::error::{EntityKind, LeagueError, Result};
use crate::model::{Match, MatchId, Player, PlayerId, TeamId};
use crate::store::LeagueStore;
use std::collections::HashSet;

/// Fails with `NotEligible` unless the player's team is one of the match sides
pub fn check_eligible(fixture: &Match, player: &Player) -> Result<()> {
    if fixture.involves(player.team_id) {
        Ok(())
    } else {
        Err(LeagueError::NotEligible {
            match_id: fixture.id,
            player_id: player.id,
        })
    }
}

fn load<S: LeagueStore + ?Sized>(
    store: &S,
    match_id: MatchId,
    player_id: PlayerId,
) -> Result<(Match, Player)> {
    let fixture = store
        .fixture(match_id)?
        .ok_or(LeagueError::not_found(EntityKind::Match, match_id))?;
    let player = store
        .player(player_id)?
        .ok_or(LeagueError::not_found(EntityKind::Player, player_id))?;
    Ok((fixture, player))
}

/// Nominate a player for a match. Nominating twice is a no-op.
pub fn nominate<S: LeagueStore + ?Sized>(
    store: &mut S,
    match_id: MatchId,
    player_id: PlayerId,
) -> Result<()> {
    let (fixture, player) = load(store, match_id, player_id)?;
    check_eligible(&fixture, &player)?;

    if store.add_nomination(match_id, player_id)? {
        log::info!("Nominated {} for match {}", player.name, match_id);
    } else {
        log::debug!("{} already nominated for match {}", player.name, match_id);
    }
    Ok(())
}

/// Withdraw a nomination. Withdrawing one that does not exist succeeds.
pub fn unnominate<S: LeagueStore + ?Sized>(
    store: &mut S,
    match_id: MatchId,
    player_id: PlayerId,
) -> Result<()> {
    let (_, player) = load(store, match_id, player_id)?;

    if store.remove_nomination(match_id, player_id)? {
        log::info!("Withdrew {} from match {}", player.name, match_id);
    }
    Ok(())
}

/// Players of `team_id` nominated for a match, sorted by name
pub fn nominated_players<S: LeagueStore + ?Sized>(
    store: &S,
    match_id: MatchId,
    team_id: TeamId,
) -> Result<Vec<Player>> {
    if store.fixture(match_id)?.is_none() {
        return Err(LeagueError::not_found(EntityKind::Match, match_id));
    }

    let nominated: HashSet<PlayerId> = store
        .nominations(match_id)?
        .into_iter()
        .map(|n| n.player_id)
        .collect();

    Ok(store
        .players(Some(team_id))?
        .into_iter()
        .filter(|p| nominated.contains(&p.id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewMatch, TeamDetails};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    struct League {
        store: MemoryStore,
        match_id: MatchId,
        home_player: PlayerId,
        away_player: PlayerId,
        outsider: PlayerId,
    }

    fn league() -> League {
        let mut store = MemoryStore::new();
        let home = store.create_team(TeamDetails::new("Smashers")).unwrap();
        let away = store.create_team(TeamDetails::new("Drop Shots")).unwrap();
        let other = store.create_team(TeamDetails::new("Net Rushers")).unwrap();
        let fixture = store
            .create_match(NewMatch {
                home_team_id: home.id,
                away_team_id: away.id,
                match_date: NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
                location: String::new(),
            })
            .unwrap();
        let home_player = store.create_player(home.id, "Alice").unwrap().id;
        let away_player = store.create_player(away.id, "Bob").unwrap().id;
        let outsider = store.create_player(other.id, "Carol").unwrap().id;

        League {
            store,
            match_id: fixture.id,
            home_player,
            away_player,
            outsider,
        }
    }

    #[test]
    fn test_nominate_is_idempotent() {
        let mut l = league();
        nominate(&mut l.store, l.match_id, l.home_player).unwrap();
        nominate(&mut l.store, l.match_id, l.home_player).unwrap();
        assert_eq!(l.store.nominations(l.match_id).unwrap().len(), 1);
    }

    #[test]
    fn test_outsider_is_not_eligible() {
        let mut l = league();
        let err = nominate(&mut l.store, l.match_id, l.outsider).unwrap_err();
        assert!(matches!(err, LeagueError::NotEligible { .. }));
        assert!(l.store.nominations(l.match_id).unwrap().is_empty());
    }

    #[test]
    fn test_missing_match_or_player() {
        let mut l = league();
        assert!(matches!(
            nominate(&mut l.store, 42, l.home_player),
            Err(LeagueError::NotFound { kind: EntityKind::Match, .. })
        ));
        assert!(matches!(
            nominate(&mut l.store, l.match_id, 42),
            Err(LeagueError::NotFound { kind: EntityKind::Player, .. })
        ));
        assert!(matches!(
            unnominate(&mut l.store, l.match_id, 42),
            Err(LeagueError::NotFound { kind: EntityKind::Player, .. })
        ));
    }

    #[test]
    fn test_unnominate_absent_succeeds() {
        let mut l = league();
        unnominate(&mut l.store, l.match_id, l.away_player).unwrap();

        nominate(&mut l.store, l.match_id, l.away_player).unwrap();
        unnominate(&mut l.store, l.match_id, l.away_player).unwrap();
        assert!(l.store.nominations(l.match_id).unwrap().is_empty());
    }

    #[test]
    fn test_nominated_players_by_team() {
        let mut l = league();
        nominate(&mut l.store, l.match_id, l.home_player).unwrap();
        nominate(&mut l.store, l.match_id, l.away_player).unwrap();

        let fixture = l.store.fixture(l.match_id).unwrap().unwrap();
        let home = nominated_players(&l.store, l.match_id, fixture.home_team_id).unwrap();
        assert_eq!(home.len(), 1);
        assert_eq!(home[0].name, "Alice");

        let away = nominated_players(&l.store, l.match_id, fixture.away_team_id).unwrap();
        assert_eq!(away[0].name, "Bob");
    }
}
