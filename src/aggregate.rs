//! Match score aggregation
//!
//! A match's score is the number of pairs won by each side. It is always
//! recounted from the full pair set, so the result does not depend on the
//! order pairs were written in.

use crate::error::{EntityKind, LeagueError, Result};
use crate::model::{score_pair, MatchId, MatchScore, Pair, PairId, PairUpdate, Side};
use crate::store::LeagueStore;
use std::collections::HashSet;

/// Count pairs won per side. Drawn pairs count for nobody.
pub fn aggregate_pairs(pairs: &[Pair]) -> MatchScore {
    let mut score = MatchScore::default();

    for pair in pairs {
        match score_pair(pair).winner() {
            Some(Side::Home) => score.home += 1,
            Some(Side::Away) => score.away += 1,
            None => {}
        }
    }

    score
}

/// Recount every pair of a match and store the result on the match
pub fn recompute_match_score<S: LeagueStore + ?Sized>(
    store: &mut S,
    match_id: MatchId,
) -> Result<MatchScore> {
    if store.fixture(match_id)?.is_none() {
        return Err(LeagueError::not_found(EntityKind::Match, match_id));
    }

    let pairs = store.pairs(match_id)?;
    let score = aggregate_pairs(&pairs);
    store.set_match_score(match_id, score)?;

    log::debug!(
        "Match {} recomputed from {} pairs: {}",
        match_id,
        pairs.len(),
        score
    );
    Ok(score)
}

/// Write a pair and refresh its match score
pub fn update_pair<S: LeagueStore + ?Sized>(
    store: &mut S,
    pair_id: PairId,
    update: PairUpdate,
) -> Result<Pair> {
    let existing = store
        .pair(pair_id)?
        .ok_or(LeagueError::not_found(EntityKind::Pair, pair_id))?;

    let written = update.player_ids();
    if !written.is_empty() {
        let nominated: HashSet<_> = store
            .nominations(existing.match_id)?
            .into_iter()
            .map(|n| n.player_id)
            .collect();
        for player_id in written.iter().filter(|p| !nominated.contains(*p)) {
            log::warn!(
                "Player {} placed in pair {} of match {} without a nomination",
                player_id,
                existing.pair_number,
                existing.match_id
            );
        }
    }

    let pair = store.update_pair(pair_id, update)?;
    recompute_match_score(store, pair.match_id)?;
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Game, MatchUpdate, NewMatch, TeamDetails, PAIRS_PER_MATCH};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    const HOME_WIN: [Game; 3] = [
        Game { home_score: Some(21), away_score: Some(15) },
        Game { home_score: Some(21), away_score: Some(17) },
        Game { home_score: None, away_score: None },
    ];
    const AWAY_WIN: [Game; 3] = [
        Game { home_score: Some(12), away_score: Some(21) },
        Game { home_score: Some(19), away_score: Some(21) },
        Game { home_score: None, away_score: None },
    ];
    const SPLIT: [Game; 3] = [
        Game { home_score: Some(21), away_score: Some(15) },
        Game { home_score: Some(18), away_score: Some(21) },
        Game { home_score: None, away_score: None },
    ];

    fn setup() -> (MemoryStore, MatchId) {
        let mut store = MemoryStore::new();
        let home = store.create_team(TeamDetails::new("Smashers")).unwrap();
        let away = store.create_team(TeamDetails::new("Drop Shots")).unwrap();
        let fixture = store
            .create_match(NewMatch {
                home_team_id: home.id,
                away_team_id: away.id,
                match_date: NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
                location: String::new(),
            })
            .unwrap();
        (store, fixture.id)
    }

    fn play(store: &mut MemoryStore, match_id: MatchId, results: &[[Game; 3]]) {
        let pairs = store.pairs(match_id).unwrap();
        for (pair, games) in pairs.iter().zip(results) {
            update_pair(store, pair.id, PairUpdate::default().with_games(*games)).unwrap();
        }
    }

    #[test]
    fn test_five_three_one() {
        let (mut store, match_id) = setup();
        let mut results = vec![HOME_WIN; 5];
        results.extend([AWAY_WIN; 3]);
        results.push(SPLIT);
        play(&mut store, match_id, &results);

        let fixture = store.fixture(match_id).unwrap().unwrap();
        assert_eq!(fixture.score(), MatchScore { home: 5, away: 3 });
        assert!(!fixture.completed);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let (mut store, match_id) = setup();
        play(&mut store, match_id, &[HOME_WIN, AWAY_WIN, HOME_WIN]);

        let first = recompute_match_score(&mut store, match_id).unwrap();
        let second = recompute_match_score(&mut store, match_id).unwrap();
        assert_eq!(first, MatchScore { home: 2, away: 1 });
        assert_eq!(first, second);
    }

    #[test]
    fn test_overwriting_a_pair_recounts() {
        let (mut store, match_id) = setup();
        play(&mut store, match_id, &[HOME_WIN]);
        play(&mut store, match_id, &[AWAY_WIN]);

        let fixture = store.fixture(match_id).unwrap().unwrap();
        assert_eq!(fixture.score(), MatchScore { home: 0, away: 1 });
    }

    #[test]
    fn test_score_never_exceeds_pair_count() {
        let (mut store, match_id) = setup();
        play(&mut store, match_id, &[HOME_WIN; 9]);

        let score = store.fixture(match_id).unwrap().unwrap().score();
        assert_eq!(score.home + score.away, PAIRS_PER_MATCH as u32);
    }

    #[test]
    fn test_completed_is_not_inferred() {
        let (mut store, match_id) = setup();
        store
            .update_match(match_id, MatchUpdate { completed: Some(true), ..Default::default() })
            .unwrap();
        play(&mut store, match_id, &[HOME_WIN]);
        assert!(store.fixture(match_id).unwrap().unwrap().completed);
    }

    #[test]
    fn test_missing_match_and_pair() {
        let (mut store, _) = setup();
        assert!(matches!(
            recompute_match_score(&mut store, 99),
            Err(LeagueError::NotFound { kind: EntityKind::Match, id: 99 })
        ));
        assert!(matches!(
            update_pair(&mut store, 500, PairUpdate::default()),
            Err(LeagueError::NotFound { kind: EntityKind::Pair, id: 500 })
        ));
    }

    #[test]
    fn test_aggregate_any_pair_count() {
        let mut pairs = Vec::new();
        for n in 1..=3 {
            let mut pair = Pair::new(n as u32, 1, n);
            pair.games = HOME_WIN;
            pairs.push(pair);
        }
        assert_eq!(aggregate_pairs(&pairs), MatchScore { home: 3, away: 0 });
        assert_eq!(aggregate_pairs(&[]), MatchScore::default());
    }
}
