//! League table
//!
//! Standings are derived on every call from the stored match scores of
//! completed matches. Pair data is not re-read here.

use crate::config::PointsConvention;
use crate::error::Result;
use crate::model::{Match, Side, Team, TeamId};
use crate::store::LeagueStore;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One team's row in the league table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub pairs_won: u32,
    pub pairs_lost: u32,
    pub pairs_diff: i32,
    pub points: u32,
}

impl Standing {
    fn new(team: &Team) -> Self {
        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            pairs_won: 0,
            pairs_lost: 0,
            pairs_diff: 0,
            points: 0,
        }
    }

    fn record(&mut self, own: u32, opponent: u32) {
        self.played += 1;
        self.pairs_won += own;
        self.pairs_lost += opponent;

        match own.cmp(&opponent) {
            Ordering::Greater => self.wins += 1,
            Ordering::Less => self.losses += 1,
            Ordering::Equal => self.draws += 1,
        }
    }
}

/// Build the ranked table for `teams` from `matches`.
///
/// Matches not marked completed are skipped, as are sides whose team is not
/// in `teams`. Rows are ordered by points, then pair differential, both
/// descending; full ties keep the order of `teams`.
pub fn compute_standings(
    teams: &[Team],
    matches: &[Match],
    convention: &PointsConvention,
) -> Vec<Standing> {
    let mut rows: Vec<Standing> = teams.iter().map(Standing::new).collect();
    let index: HashMap<TeamId, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, team)| (team.id, i))
        .collect();

    for fixture in matches.iter().filter(|m| m.completed) {
        let score = fixture.score();
        for side in Side::BOTH {
            if let Some(&i) = index.get(&fixture.team(side)) {
                rows[i].record(score.for_side(side), score.for_side(side.opponent()));
            }
        }
    }

    for row in &mut rows {
        row.pairs_diff = row.pairs_won as i32 - row.pairs_lost as i32;
        row.points = convention.points(row.wins, row.draws);
    }

    // Vec::sort_by is stable
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.pairs_diff.cmp(&a.pairs_diff))
    });

    rows
}

/// Standings for every team in the store
pub fn standings<S: LeagueStore + ?Sized>(
    store: &S,
    convention: &PointsConvention,
) -> Result<Vec<Standing>> {
    let teams = store.teams()?;
    let matches = store.matches()?;
    log::debug!(
        "Computing standings for {} teams over {} matches ({})",
        teams.len(),
        matches.len(),
        convention
    );
    Ok(compute_standings(&teams, &matches, convention))
}
