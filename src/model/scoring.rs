//! Pair scoring for best-of-three badminton pairs

use super::fixture::{Game, Pair, Side, GAMES_PER_PAIR};

/// Games won by each side of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairOutcome {
    pub home_games: u32,
    pub away_games: u32,
}

impl PairOutcome {
    pub fn games(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_games,
            Side::Away => self.away_games,
        }
    }

    /// The side that won more games, or None when level
    pub fn winner(&self) -> Option<Side> {
        if self.home_games > self.away_games {
            Some(Side::Home)
        } else if self.away_games > self.home_games {
            Some(Side::Away)
        } else {
            None
        }
    }
}

/// Count games won per side. No minimum winning score is enforced, and tied
/// or unplayed games count for nobody.
pub fn score_games(games: &[Game; GAMES_PER_PAIR]) -> PairOutcome {
    let mut outcome = PairOutcome::default();

    for game in games {
        match game.winner() {
            Some(Side::Home) => outcome.home_games += 1,
            Some(Side::Away) => outcome.away_games += 1,
            None => {}
        }
    }

    outcome
}

pub fn score_pair(pair: &Pair) -> PairOutcome {
    score_games(&pair.games)
}
