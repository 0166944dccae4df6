pub mod fixture;
pub mod scoring;
pub mod team;
pub mod user;

pub use fixture::{
    Game, Match, MatchId, MatchScore, MatchUpdate, NewMatch, Nomination, NominationId, Pair,
    PairId, PairUpdate, Side, GAMES_PER_PAIR, PAIRS_PER_MATCH,
};
pub use scoring::{score_games, score_pair, PairOutcome};
pub use team::{Player, PlayerId, Team, TeamDetails, TeamId};
pub use user::{NewUser, Role, User, UserId, UserUpdate};
