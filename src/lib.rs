pub mod access;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod nomination;
pub mod notation;
pub mod report;
pub mod standings;
pub mod statistics;
pub mod store;

pub use access::{authorize, Action, Caller};
pub use aggregate::{aggregate_pairs, recompute_match_score, update_pair};
pub use config::PointsConvention;
pub use error::{EntityKind, LeagueError, Result};
pub use model::*;
pub use nomination::{check_eligible, nominate, nominated_players, unnominate};
pub use notation::{format_games, parse_games};
pub use standings::{compute_standings, standings, Standing};
pub use statistics::{compute_player_statistics, player_statistics, PlayerStatistic};
pub use store::{JsonFileStore, LeagueStore, MemoryStore};
